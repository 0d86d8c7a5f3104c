//! Twilio adapter - WhatsApp over the Twilio Messages API.

mod client;

pub use client::{TwilioClient, TwilioClientConfig, DEFAULT_API_BASE_URL};
