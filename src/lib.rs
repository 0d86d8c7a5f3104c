//! Portfolio Contact - contact form relay for a personal portfolio site.
//!
//! Visitor messages are forwarded to the site owner over WhatsApp, falling
//! back to email when WhatsApp is unavailable. Inbound WhatsApp messages and
//! the owner's replies can be kept as per-visitor conversation threads.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
