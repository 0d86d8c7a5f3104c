//! Notification channel adapters.
//!
//! Implementations of the `NotificationChannel` port over the raw senders.
//!
//! ## Available Adapters
//!
//! - `WhatsAppChannel` - Primary channel, WhatsApp message to the owner
//! - `EmailChannel` - Secondary channel, email to the owner
//! - `MockChannel`, `MockChatSender`, `MockMailSender` - Scripted fakes for testing

mod email_channel;
mod mock;
mod whatsapp_channel;

pub use email_channel::EmailChannel;
pub use mock::{MockChannel, MockChatSender, MockMailSender, SentChat};
pub use whatsapp_channel::WhatsAppChannel;
