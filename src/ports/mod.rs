//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! ## Messaging Ports
//!
//! - `ChatSender` - WhatsApp send through the telephony provider
//! - `MailSender` - Transactional email
//! - `NotificationChannel` - A ranked channel that delivers a contact message
//!
//! ## Storage Ports
//!
//! - `ConversationStore` - Visitor threads with atomic upsert

mod channel;
mod conversation_store;

pub use channel::{ChannelError, ChatSender, MailSender, NotificationChannel, OutboundEmail};
pub use conversation_store::{ConversationStore, StoreError};
