//! Conversation module - persisted visitor threads.
//!
//! A conversation is created on the first message that references its key
//! and is never deleted. Messages are owned by exactly one conversation and
//! are never mutated once appended.

mod aggregate;
mod key;
mod message;

pub use aggregate::{Conversation, ConversationStatus};
pub use key::{
    derive_conversation_key, strip_whatsapp_prefix, whatsapp_address, ConversationKey,
    ConversationRef, VisitorPatch, WHATSAPP_PREFIX,
};
pub use message::{Message, Sender};
