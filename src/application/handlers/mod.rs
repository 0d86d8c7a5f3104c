//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod contact;
pub mod conversation;

pub use contact::{SendContactMessageCommand, SendContactMessageHandler, SendContactMessageResult};
pub use conversation::{
    ConversationError, ListConversationsHandler, RecordContactMessageHandler,
    RecordInboundMessageCommand, RecordInboundMessageHandler, ReplyToVisitorCommand,
    ReplyToVisitorHandler, ReplyToVisitorResult,
};
