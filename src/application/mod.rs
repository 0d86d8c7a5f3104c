//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The `Notifier` owns the delivery fallback; handlers add the optional
//! conversation store around it.

pub mod handlers;
pub mod notifier;

pub use handlers::{
    ConversationError, ListConversationsHandler, RecordContactMessageHandler,
    RecordInboundMessageCommand, RecordInboundMessageHandler, ReplyToVisitorCommand,
    ReplyToVisitorHandler, ReplyToVisitorResult, SendContactMessageCommand,
    SendContactMessageHandler, SendContactMessageResult,
};
pub use notifier::{DeliveryObserver, NoOpObserver, Notifier, NotifyError};
