//! Conversation handlers - visitor threads and operator replies.

mod errors;
mod list_conversations;
mod record_contact_message;
mod record_inbound_message;
mod reply_to_visitor;

pub use errors::ConversationError;
pub use list_conversations::ListConversationsHandler;
pub use record_contact_message::RecordContactMessageHandler;
pub use record_inbound_message::{RecordInboundMessageCommand, RecordInboundMessageHandler};
pub use reply_to_visitor::{ReplyToVisitorCommand, ReplyToVisitorHandler, ReplyToVisitorResult};
