//! ReplyToVisitorHandler - Owner reply sent over WhatsApp and appended to the thread.

use std::sync::Arc;

use super::ConversationError;
use crate::domain::conversation::{whatsapp_address, Conversation, ConversationRef, Message};
use crate::domain::foundation::ValidationError;
use crate::ports::{ChatSender, ConversationStore};

/// Command to reply to a stored conversation.
#[derive(Debug, Clone)]
pub struct ReplyToVisitorCommand {
    /// Surrogate id or conversation key.
    pub conversation_id: String,
    pub reply_message: String,
}

/// Result of a successful reply.
#[derive(Debug, Clone)]
pub struct ReplyToVisitorResult {
    pub sid: String,
    pub conversation: Conversation,
}

/// Handler for operator replies.
#[derive(Clone)]
pub struct ReplyToVisitorHandler {
    store: Option<Arc<dyn ConversationStore>>,
    sender: Option<Arc<dyn ChatSender>>,
}

impl ReplyToVisitorHandler {
    pub fn new(
        store: Option<Arc<dyn ConversationStore>>,
        sender: Option<Arc<dyn ChatSender>>,
    ) -> Self {
        Self { store, sender }
    }

    pub async fn handle(
        &self,
        cmd: ReplyToVisitorCommand,
    ) -> Result<ReplyToVisitorResult, ConversationError> {
        // 1. Validate
        let reference: ConversationRef = cmd.conversation_id.parse()?;
        let text = cmd.reply_message.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("replyMessage").into());
        }

        // 2. Collaborators
        let store = self
            .store
            .as_ref()
            .ok_or(ConversationError::ServiceUnavailable("conversation store"))?;
        let sender = self
            .sender
            .as_ref()
            .ok_or(ConversationError::ServiceUnavailable("WhatsApp channel"))?;

        // 3. Load, and require a phone to reply to
        let conversation = store
            .find(&reference)
            .await?
            .ok_or_else(|| ConversationError::not_found("Conversation not found"))?;
        let phone = conversation.visitor_phone().ok_or_else(|| {
            ConversationError::not_found("Conversation has no phone number to reply to")
        })?;

        // 4. Send
        let sid = sender.send_chat(&whatsapp_address(phone), text).await?;

        // 5. Append
        let conversation = store
            .append_message(&conversation.id(), &Message::owner(text, Some(sid.clone())))
            .await?;

        tracing::info!(conversation_id = %conversation.id(), sid = %sid, "Owner reply sent");

        Ok(ReplyToVisitorResult { sid, conversation })
    }
}
