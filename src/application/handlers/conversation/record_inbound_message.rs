//! RecordInboundMessageHandler - Stores a WhatsApp reply pushed by the provider.

use std::sync::Arc;

use super::ConversationError;
use crate::domain::conversation::{
    strip_whatsapp_prefix, Conversation, ConversationKey, Message, VisitorPatch,
};
use crate::domain::foundation::ValidationError;
use crate::ports::ConversationStore;

/// Inbound webhook payload, already authenticated.
#[derive(Debug, Clone, Default)]
pub struct RecordInboundMessageCommand {
    /// Sender address, usually `whatsapp:+<number>`.
    pub from: String,
    pub body: String,
    pub message_sid: Option<String>,
}

/// Handler that threads inbound messages by the visitor's phone number.
#[derive(Clone)]
pub struct RecordInboundMessageHandler {
    store: Arc<dyn ConversationStore>,
}

impl RecordInboundMessageHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: RecordInboundMessageCommand,
    ) -> Result<Conversation, ConversationError> {
        let phone = strip_whatsapp_prefix(&cmd.from);
        if phone.is_empty() {
            return Err(ValidationError::empty_field("From").into());
        }

        let message = Message::visitor(cmd.body, cmd.message_sid.filter(|s| !s.is_empty()));
        let conversation = self
            .store
            .upsert_visitor_message(
                &ConversationKey::Phone(phone.clone()),
                &VisitorPatch::phone(phone),
                &message,
            )
            .await?;

        tracing::info!(
            conversation_id = %conversation.id(),
            "Inbound WhatsApp message recorded"
        );

        Ok(conversation)
    }
}
