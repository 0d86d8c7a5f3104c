//! RecordContactMessageHandler - Stores a delivered contact form message.

use std::sync::Arc;

use super::ConversationError;
use crate::domain::contact::{ContactMessage, DeliveryResult};
use crate::domain::conversation::{Conversation, ConversationKey, Message, VisitorPatch};
use crate::ports::ConversationStore;

/// Handler that threads a delivered submission under the visitor's key.
#[derive(Clone)]
pub struct RecordContactMessageHandler {
    store: Arc<dyn ConversationStore>,
}

impl RecordContactMessageHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        contact: &ContactMessage,
        delivery: &DeliveryResult,
    ) -> Result<Conversation, ConversationError> {
        let key = ConversationKey::from_contact(contact.visitor_name(), contact.visitor_email());
        let patch = VisitorPatch::contact(
            contact.visitor_name(),
            contact.visitor_email().map(str::to_string),
        );
        let message = Message::visitor(
            contact.text(),
            Some(delivery.provider_message_id.clone()),
        );

        let conversation = self
            .store
            .upsert_visitor_message(&key, &patch, &message)
            .await?;

        tracing::debug!(
            conversation_id = %conversation.id(),
            messages = conversation.messages().len(),
            "Contact message recorded"
        );

        Ok(conversation)
    }
}
