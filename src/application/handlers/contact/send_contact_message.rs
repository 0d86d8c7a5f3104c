//! SendContactMessageHandler - Delivers a contact form submission and
//! optionally threads it in the conversation store.

use crate::application::handlers::conversation::RecordContactMessageHandler;
use crate::application::notifier::{Notifier, NotifyError};
use crate::domain::contact::{ContactMessage, DeliveryResult};
use crate::domain::foundation::ConversationId;

/// Raw contact form submission.
#[derive(Debug, Clone, Default)]
pub struct SendContactMessageCommand {
    pub visitor_name: String,
    pub message: String,
    pub visitor_email: Option<String>,
}

/// Result of a delivered submission.
#[derive(Debug, Clone)]
pub struct SendContactMessageResult {
    pub delivery: DeliveryResult,
    /// Set when the message was also recorded.
    pub conversation_id: Option<ConversationId>,
}

/// Handler for contact form submissions.
#[derive(Clone)]
pub struct SendContactMessageHandler {
    notifier: Notifier,
    recorder: Option<RecordContactMessageHandler>,
}

impl SendContactMessageHandler {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            recorder: None,
        }
    }

    /// Records delivered messages through the given handler.
    pub fn with_recorder(mut self, recorder: RecordContactMessageHandler) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn handle(
        &self,
        cmd: SendContactMessageCommand,
    ) -> Result<SendContactMessageResult, NotifyError> {
        // 1. Validate
        let contact = ContactMessage::new(
            &cmd.visitor_name,
            &cmd.message,
            cmd.visitor_email.as_deref(),
        )?;

        // 2. Deliver
        let delivery = self.notifier.deliver(&contact).await?;

        // 3. Record; the visitor already reached the owner, so a store failure is only logged
        let conversation_id = match &self.recorder {
            Some(recorder) => match recorder.handle(&contact, &delivery).await {
                Ok(conversation) => Some(conversation.id()),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to record contact message");
                    None
                }
            },
            None => None,
        };

        Ok(SendContactMessageResult {
            delivery,
            conversation_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryConversationStore;
    use crate::adapters::messaging::MockChannel;
    use crate::domain::contact::Channel;
    use crate::domain::conversation::{
        Conversation, ConversationKey, ConversationRef, Message, VisitorPatch,
    };
    use crate::ports::{ChannelError, ConversationStore, StoreError};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FailingStore;

    #[async_trait]
    impl ConversationStore for FailingStore {
        async fn upsert_visitor_message(
            &self,
            _key: &ConversationKey,
            _patch: &VisitorPatch,
            _message: &Message,
        ) -> Result<Conversation, StoreError> {
            Err(StoreError::Database("connection reset".to_string()))
        }

        async fn find(&self, _r: &ConversationRef) -> Result<Option<Conversation>, StoreError> {
            Ok(None)
        }

        async fn append_message(
            &self,
            id: &ConversationId,
            _message: &Message,
        ) -> Result<Conversation, StoreError> {
            Err(StoreError::NotFound(*id))
        }

        async fn list(&self) -> Result<Vec<Conversation>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn command(name: &str, message: &str, email: Option<&str>) -> SendContactMessageCommand {
        SendContactMessageCommand {
            visitor_name: name.to_string(),
            message: message.to_string(),
            visitor_email: email.map(str::to_string),
        }
    }

    fn notifier_with(primary: MockChannel) -> Notifier {
        Notifier::new().with_primary(Arc::new(primary))
    }

    #[tokio::test]
    async fn delivers_and_records() {
        let store = Arc::new(InMemoryConversationStore::new());
        let handler = SendContactMessageHandler::new(notifier_with(
            MockChannel::new(Channel::Primary).with_success("SM1"),
        ))
        .with_recorder(RecordContactMessageHandler::new(store.clone()));

        let result = handler
            .handle(command("Alice", "Hi", Some("a@x.com")))
            .await
            .unwrap();

        assert_eq!(result.delivery, DeliveryResult::new(Channel::Primary, "SM1"));
        assert!(result.conversation_id.is_some());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn store_failure_still_succeeds() {
        let handler = SendContactMessageHandler::new(notifier_with(
            MockChannel::new(Channel::Primary).with_success("SM1"),
        ))
        .with_recorder(RecordContactMessageHandler::new(Arc::new(FailingStore)));

        let result = handler.handle(command("Alice", "Hi", None)).await.unwrap();

        assert_eq!(result.delivery.provider_message_id, "SM1");
        assert_eq!(result.conversation_id, None);
    }

    #[tokio::test]
    async fn failed_delivery_is_not_recorded() {
        let store = Arc::new(InMemoryConversationStore::new());
        let handler = SendContactMessageHandler::new(notifier_with(
            MockChannel::new(Channel::Primary).with_error(ChannelError::network("down")),
        ))
        .with_recorder(RecordContactMessageHandler::new(store.clone()));

        let err = handler.handle(command("Alice", "Hi", None)).await.unwrap_err();

        assert_eq!(err, NotifyError::DeliveryFailed);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn validation_happens_before_delivery() {
        let primary = MockChannel::new(Channel::Primary);
        let handler = SendContactMessageHandler::new(notifier_with(primary.clone()));

        let err = handler.handle(command("", "Hi", None)).await.unwrap_err();

        assert!(matches!(err, NotifyError::Validation(_)));
        assert_eq!(primary.call_count(), 0);
    }
}
