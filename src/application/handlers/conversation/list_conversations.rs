//! ListConversationsHandler - Query handler for the operator inbox.

use std::sync::Arc;

use super::ConversationError;
use crate::domain::conversation::Conversation;
use crate::ports::ConversationStore;

/// Handler returning every thread, most recently active first.
#[derive(Clone)]
pub struct ListConversationsHandler {
    store: Option<Arc<dyn ConversationStore>>,
}

impl ListConversationsHandler {
    pub fn new(store: Option<Arc<dyn ConversationStore>>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<Vec<Conversation>, ConversationError> {
        let store = self
            .store
            .as_ref()
            .ok_or(ConversationError::ServiceUnavailable("conversation store"))?;
        Ok(store.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryConversationStore;
    use crate::domain::conversation::{ConversationKey, Message, VisitorPatch};

    #[tokio::test]
    async fn without_store_is_service_unavailable() {
        let err = ListConversationsHandler::new(None).handle().await.unwrap_err();
        assert!(matches!(err, ConversationError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn returns_stored_threads() {
        let store = Arc::new(InMemoryConversationStore::new());
        store
            .upsert_visitor_message(
                &ConversationKey::Phone("+1555".to_string()),
                &VisitorPatch::phone("+1555"),
                &Message::visitor("hi", None),
            )
            .await
            .unwrap();

        let all = ListConversationsHandler::new(Some(store)).handle().await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].visitor_phone(), Some("+1555"));
    }
}
