//! In-memory conversation store.
//!
//! This adapter provides an in-memory implementation of the `ConversationStore`
//! port. Useful for:
//! - Development without a database
//! - Testing handlers and routes
//!
//! Threads are lost on restart. Use `PostgresConversationStore` for anything
//! that must survive a redeploy.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use crate::domain::conversation::{
    Conversation, ConversationKey, ConversationRef, Message, VisitorPatch,
};
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, StoreError};

/// In-memory implementation of the ConversationStore port.
///
/// A single `Mutex` guards every thread, so an upsert is atomic with respect
/// to all other calls.
#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: Mutex<Vec<Conversation>>,
}

impl InMemoryConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations.
    pub fn len(&self) -> usize {
        self.conversations.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns true if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Conversation>>, StoreError> {
        self.conversations
            .lock()
            .map_err(|_| StoreError::Database("conversation store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn upsert_visitor_message(
        &self,
        key: &ConversationKey,
        patch: &VisitorPatch,
        message: &Message,
    ) -> Result<Conversation, StoreError> {
        let mut conversations = self.lock()?;

        let index = match conversations.iter().position(|c| c.matches(key)) {
            Some(index) => index,
            None => {
                conversations.push(Conversation::open(key));
                conversations.len() - 1
            }
        };

        let conversation = &mut conversations[index];
        conversation.apply_patch(patch);
        conversation.append(message.clone());
        Ok(conversation.clone())
    }

    async fn find(&self, reference: &ConversationRef) -> Result<Option<Conversation>, StoreError> {
        let conversations = self.lock()?;
        let found = conversations.iter().find(|c| match reference {
            ConversationRef::Id(id) => c.id() == *id,
            ConversationRef::Key(key) => c.conversation_key() == Some(key.as_str()),
        });
        Ok(found.cloned())
    }

    async fn append_message(
        &self,
        id: &ConversationId,
        message: &Message,
    ) -> Result<Conversation, StoreError> {
        let mut conversations = self.lock()?;
        let conversation = conversations
            .iter_mut()
            .find(|c| c.id() == *id)
            .ok_or(StoreError::NotFound(*id))?;

        conversation.append(message.clone());
        Ok(conversation.clone())
    }

    async fn list(&self) -> Result<Vec<Conversation>, StoreError> {
        // Newest insert wins a timestamp tie.
        let mut all: Vec<Conversation> = self.lock()?.iter().rev().cloned().collect();
        all.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Sender;

    fn contact_key() -> ConversationKey {
        ConversationKey::from_contact("Alice", Some("a@x.com"))
    }

    fn contact_patch() -> VisitorPatch {
        VisitorPatch::contact("Alice", Some("a@x.com".to_string()))
    }

    #[tokio::test]
    async fn same_key_appends_to_one_thread() {
        let store = InMemoryConversationStore::new();

        store
            .upsert_visitor_message(&contact_key(), &contact_patch(), &Message::visitor("one", None))
            .await
            .unwrap();
        let updated = store
            .upsert_visitor_message(&contact_key(), &contact_patch(), &Message::visitor("two", None))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        let texts: Vec<_> = updated.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(updated.visitor_name(), Some("Alice"));
    }

    #[tokio::test]
    async fn phone_key_creates_separate_thread() {
        let store = InMemoryConversationStore::new();
        store
            .upsert_visitor_message(&contact_key(), &contact_patch(), &Message::visitor("web", None))
            .await
            .unwrap();

        let by_phone = ConversationKey::from_whatsapp_address("whatsapp:+15551234567");
        let thread = store
            .upsert_visitor_message(
                &by_phone,
                &VisitorPatch::phone("+15551234567"),
                &Message::visitor("hi from phone", Some("SM1".to_string())),
            )
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(thread.visitor_phone(), Some("+15551234567"));
        assert_eq!(thread.messages()[0].provider_message_id.as_deref(), Some("SM1"));
    }

    #[tokio::test]
    async fn find_by_id_or_key() {
        let store = InMemoryConversationStore::new();
        let created = store
            .upsert_visitor_message(&contact_key(), &contact_patch(), &Message::visitor("x", None))
            .await
            .unwrap();

        let by_id = store.find(&ConversationRef::Id(created.id())).await.unwrap();
        let by_key = store
            .find(&ConversationRef::Key("a@x.com".to_string()))
            .await
            .unwrap();
        let missing = store
            .find(&ConversationRef::Key("nobody".to_string()))
            .await
            .unwrap();

        assert_eq!(by_id.map(|c| c.id()), Some(created.id()));
        assert_eq!(by_key.map(|c| c.id()), Some(created.id()));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn append_to_unknown_conversation_is_not_found() {
        let store = InMemoryConversationStore::new();
        let id = ConversationId::new();

        let err = store
            .append_message(&id, &Message::owner("hello", None))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn append_adds_owner_message() {
        let store = InMemoryConversationStore::new();
        let created = store
            .upsert_visitor_message(&contact_key(), &contact_patch(), &Message::visitor("q", None))
            .await
            .unwrap();

        let updated = store
            .append_message(&created.id(), &Message::owner("a", Some("SM9".to_string())))
            .await
            .unwrap();

        assert_eq!(updated.messages().len(), 2);
        assert_eq!(updated.messages()[1].sender, Sender::Owner);
    }

    #[tokio::test]
    async fn list_is_most_recent_first() {
        let store = InMemoryConversationStore::new();
        let older = store
            .upsert_visitor_message(&contact_key(), &contact_patch(), &Message::visitor("1", None))
            .await
            .unwrap();

        let mut later = Message::visitor("2", None);
        later.timestamp = older.updated_at().plus_secs(60);
        let newer = store
            .upsert_visitor_message(
                &ConversationKey::from_contact("Bob Jones", None),
                &VisitorPatch::contact("Bob Jones", None),
                &later,
            )
            .await
            .unwrap();

        let listed: Vec<_> = store.list().await.unwrap().iter().map(|c| c.id()).collect();

        assert_eq!(listed, vec![newer.id(), older.id()]);
    }
}
