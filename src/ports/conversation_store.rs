//! Conversation store port.
//!
//! Defines the contract for persisting visitor threads. Implementations must
//! ensure:
//! - `upsert_visitor_message` is a single atomic find-or-create-and-append,
//!   so concurrent submissions with the same key never create duplicates
//! - Messages are persisted in insertion order
//! - Nothing is ever deleted

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::{
    Conversation, ConversationKey, ConversationRef, Message, VisitorPatch,
};
use crate::domain::foundation::ConversationId;

/// Errors raised by conversation storage.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("conversation not found: {0}")]
    NotFound(ConversationId),

    #[error("database error: {0}")]
    Database(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Repository port for conversation threads.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Finds the conversation matching `key` (creating it if absent),
    /// applies `patch` and appends `message`, atomically.
    ///
    /// Returns the conversation after the update.
    async fn upsert_visitor_message(
        &self,
        key: &ConversationKey,
        patch: &VisitorPatch,
        message: &Message,
    ) -> Result<Conversation, StoreError>;

    /// Finds a conversation by surrogate id or conversation key.
    async fn find(&self, reference: &ConversationRef) -> Result<Option<Conversation>, StoreError>;

    /// Appends a message to an existing conversation and refreshes `updatedAt`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the conversation doesn't exist
    async fn append_message(
        &self,
        id: &ConversationId,
        message: &Message,
    ) -> Result<Conversation, StoreError>;

    /// All conversations, most recently active first.
    async fn list(&self) -> Result<Vec<Conversation>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ConversationStore) {}
    }
}
