//! Errors for conversation command and query handlers.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::{ChannelError, StoreError};

/// Errors that can occur while recording or replying to conversations.
#[derive(Debug, Clone, Error)]
pub enum ConversationError {
    /// Request is missing a required field.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Conversation is absent, or cannot be replied to.
    #[error("{0}")]
    NotFound(String),

    /// A collaborator (store or chat channel) is not configured.
    #[error("{0} is not configured")]
    ServiceUnavailable(&'static str),

    /// Outbound chat send failed.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Storage failed.
    #[error("storage error: {0}")]
    Storage(StoreError),
}

impl ConversationError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ConversationError::NotFound(message.into())
    }
}

impl From<StoreError> for ConversationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => {
                ConversationError::NotFound(format!("Conversation not found: {}", id))
            }
            other => ConversationError::Storage(other),
        }
    }
}
