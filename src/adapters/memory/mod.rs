//! In-memory adapters for development and tests.

mod conversation_store;

pub use conversation_store::InMemoryConversationStore;
