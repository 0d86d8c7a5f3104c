//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! - `PostgresConversationStore` - Visitor threads with atomic upsert
//! - `run_migrations` - Applies the embedded schema in `migrations/`

mod conversation_store;

pub use conversation_store::{run_migrations, PostgresConversationStore};
