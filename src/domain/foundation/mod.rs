//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and the validation error type
//! shared by the contact and conversation modules.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::ConversationId;
pub use timestamp::Timestamp;
