//! Conversation HTTP adapter - inbound webhook and operator endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::conversation_routes;
