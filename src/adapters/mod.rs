//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `twilio` - WhatsApp over Twilio's Messages API
//! - `email` - SMTP relay via lettre
//! - `messaging` - Notification channels built on the raw senders, plus mocks
//! - `postgres` - Conversation store on PostgreSQL
//! - `memory` - Conversation store held in process memory
//! - `http` - REST API (axum)

pub mod email;
pub mod http;
pub mod memory;
pub mod messaging;
pub mod postgres;
pub mod twilio;
