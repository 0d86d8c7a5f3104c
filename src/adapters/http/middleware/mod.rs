//! HTTP middleware for axum.
//!
//! - `auth` - Shared-token extractor for webhook and operator routes

pub mod auth;

pub use auth::{AuthQuery, OperatorToken, RequireOperator};
