//! Axum routes for the webhook and operator endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{incoming_whatsapp, list_conversations, reply_to_visitor};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// ## Webhook (shared token in query or body)
/// - `POST /incoming-whatsapp` - Record a visitor's WhatsApp message
///
/// ## Operator (shared token in query)
/// - `GET /conversations` - List threads
/// - `POST /reply` - Reply to a visitor
pub fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route("/incoming-whatsapp", post(incoming_whatsapp))
        .route("/conversations", get(list_conversations))
        .route("/reply", post(reply_to_visitor))
}
