//! Axum routes for the contact form.

use axum::routing::post;
use axum::Router;

use super::handlers::send_contact_message;
use crate::adapters::http::state::AppState;

/// # Routes
/// - `POST /send-whatsapp` - Forward a submission (WhatsApp, then email)
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/send-whatsapp", post(send_contact_message))
}
