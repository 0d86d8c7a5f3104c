//! HTTP handlers for the contact form.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;

use super::dto::{SendContactRequest, SendContactResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

/// POST /api/send-whatsapp - Forward a contact form submission to the owner
pub async fn send_contact_message(
    State(state): State<AppState>,
    request: Result<Json<SendContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request?;
    let handler = state.send_contact_handler();
    let result = handler.handle(request.into()).await?;
    Ok(Json(SendContactResponse::from(result)))
}
