//! HTTP handlers for the inbound webhook and the operator endpoints.
//!
//! Every route here checks the shared token before touching storage.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::Uri;
use axum::response::IntoResponse;

use super::dto::{
    AckResponse, ConversationResponse, InboundPayload, ReplyRequest, ReplyResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{AuthQuery, RequireOperator};
use crate::adapters::http::state::AppState;

// ════════════════════════════════════════════════════════════════════════════════
// Webhook
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/incoming-whatsapp - Provider pushes a visitor's WhatsApp message
///
/// The token may come from `?auth=` or an `auth` body field. A body that
/// cannot be parsed is only reported once the query token has verified.
pub async fn incoming_whatsapp(
    State(state): State<AppState>,
    uri: Uri,
    payload: Result<InboundPayload, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.operator_token();
    let query_verified = token.verify(AuthQuery::from_uri(&uri).auth.as_deref());

    let payload = match payload {
        Ok(InboundPayload(payload)) => payload,
        Err(err) if query_verified => return Err(err),
        Err(_) => {
            tracing::warn!("Rejected inbound webhook with bad token");
            return Err(ApiError::Unauthorized);
        }
    };
    if !query_verified && !token.verify(payload.auth.as_deref()) {
        tracing::warn!("Rejected inbound webhook with bad token");
        return Err(ApiError::Unauthorized);
    }

    match state.record_inbound_handler() {
        Some(handler) => {
            handler.handle(payload.into()).await?;
        }
        None => {
            tracing::info!(from = ?payload.from, "Inbound WhatsApp message not persisted: no store");
        }
    }

    Ok(Json(AckResponse { ok: true }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Operator endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/conversations - All threads, most recently active first
pub async fn list_conversations(
    _operator: RequireOperator,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let conversations = state.list_conversations_handler().handle().await?;
    let response: Vec<ConversationResponse> =
        conversations.iter().map(ConversationResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/reply - Owner replies to a visitor over WhatsApp
pub async fn reply_to_visitor(
    _operator: RequireOperator,
    State(state): State<AppState>,
    request: Result<Json<ReplyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request?;
    let result = state.reply_handler().handle(request.into()).await?;
    Ok(Json(ReplyResponse {
        ok: true,
        sid: result.sid,
    }))
}
