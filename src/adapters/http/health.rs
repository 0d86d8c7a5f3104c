//! Liveness endpoint reporting which channels are wired.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::state::AppState;
use crate::domain::contact::Channel;

#[derive(Debug, Clone, Serialize)]
pub struct ServicesStatus {
    pub whatsapp: bool,
    pub email: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub services: ServicesStatus,
    pub store: bool,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        services: ServicesStatus {
            whatsapp: state.channel_ready(Channel::Primary),
            email: state.channel_ready(Channel::Secondary),
        },
        store: state.has_store(),
    })
}
