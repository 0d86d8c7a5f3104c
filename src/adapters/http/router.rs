//! Top-level router and the tower-http layer stack.

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::contact::contact_routes;
use super::conversation::conversation_routes;
use super::health::health;
use super::state::AppState;
use crate::config::ServerConfig;

/// Every endpoint, relative to `/api`.
///
/// # Routes
/// - `POST /send-whatsapp`
/// - `POST /incoming-whatsapp`
/// - `GET /conversations`
/// - `POST /reply`
/// - `GET /health`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(contact_routes())
        .merge(conversation_routes())
        .route("/health", get(health))
}

/// Complete application with middleware, ready to serve.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .nest("/api", api_router())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(&server.cors_origins_list()))
        .with_state(state)
}

/// Permissive unless origins are listed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}
