//! HTTP error mapping shared by every route.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::{ConversationError, NotifyError};

/// Failure body: `{ok: false, error, details?}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error wrapper that implements IntoResponse.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or wrong shared token.
    Unauthorized,
    /// Body could not be read or parsed.
    InvalidBody(String),
    Notify(NotifyError),
    Conversation(ConversationError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        ApiError::Notify(err)
    }
}

impl From<ConversationError> for ApiError {
    fn from(err: ConversationError) -> Self {
        ApiError::Conversation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized => {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({ "error": "Unauthorized" })),
                )
                    .into_response();
            }
            ApiError::InvalidBody(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details("Invalid request body", details),
            ),
            ApiError::Notify(err) => match err {
                NotifyError::Validation(e) => (StatusCode::BAD_REQUEST, ErrorResponse::new(e.to_string())),
                NotifyError::ServiceUnavailable => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new("No communication service configured"),
                ),
                NotifyError::DeliveryFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(
                        "Failed to send message via all methods",
                        "Both WhatsApp and Email services are currently unavailable. Please try again later.",
                    ),
                ),
            },
            ApiError::Conversation(err) => match err {
                ConversationError::Validation(e) => {
                    (StatusCode::BAD_REQUEST, ErrorResponse::new(e.to_string()))
                }
                ConversationError::NotFound(message) => {
                    (StatusCode::NOT_FOUND, ErrorResponse::new(message))
                }
                e @ ConversationError::ServiceUnavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(e.to_string()))
                }
                ConversationError::Channel(e) => {
                    tracing::error!(error = %e, "WhatsApp send failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::with_details("send_failed", "The WhatsApp message could not be sent"),
                    )
                }
                ConversationError::Storage(e) => {
                    tracing::error!(error = %e, "Conversation store failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::new("Internal server error"),
                    )
                }
            },
        };

        (status, Json(body)).into_response()
    }
}
