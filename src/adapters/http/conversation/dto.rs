//! Request/response DTOs for the webhook and operator endpoints.

use axum::async_trait;
use axum::extract::{Form, FromRequest, Json, Request};
use axum::http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;
use crate::application::{RecordInboundMessageCommand, ReplyToVisitorCommand};
use crate::domain::conversation::{Conversation, ConversationStatus, Message, Sender};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════════
// Inbound webhook
// ════════════════════════════════════════════════════════════════════════════════

/// Provider-pushed message. Twilio sends many more fields; only these are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundWhatsAppRequest {
    #[serde(rename = "From", default)]
    pub from: Option<String>,
    #[serde(rename = "Body", default)]
    pub body: Option<String>,
    #[serde(rename = "MessageSid", default)]
    pub message_sid: Option<String>,
    /// Shared token, when not sent in the query string.
    #[serde(default)]
    pub auth: Option<String>,
}

impl From<InboundWhatsAppRequest> for RecordInboundMessageCommand {
    fn from(req: InboundWhatsAppRequest) -> Self {
        Self {
            from: req.from.unwrap_or_default(),
            body: req.body.unwrap_or_default(),
            message_sid: req.message_sid,
        }
    }
}

/// Body extractor accepting JSON or `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct InboundPayload(pub InboundWhatsAppRequest);

#[async_trait]
impl<S> FromRequest<S> for InboundPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(payload) = Json::<InboundWhatsAppRequest>::from_request(req, state).await?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<InboundWhatsAppRequest>::from_request(req, state).await?;
            Ok(Self(payload))
        }
    }
}

/// `{ok: true}`
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Operator reply
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub reply_message: Option<String>,
}

impl From<ReplyRequest> for ReplyToVisitorCommand {
    fn from(req: ReplyRequest) -> Self {
        Self {
            conversation_id: req.conversation_id.unwrap_or_default(),
            reply_message: req.reply_message.unwrap_or_default(),
        }
    }
}

/// `{ok: true, sid}`
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub ok: bool,
    pub sid: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Conversation views
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub sender: Sender,
    pub text: String,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            sender: message.sender,
            text: message.text.clone(),
            timestamp: message.timestamp,
            provider_message_id: message.provider_message_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub id: String,
    pub conversation_id: Option<String>,
    pub visitor_name: Option<String>,
    pub visitor_email: Option<String>,
    pub visitor_phone: Option<String>,
    pub messages: Vec<MessageResponse>,
    pub status: ConversationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Conversation> for ConversationResponse {
    fn from(c: &Conversation) -> Self {
        Self {
            id: c.id().to_string(),
            conversation_id: c.conversation_key().map(str::to_string),
            visitor_name: c.visitor_name().map(str::to_string),
            visitor_email: c.visitor_email().map(str::to_string),
            visitor_phone: c.visitor_phone().map(str::to_string),
            messages: c.messages().iter().map(MessageResponse::from).collect(),
            status: c.status(),
            created_at: c.created_at(),
            updated_at: c.updated_at(),
        }
    }
}
