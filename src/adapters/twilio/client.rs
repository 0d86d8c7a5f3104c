//! Twilio WhatsApp client - Implementation of ChatSender for Twilio's Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TwilioClientConfig::new(account_sid, auth_token, "whatsapp:+14155238886")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = TwilioClient::new(config)?;
//! let sid = client.send_chat("whatsapp:+15551234567", "Hello").await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{ChannelError, ChatSender};

/// Default Twilio REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";

/// Configuration for the Twilio client.
#[derive(Debug, Clone)]
pub struct TwilioClientConfig {
    /// Account SID, also the Basic auth username.
    pub account_sid: String,
    /// Auth token, the Basic auth password.
    auth_token: Secret<String>,
    /// Sender address (`whatsapp:+...`).
    pub from: String,
    /// Base URL for the API (default: https://api.twilio.com).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl TwilioClientConfig {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: Secret::new(auth_token.into()),
            from: from.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn auth_token(&self) -> &str {
        self.auth_token.expose_secret()
    }
}

/// Twilio Messages API client.
pub struct TwilioClient {
    config: TwilioClientConfig,
    client: Client,
}

/// Subset of the Twilio message resource we care about.
#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: String,
}

/// Twilio REST error body.
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<u32>,
    #[serde(default)]
    message: Option<String>,
}

impl TwilioClient {
    /// Creates a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// `ChannelError::Network` if the HTTP client cannot be built.
    pub fn new(config: TwilioClientConfig) -> Result<Self, ChannelError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChannelError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Messages endpoint for the configured account.
    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    /// Maps a non-success response to a channel error.
    async fn handle_response_status(&self, response: Response) -> Result<Response, ChannelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(ChannelError::AuthenticationFailed),
            code => Err(ChannelError::rejected(code, Self::parse_error_message(&body))),
        }
    }

    /// Extracts a readable message from a Twilio error body.
    fn parse_error_message(body: &str) -> String {
        match serde_json::from_str::<TwilioErrorBody>(body) {
            Ok(TwilioErrorBody {
                code: Some(code),
                message: Some(message),
            }) => format!("{} (code {})", message, code),
            Ok(TwilioErrorBody {
                message: Some(message),
                ..
            }) => message,
            _ if body.is_empty() => "empty response body".to_string(),
            _ => body.to_string(),
        }
    }
}

#[async_trait]
impl ChatSender for TwilioClient {
    async fn send_chat(&self, to: &str, body: &str) -> Result<String, ChannelError> {
        let params = [("From", self.config.from.as_str()), ("To", to), ("Body", body)];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(self.config.auth_token()))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChannelError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    ChannelError::network(format!("Connection failed: {}", e))
                } else {
                    ChannelError::network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await.map_err(|e| {
            tracing::error!(error = %e, to = %to, "Twilio send failed");
            e
        })?;

        let message: TwilioMessage = response
            .json()
            .await
            .map_err(|e| ChannelError::parse(format!("Failed to parse Twilio response: {}", e)))?;

        tracing::debug!(sid = %message.sid, to = %to, "Twilio message accepted");
        Ok(message.sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Form;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::collections::HashMap;

    /// Spawns a fake Twilio API and returns its base URL.
    async fn spawn_fake_twilio(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: &str) -> TwilioClient {
        let config = TwilioClientConfig::new("AC123", "secret", "whatsapp:+14155238886")
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5));
        TwilioClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn send_chat_posts_form_and_returns_sid() {
        async fn create(
            headers: HeaderMap,
            Form(form): Form<HashMap<String, String>>,
        ) -> impl IntoResponse {
            assert!(headers.get("authorization").is_some());
            assert_eq!(form["From"], "whatsapp:+14155238886");
            assert_eq!(form["To"], "whatsapp:+15550001111");
            assert_eq!(form["Body"], "hello");
            (StatusCode::CREATED, Json(serde_json::json!({ "sid": "SM0001" })))
        }

        let base = spawn_fake_twilio(Router::new().route(
            "/2010-04-01/Accounts/AC123/Messages.json",
            post(create),
        ))
        .await;

        let sid = client_for(&base)
            .send_chat("whatsapp:+15550001111", "hello")
            .await
            .unwrap();

        assert_eq!(sid, "SM0001");
    }

    #[tokio::test]
    async fn send_chat_maps_error_body() {
        async fn reject() -> impl IntoResponse {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "code": 21211,
                    "message": "Invalid 'To' Phone Number",
                    "status": 400
                })),
            )
        }

        let base = spawn_fake_twilio(Router::new().route(
            "/2010-04-01/Accounts/AC123/Messages.json",
            post(reject),
        ))
        .await;

        let err = client_for(&base)
            .send_chat("whatsapp:bad", "hello")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ChannelError::rejected(400, "Invalid 'To' Phone Number (code 21211)")
        );
    }

    #[tokio::test]
    async fn send_chat_maps_unauthorized() {
        let base = spawn_fake_twilio(Router::new().route(
            "/2010-04-01/Accounts/AC123/Messages.json",
            post(|| async { StatusCode::UNAUTHORIZED }),
        ))
        .await;

        let err = client_for(&base).send_chat("whatsapp:+1", "x").await.unwrap_err();

        assert_eq!(err, ChannelError::AuthenticationFailed);
    }

    #[test]
    fn messages_url_includes_account() {
        let client = client_for("https://api.twilio.com/");
        assert_eq!(
            client.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn parse_error_message_falls_back_to_raw_body() {
        assert_eq!(TwilioClient::parse_error_message("oops"), "oops");
        assert_eq!(TwilioClient::parse_error_message(""), "empty response body");
        assert_eq!(
            TwilioClient::parse_error_message(r#"{"message":"nope"}"#),
            "nope"
        );
    }

    #[test]
    fn config_debug_redacts_token() {
        let config = TwilioClientConfig::new("AC123", "super-secret", "whatsapp:+1");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
