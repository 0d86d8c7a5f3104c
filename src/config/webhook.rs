//! Webhook / operator authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// Shared-secret token for the inbound webhook and the operator endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookConfig {
    pub auth_token: Option<Secret<String>>,
}

impl WebhookConfig {
    /// Token, if set and non-empty. With no token every request is rejected.
    pub fn token(&self) -> Option<&str> {
        self.auth_token
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .filter(|s| !s.is_empty())
    }
}
