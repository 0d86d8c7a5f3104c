//! Twilio configuration (primary WhatsApp channel)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::twilio::DEFAULT_API_BASE_URL;
use crate::domain::conversation::{whatsapp_address, WHATSAPP_PREFIX};

/// Twilio configuration
///
/// Credentials enable sending at all (owner replies); the owner number
/// additionally enables contact notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    /// Account SID
    pub account_sid: Option<String>,

    /// Auth token
    pub auth_token: Option<Secret<String>>,

    /// Sender address
    #[serde(default = "default_whatsapp_from")]
    pub whatsapp_from: String,

    /// Owner's number, with or without the `whatsapp:` prefix
    pub owner_whatsapp: Option<String>,

    /// API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl TwilioConfig {
    /// Account SID and auth token, if both are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let sid = self
            .account_sid
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        let token = self
            .auth_token
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .filter(|s| !s.is_empty())?;
        Some((sid, token))
    }

    /// Owner destination as a `whatsapp:` address
    pub fn owner_address(&self) -> Option<String> {
        self.owner_whatsapp
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(whatsapp_address)
    }

    /// Whether contact notifications can go out over WhatsApp
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some() && self.owner_address().is_some()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Twilio configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.whatsapp_from.starts_with(WHATSAPP_PREFIX) {
            return Err(ValidationError::InvalidWhatsAppFrom);
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://") {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidChannelTimeout("twilio"));
        }
        Ok(())
    }
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            whatsapp_from: default_whatsapp_from(),
            owner_whatsapp: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_whatsapp_from() -> String {
    "whatsapp:+14155238886".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> TwilioConfig {
        TwilioConfig {
            account_sid: Some("AC123".to_string()),
            auth_token: Some(Secret::new("token".to_string())),
            owner_whatsapp: Some("+15550001111".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_use_sandbox_sender() {
        let config = TwilioConfig::default();
        assert_eq!(config.whatsapp_from, "whatsapp:+14155238886");
        assert!(!config.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_owner_address_gets_prefix() {
        let config = configured();
        assert!(config.is_configured());
        assert_eq!(config.owner_address().as_deref(), Some("whatsapp:+15550001111"));
    }

    #[test]
    fn test_credentials_without_owner() {
        let config = TwilioConfig {
            owner_whatsapp: None,
            ..configured()
        };
        assert!(config.credentials().is_some());
        assert!(!config.is_configured());
    }

    #[test]
    fn test_from_requires_prefix() {
        let config = TwilioConfig {
            whatsapp_from: "+14155238886".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidWhatsAppFrom));
    }
}
