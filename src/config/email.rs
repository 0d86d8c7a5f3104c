//! Email configuration (SMTP fallback channel)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Email configuration
///
/// The channel is enabled only when both SMTP credentials are present.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP login, also used as the From address
    pub smtp_user: Option<String>,

    /// SMTP password (for Gmail, an app password)
    pub smtp_password: Option<Secret<String>>,

    /// SMTP relay host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// Relay port override (implicit TLS on 465 when unset)
    pub smtp_port: Option<u16>,

    /// Where contact messages are delivered; defaults to the SMTP user
    pub owner_email: Option<String>,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// SMTP command timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl EmailConfig {
    /// SMTP user, if set and non-blank
    pub fn user(&self) -> Option<&str> {
        self.smtp_user
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// SMTP password, if set and non-blank
    pub fn password(&self) -> Option<&str> {
        self.smtp_password
            .as_ref()
            .map(|p| p.expose_secret().as_str())
            .filter(|s| !s.is_empty())
    }

    /// Whether both credentials are present
    pub fn is_configured(&self) -> bool {
        self.user().is_some() && self.password().is_some()
    }

    /// Destination for contact messages
    pub fn owner_email(&self) -> Option<&str> {
        self.owner_email
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| self.user())
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidChannelTimeout("email"));
        }
        if let Some(user) = self.user() {
            if !user.contains('@') {
                return Err(ValidationError::InvalidEmailAddress("smtp_user"));
            }
        }
        if let Some(owner) = self.owner_email.as_deref().filter(|s| !s.trim().is_empty()) {
            if !owner.contains('@') {
                return Err(ValidationError::InvalidEmailAddress("owner_email"));
            }
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_user: None,
            smtp_password: None,
            smtp_host: default_smtp_host(),
            smtp_port: None,
            owner_email: None,
            from_name: default_from_name(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_from_name() -> String {
    "Portfolio Contact".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> EmailConfig {
        EmailConfig {
            smtp_user: Some("me@gmail.com".to_string()),
            smtp_password: Some(Secret::new("app-password".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_email_config_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert!(!config.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_owner_email_defaults_to_user() {
        let config = configured();
        assert!(config.is_configured());
        assert_eq!(config.owner_email(), Some("me@gmail.com"));

        let overridden = EmailConfig {
            owner_email: Some("inbox@example.com".to_string()),
            ..configured()
        };
        assert_eq!(overridden.owner_email(), Some("inbox@example.com"));
    }

    #[test]
    fn test_blank_password_is_not_configured() {
        let config = EmailConfig {
            smtp_password: Some(Secret::new(String::new())),
            ..configured()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn test_invalid_addresses_rejected() {
        let config = EmailConfig {
            smtp_user: Some("me".to_string()),
            ..configured()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidEmailAddress("smtp_user"))
        );
    }
}
