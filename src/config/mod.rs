//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PORTFOLIO_CONTACT` prefix and nested values use double underscores as separators.
//!
//! Every section is optional. A channel without credentials is disabled, not
//! an error, so the service always starts.
//!
//! # Example
//!
//! ```no_run
//! use portfolio_contact::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod email;
mod error;
mod server;
mod twilio;
mod webhook;

pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use twilio::TwilioConfig;
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Twilio WhatsApp channel
    #[serde(default)]
    pub twilio: TwilioConfig,

    /// SMTP email channel
    #[serde(default)]
    pub email: EmailConfig,

    /// Conversation store
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Shared token for the webhook and operator routes
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PORTFOLIO_CONTACT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PORTFOLIO_CONTACT__SERVER__PORT=4000` -> `server.port = 4000`
    /// - `PORTFOLIO_CONTACT__TWILIO__ACCOUNT_SID=...` -> `twilio.account_sid = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PORTFOLIO_CONTACT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.twilio.validate()?;
        self.email.validate()?;
        self.database.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PORTFOLIO_CONTACT__SERVER__PORT",
        "PORTFOLIO_CONTACT__SERVER__ENVIRONMENT",
        "PORTFOLIO_CONTACT__TWILIO__ACCOUNT_SID",
        "PORTFOLIO_CONTACT__TWILIO__AUTH_TOKEN",
        "PORTFOLIO_CONTACT__TWILIO__OWNER_WHATSAPP",
        "PORTFOLIO_CONTACT__EMAIL__SMTP_USER",
        "PORTFOLIO_CONTACT__EMAIL__SMTP_PASSWORD",
        "PORTFOLIO_CONTACT__DATABASE__URL",
        "PORTFOLIO_CONTACT__DATABASE__IN_MEMORY",
        "PORTFOLIO_CONTACT__WEBHOOK__AUTH_TOKEN",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_nothing_set() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 4000);
        assert!(!config.twilio.is_configured());
        assert!(!config.email.is_configured());
        assert_eq!(config.webhook.token(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_channels_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PORTFOLIO_CONTACT__TWILIO__ACCOUNT_SID", "AC123");
        env::set_var("PORTFOLIO_CONTACT__TWILIO__AUTH_TOKEN", "token");
        env::set_var("PORTFOLIO_CONTACT__TWILIO__OWNER_WHATSAPP", "+15550001111");
        env::set_var("PORTFOLIO_CONTACT__EMAIL__SMTP_USER", "me@gmail.com");
        env::set_var("PORTFOLIO_CONTACT__EMAIL__SMTP_PASSWORD", "app-password");
        env::set_var("PORTFOLIO_CONTACT__WEBHOOK__AUTH_TOKEN", "s3cret");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.twilio.is_configured());
        assert!(config.email.is_configured());
        assert_eq!(config.email.owner_email(), Some("me@gmail.com"));
        assert_eq!(config.webhook.token(), Some("s3cret"));
    }

    #[test]
    fn test_store_settings() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PORTFOLIO_CONTACT__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("PORTFOLIO_CONTACT__DATABASE__IN_MEMORY", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url(), Some("postgresql://test@localhost/test"));
        assert!(config.database.in_memory);
    }

    #[test]
    fn test_is_production_and_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PORTFOLIO_CONTACT__SERVER__ENVIRONMENT", "production");
        env::set_var("PORTFOLIO_CONTACT__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.server.port, 3000);
    }
}
