//! Outbound messaging ports.
//!
//! - `ChatSender` - raw WhatsApp send to an arbitrary address (notifications and owner replies)
//! - `MailSender` - transactional email
//! - `NotificationChannel` - one ranked channel that can deliver a `ContactMessage`
//!
//! Adapters are built once at startup and shared read-only across requests.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::contact::{Channel, ContactMessage};

/// Errors raised by a single outbound channel attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Provider rejected the credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider returned an error response.
    #[error("provider rejected request ({status}): {message}")]
    Rejected {
        /// HTTP or SMTP status code.
        status: u16,
        /// Provider's error message.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Message could not be built (bad address, header, ...).
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

impl ChannelError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ChannelError::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        ChannelError::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ChannelError::Parse(message.into())
    }

    pub fn invalid_message(message: impl Into<String>) -> Self {
        ChannelError::InvalidMessage(message.into())
    }
}

/// Sends a WhatsApp message through the telephony provider.
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Sends `body` to a `whatsapp:`-prefixed address.
    ///
    /// Returns the provider message SID.
    async fn send_chat(&self, to: &str, body: &str) -> Result<String, ChannelError>;
}

/// An email ready to hand to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html_body: String,
}

/// Sends transactional email.
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Sends the email and returns its Message-ID.
    async fn send_mail(&self, email: OutboundEmail) -> Result<String, ChannelError>;
}

/// One ranked channel able to deliver a contact message to the owner.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Rank of this channel in the fallback order.
    fn kind(&self) -> Channel;

    /// Delivers the message and returns the provider message identifier.
    async fn deliver(&self, message: &ContactMessage) -> Result<String, ChannelError>;
}
