//! SMTP mailer - Implementation of MailSender over an authenticated SMTP relay.
//!
//! Uses lettre's async transport on the Tokio runtime with implicit TLS
//! (port 465 by default). Each message gets a generated `Message-ID` which is
//! returned as the provider message identifier.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use uuid::Uuid;

use crate::ports::{ChannelError, MailSender, OutboundEmail};

/// SMTP status returned for rejected credentials.
const SMTP_AUTH_FAILED: u16 = 535;

/// Connection settings for the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpMailerConfig {
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    password: Secret<String>,
    pub from_name: String,
    pub timeout: Duration,
}

impl SmtpMailerConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: None,
            username: username.into(),
            password: Secret::new(password.into()),
            from_name: "Portfolio".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Overrides the relay port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the display name on the From header.
    pub fn with_from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = name.into();
        self
    }

    /// Sets the per-command timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Sends email through an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    message_id_domain: String,
    timeout: Duration,
}

impl SmtpMailer {
    /// Builds the transport. No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// `ChannelError::InvalidMessage` if the username is not an email address,
    /// `ChannelError::Network` if the relay host cannot be resolved for TLS.
    pub fn new(config: SmtpMailerConfig) -> Result<Self, ChannelError> {
        let address: Address = config.username.parse().map_err(|e| {
            ChannelError::invalid_message(format!("Invalid sender address: {}", e))
        })?;
        let message_id_domain = address.domain().to_string();
        let from = Mailbox::new(Some(config.from_name.clone()), address);

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| ChannelError::network(format!("Invalid SMTP relay: {}", e)))?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.expose_secret().clone(),
            ))
            .timeout(Some(config.timeout));
        if let Some(port) = config.port {
            builder = builder.port(port);
        }

        Ok(Self {
            transport: builder.build(),
            from,
            message_id_domain,
            timeout: config.timeout,
        })
    }

    /// Opens a connection and authenticates, without sending anything.
    pub async fn verify(&self) -> Result<(), ChannelError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ChannelError::network("SMTP relay refused the connection")),
            Err(e) => Err(self.map_smtp_error(e)),
        }
    }

    /// Builds the MIME message and returns it with its Message-ID.
    fn build_message(&self, email: &OutboundEmail) -> Result<(Message, String), ChannelError> {
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.message_id_domain);

        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| ChannelError::invalid_message(format!("Invalid recipient: {}", e)))?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .message_id(Some(message_id.clone()));

        if let Some(reply_to) = &email.reply_to {
            match reply_to.parse::<Mailbox>() {
                Ok(mailbox) => builder = builder.reply_to(mailbox),
                Err(e) => tracing::warn!(error = %e, "Ignoring unparseable reply-to address"),
            }
        }

        let message = builder
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| ChannelError::invalid_message(e.to_string()))?;

        Ok((message, message_id))
    }

    fn map_smtp_error(&self, err: lettre::transport::smtp::Error) -> ChannelError {
        if err.is_timeout() {
            return ChannelError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            };
        }

        let status = err
            .status()
            .and_then(|code| code.to_string().parse::<u16>().ok());

        match status {
            Some(SMTP_AUTH_FAILED) => ChannelError::AuthenticationFailed,
            Some(code) => ChannelError::rejected(code, err.to_string()),
            None => ChannelError::network(err.to_string()),
        }
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send_mail(&self, email: OutboundEmail) -> Result<String, ChannelError> {
        let (message, message_id) = self.build_message(&email)?;

        self.transport.send(message).await.map_err(|e| {
            let err = self.map_smtp_error(e);
            tracing::error!(error = %err, "SMTP send failed");
            err
        })?;

        tracing::debug!(message_id = %message_id, "Email accepted by relay");
        Ok(message_id)
    }
}
