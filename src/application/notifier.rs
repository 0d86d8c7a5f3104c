//! Notifier - delivers a contact message to the owner with one fallback hop.
//!
//! Channel order is fixed: the primary (WhatsApp) channel first, the
//! secondary (email) channel only when the primary produced no message id.
//! Channel errors are logged and swallowed here; callers only ever see the
//! aggregate outcome.
//!
//! # Example
//!
//! ```ignore
//! let notifier = Notifier::new()
//!     .with_primary(Arc::new(WhatsAppChannel::new(twilio, owner_address)))
//!     .with_secondary(Arc::new(EmailChannel::new(mailer, owner_email)));
//!
//! let result = notifier.send("Alice", "Hi there", Some("a@x.com")).await?;
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::domain::contact::{Channel, ContactMessage, DeliveryResult};
use crate::domain::foundation::ValidationError;
use crate::ports::{ChannelError, NotificationChannel};

/// Errors surfaced by [`Notifier::send`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// Required form field missing or blank.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No channel has credentials configured.
    #[error("no notification channel is configured")]
    ServiceUnavailable,

    /// Every configured channel was attempted and failed.
    #[error("all delivery channels failed")]
    DeliveryFailed,
}

/// Callback for observing individual channel attempts.
pub trait DeliveryObserver: Send + Sync {
    /// Called when a channel delivered the message.
    fn on_delivered(&self, result: &DeliveryResult);

    /// Called when a channel attempt failed.
    fn on_channel_failed(&self, channel: Channel, error: &ChannelError);
}

/// No-op observer for when attempt tracking isn't needed.
#[derive(Debug, Clone, Copy)]
pub struct NoOpObserver;

impl DeliveryObserver for NoOpObserver {
    fn on_delivered(&self, _result: &DeliveryResult) {}
    fn on_channel_failed(&self, _channel: Channel, _error: &ChannelError) {}
}

/// Contact message notifier with primary/secondary fallback.
#[derive(Clone)]
pub struct Notifier {
    primary: Option<Arc<dyn NotificationChannel>>,
    secondary: Option<Arc<dyn NotificationChannel>>,
    observer: Arc<dyn DeliveryObserver>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    /// Creates a notifier with no channels configured.
    pub fn new() -> Self {
        Self {
            primary: None,
            secondary: None,
            observer: Arc::new(NoOpObserver),
        }
    }

    /// Sets the primary (chat) channel.
    pub fn with_primary(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.primary = Some(channel);
        self
    }

    /// Sets the secondary (email) channel.
    pub fn with_secondary(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.secondary = Some(channel);
        self
    }

    /// Sets the observer for attempt callbacks.
    pub fn with_observer(mut self, observer: Arc<dyn DeliveryObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Whether the given channel has been configured.
    pub fn is_configured(&self, channel: Channel) -> bool {
        match channel {
            Channel::Primary => self.primary.is_some(),
            Channel::Secondary => self.secondary.is_some(),
        }
    }

    /// Validates the raw submission and delivers it.
    ///
    /// # Errors
    ///
    /// - `Validation` if name or message is blank (no channel is called)
    /// - `ServiceUnavailable` if no channel is configured
    /// - `DeliveryFailed` if every configured channel failed
    pub async fn send(
        &self,
        visitor_name: &str,
        message: &str,
        visitor_email: Option<&str>,
    ) -> Result<DeliveryResult, NotifyError> {
        let contact = ContactMessage::new(visitor_name, message, visitor_email)?;
        self.deliver(&contact).await
    }

    /// Delivers an already validated message.
    pub async fn deliver(&self, contact: &ContactMessage) -> Result<DeliveryResult, NotifyError> {
        if self.primary.is_none() && self.secondary.is_none() {
            tracing::warn!("Contact message rejected: no notification channel configured");
            return Err(NotifyError::ServiceUnavailable);
        }

        let ranked = [(Channel::Primary, &self.primary), (Channel::Secondary, &self.secondary)];

        for (rank, channel) in ranked {
            let Some(channel) = channel else { continue };

            match channel.deliver(contact).await {
                Ok(id) => {
                    tracing::info!(channel = %rank, sid = %id, "Contact message delivered");
                    let result = DeliveryResult::new(rank, id);
                    self.observer.on_delivered(&result);
                    return Ok(result);
                }
                Err(err) => {
                    tracing::warn!(channel = %rank, error = %err, "Delivery attempt failed");
                    self.observer.on_channel_failed(rank, &err);
                }
            }
        }

        tracing::error!("All delivery channels failed");
        Err(NotifyError::DeliveryFailed)
    }
}
