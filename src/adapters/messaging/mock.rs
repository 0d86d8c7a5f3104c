//! Mock messaging adapters for testing.
//!
//! Scripted fakes for the messaging ports, allowing tests to run without
//! calling Twilio or an SMTP server.
//!
//! # Features
//!
//! - Pre-configured outcomes (consumed in order)
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let channel = MockChannel::new(Channel::Primary)
//!     .with_error(ChannelError::network("down"))
//!     .with_success("SM123");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::contact::{Channel, ContactMessage};
use crate::ports::{ChannelError, ChatSender, MailSender, NotificationChannel, OutboundEmail};

type Script = Arc<Mutex<VecDeque<Result<String, ChannelError>>>>;

fn next_outcome(script: &Script, default_id: impl FnOnce() -> String) -> Result<String, ChannelError> {
    script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Ok(default_id()))
}

/// Mock notification channel.
#[derive(Debug, Clone)]
pub struct MockChannel {
    kind: Channel,
    outcomes: Script,
    calls: Arc<Mutex<Vec<ContactMessage>>>,
}

impl MockChannel {
    /// Creates a mock that succeeds with a generated id once its script runs out.
    pub fn new(kind: Channel) -> Self {
        Self {
            kind,
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful delivery with the given provider id.
    pub fn with_success(self, id: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(id.into()));
        self
    }

    /// Queues a failed delivery.
    pub fn with_error(self, error: ChannelError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns the number of deliveries attempted.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all messages this channel was asked to deliver.
    pub fn calls(&self) -> Vec<ContactMessage> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for MockChannel {
    fn kind(&self) -> Channel {
        self.kind
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<String, ChannelError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(message.clone());
            calls.len()
        };
        next_outcome(&self.outcomes, || format!("mock-{}-{}", self.kind.method(), n))
    }
}

/// A chat message recorded by [`MockChatSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentChat {
    pub to: String,
    pub body: String,
}

/// Mock WhatsApp sender.
#[derive(Debug, Clone, Default)]
pub struct MockChatSender {
    outcomes: Script,
    sent: Arc<Mutex<Vec<SentChat>>>,
}

impl MockChatSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful send with the given SID.
    pub fn with_sid(self, sid: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(sid.into()));
        self
    }

    /// Queues a failed send.
    pub fn with_error(self, error: ChannelError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns all attempted sends.
    pub fn sent(&self) -> Vec<SentChat> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatSender for MockChatSender {
    async fn send_chat(&self, to: &str, body: &str) -> Result<String, ChannelError> {
        let n = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(SentChat {
                to: to.to_string(),
                body: body.to_string(),
            });
            sent.len()
        };
        next_outcome(&self.outcomes, || format!("SM{:032}", n))
    }
}

/// Mock mail transport.
#[derive(Debug, Clone, Default)]
pub struct MockMailSender {
    outcomes: Script,
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl MockMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful send with the given Message-ID.
    pub fn with_message_id(self, id: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(id.into()));
        self
    }

    /// Queues a failed send.
    pub fn with_error(self, error: ChannelError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns all attempted sends.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send_mail(&self, email: OutboundEmail) -> Result<String, ChannelError> {
        let n = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(email);
            sent.len()
        };
        next_outcome(&self.outcomes, || format!("<mock-{}@localhost>", n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactMessage {
        ContactMessage::new("Alice", "Hi", None::<&str>).unwrap()
    }

    #[tokio::test]
    async fn mock_channel_returns_outcomes_in_order() {
        let channel = MockChannel::new(Channel::Primary)
            .with_error(ChannelError::AuthenticationFailed)
            .with_success("SM2");

        assert!(channel.deliver(&contact()).await.is_err());
        assert_eq!(channel.deliver(&contact()).await.unwrap(), "SM2");
        assert_eq!(channel.deliver(&contact()).await.unwrap(), "mock-whatsapp-3");
        assert_eq!(channel.call_count(), 3);
    }

    #[tokio::test]
    async fn mock_chat_sender_records_recipient() {
        let sender = MockChatSender::new().with_sid("SM1");

        let sid = sender.send_chat("whatsapp:+1555", "hello").await.unwrap();

        assert_eq!(sid, "SM1");
        assert_eq!(
            sender.sent(),
            vec![SentChat {
                to: "whatsapp:+1555".to_string(),
                body: "hello".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn mock_mail_sender_defaults_to_generated_id() {
        let mailer = MockMailSender::new();
        let email = OutboundEmail {
            to: "owner@x.com".to_string(),
            reply_to: None,
            subject: "s".to_string(),
            html_body: "<p>b</p>".to_string(),
        };

        let id = mailer.send_mail(email).await.unwrap();

        assert_eq!(id, "<mock-1@localhost>");
        assert_eq!(mailer.sent().len(), 1);
    }
}
