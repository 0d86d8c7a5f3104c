//! Secondary channel: email to the site owner.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::contact::{Channel, ContactMessage};
use crate::ports::{ChannelError, MailSender, NotificationChannel, OutboundEmail};

/// Delivers contact messages to the owner's inbox, with reply-to set to the
/// visitor when they left an address.
pub struct EmailChannel {
    mailer: Arc<dyn MailSender>,
    owner_email: String,
}

impl EmailChannel {
    pub fn new(mailer: Arc<dyn MailSender>, owner_email: impl Into<String>) -> Self {
        Self {
            mailer,
            owner_email: owner_email.into(),
        }
    }

    fn compose(&self, message: &ContactMessage) -> OutboundEmail {
        OutboundEmail {
            to: self.owner_email.clone(),
            reply_to: message.visitor_email().map(str::to_string),
            subject: message.email_subject(),
            html_body: message.email_html(),
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn kind(&self) -> Channel {
        Channel::Secondary
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<String, ChannelError> {
        self.mailer.send_mail(self.compose(message)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::messaging::MockMailSender;

    #[tokio::test]
    async fn composes_email_for_owner() {
        let mailer = MockMailSender::new().with_message_id("<abc@x>");
        let channel = EmailChannel::new(Arc::new(mailer.clone()), "owner@x.com");
        let contact = ContactMessage::new("Alice", "Hi there", Some("a@x.com")).unwrap();

        let id = channel.deliver(&contact).await.unwrap();

        assert_eq!(id, "<abc@x>");
        let sent = mailer.sent();
        assert_eq!(sent[0].to, "owner@x.com");
        assert_eq!(sent[0].reply_to.as_deref(), Some("a@x.com"));
        assert_eq!(sent[0].subject, "Portfolio Contact: Message from Alice");
        assert!(sent[0].html_body.contains("Hi there"));
    }

    #[tokio::test]
    async fn no_reply_to_without_visitor_email() {
        let mailer = MockMailSender::new();
        let channel = EmailChannel::new(Arc::new(mailer.clone()), "owner@x.com");
        let contact = ContactMessage::new("Bob", "Hello", None::<&str>).unwrap();

        channel.deliver(&contact).await.unwrap();

        assert_eq!(mailer.sent()[0].reply_to, None);
    }
}
