//! Primary channel: WhatsApp message to the site owner.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::contact::{Channel, ContactMessage};
use crate::ports::{ChannelError, ChatSender, NotificationChannel};

/// Delivers contact messages to the owner's WhatsApp number.
pub struct WhatsAppChannel {
    sender: Arc<dyn ChatSender>,
    owner_address: String,
}

impl WhatsAppChannel {
    /// `owner_address` is the `whatsapp:`-prefixed destination.
    pub fn new(sender: Arc<dyn ChatSender>, owner_address: impl Into<String>) -> Self {
        Self {
            sender,
            owner_address: owner_address.into(),
        }
    }
}

#[async_trait]
impl NotificationChannel for WhatsAppChannel {
    fn kind(&self) -> Channel {
        Channel::Primary
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<String, ChannelError> {
        self.sender
            .send_chat(&self.owner_address, &message.chat_body())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::messaging::MockChatSender;

    #[tokio::test]
    async fn sends_formatted_body_to_owner() {
        let sender = MockChatSender::new().with_sid("SM42");
        let channel = WhatsAppChannel::new(Arc::new(sender.clone()), "whatsapp:+1999");
        let contact = ContactMessage::new("Alice", "Hi there", Some("a@x.com")).unwrap();

        let sid = channel.deliver(&contact).await.unwrap();

        assert_eq!(sid, "SM42");
        let sent = sender.sent();
        assert_eq!(sent[0].to, "whatsapp:+1999");
        assert_eq!(sent[0].body, contact.chat_body());
        assert_eq!(channel.kind(), Channel::Primary);
    }

    #[tokio::test]
    async fn propagates_sender_error() {
        let sender = MockChatSender::new().with_error(ChannelError::AuthenticationFailed);
        let channel = WhatsAppChannel::new(Arc::new(sender), "whatsapp:+1999");
        let contact = ContactMessage::new("Alice", "Hi", None::<&str>).unwrap();

        let err = channel.deliver(&contact).await.unwrap_err();

        assert_eq!(err, ChannelError::AuthenticationFailed);
    }
}
