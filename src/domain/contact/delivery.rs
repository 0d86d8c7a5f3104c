//! Delivery outcome types shared by the notifier and the HTTP layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ranked outbound notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// WhatsApp message through the telephony API.
    Primary,
    /// Transactional email.
    Secondary,
}

impl Channel {
    /// Delivery method name exposed on the wire (`whatsapp` / `email`).
    pub fn method(&self) -> &'static str {
        match self {
            Channel::Primary => "whatsapp",
            Channel::Secondary => "email",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Successful delivery of a contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    pub channel: Channel,
    pub provider_message_id: String,
}

impl DeliveryResult {
    pub fn new(channel: Channel, provider_message_id: impl Into<String>) -> Self {
        Self {
            channel,
            provider_message_id: provider_message_id.into(),
        }
    }
}
