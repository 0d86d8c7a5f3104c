//! Messages within a conversation thread.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Visitor,
    Owner,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Visitor => "visitor",
            Sender::Owner => "owner",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visitor" => Ok(Sender::Visitor),
            "owner" => Ok(Sender::Owner),
            other => Err(ValidationError::invalid_format(
                "sender",
                format!("unknown sender '{}'", other),
            )),
        }
    }
}

/// A single message in a thread. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: Timestamp,
    /// Provider identifier (Twilio SID or email Message-ID) for delivery audit.
    pub provider_message_id: Option<String>,
}

impl Message {
    /// Message from the visitor, stamped now.
    pub fn visitor(text: impl Into<String>, provider_message_id: Option<String>) -> Self {
        Self {
            sender: Sender::Visitor,
            text: text.into(),
            timestamp: Timestamp::now(),
            provider_message_id,
        }
    }

    /// Reply from the site owner, stamped now.
    pub fn owner(text: impl Into<String>, provider_message_id: Option<String>) -> Self {
        Self {
            sender: Sender::Owner,
            text: text.into(),
            timestamp: Timestamp::now(),
            provider_message_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_parses_known_values() {
        assert_eq!("visitor".parse::<Sender>().unwrap(), Sender::Visitor);
        assert_eq!("owner".parse::<Sender>().unwrap(), Sender::Owner);
        assert!("admin".parse::<Sender>().is_err());
    }

    #[test]
    fn constructors_set_sender() {
        assert_eq!(Message::visitor("hi", None).sender, Sender::Visitor);
        let reply = Message::owner("hello", Some("SM1".to_string()));
        assert_eq!(reply.sender, Sender::Owner);
        assert_eq!(reply.provider_message_id.as_deref(), Some("SM1"));
    }
}
