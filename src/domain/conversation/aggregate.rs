//! Conversation aggregate - one visitor's message thread.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::key::{ConversationKey, VisitorPatch};
use super::message::Message;
use crate::domain::foundation::{ConversationId, Timestamp, ValidationError};

/// Whether the owner still considers the thread active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    #[default]
    Open,
    Closed,
}

impl ConversationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStatus::Open => "open",
            ConversationStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ConversationStatus::Open),
            "closed" => Ok(ConversationStatus::Closed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// A persisted thread of messages tied to one visitor identity.
///
/// Messages are append-only; `updated_at` moves forward on every append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    id: ConversationId,
    conversation_key: Option<String>,
    visitor_name: Option<String>,
    visitor_email: Option<String>,
    visitor_phone: Option<String>,
    messages: Vec<Message>,
    status: ConversationStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Conversation {
    /// Starts an empty open thread for the given key.
    pub fn open(key: &ConversationKey) -> Self {
        let now = Timestamp::now();
        let (conversation_key, visitor_phone) = match key {
            ConversationKey::ConversationId(k) => (Some(k.clone()), None),
            ConversationKey::Phone(p) => (None, Some(p.clone())),
        };
        Self {
            id: ConversationId::new(),
            conversation_key,
            visitor_name: None,
            visitor_email: None,
            visitor_phone,
            messages: Vec::new(),
            status: ConversationStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a conversation from storage.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ConversationId,
        conversation_key: Option<String>,
        visitor_name: Option<String>,
        visitor_email: Option<String>,
        visitor_phone: Option<String>,
        messages: Vec<Message>,
        status: ConversationStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            conversation_key,
            visitor_name,
            visitor_email,
            visitor_phone,
            messages,
            status,
            created_at,
            updated_at,
        }
    }

    /// Whether this thread is the one the key resolves to.
    pub fn matches(&self, key: &ConversationKey) -> bool {
        match key {
            ConversationKey::ConversationId(k) => self.conversation_key.as_deref() == Some(k),
            ConversationKey::Phone(p) => self.visitor_phone.as_deref() == Some(p),
        }
    }

    /// Applies set-if-present field updates.
    pub fn apply_patch(&mut self, patch: &VisitorPatch) {
        if let Some(name) = &patch.visitor_name {
            self.visitor_name = Some(name.clone());
        }
        if let Some(email) = &patch.visitor_email {
            self.visitor_email = Some(email.clone());
        }
        if let Some(phone) = &patch.visitor_phone {
            self.visitor_phone = Some(phone.clone());
        }
        self.touch(patch.updated_at.unwrap_or_else(Timestamp::now));
    }

    /// Appends a message and refreshes `updated_at`.
    pub fn append(&mut self, message: Message) {
        let at = message.timestamp;
        self.messages.push(message);
        self.touch(at);
    }

    fn touch(&mut self, at: Timestamp) {
        if at.is_after(&self.updated_at) {
            self.updated_at = at;
        }
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn conversation_key(&self) -> Option<&str> {
        self.conversation_key.as_deref()
    }

    pub fn visitor_name(&self) -> Option<&str> {
        self.visitor_name.as_deref()
    }

    pub fn visitor_email(&self) -> Option<&str> {
        self.visitor_email.as_deref()
    }

    pub fn visitor_phone(&self) -> Option<&str> {
        self.visitor_phone.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
