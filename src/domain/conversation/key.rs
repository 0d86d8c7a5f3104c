//! Visitor identity resolution for conversation threads.
//!
//! A thread is found by one of two unique keys: the `conversationId`
//! derived from the contact form (email, or normalized name) or the visitor's
//! bare phone number reported by the WhatsApp webhook.

use std::str::FromStr;

use crate::domain::foundation::{ConversationId, Timestamp, ValidationError};

/// Address prefix Twilio puts on WhatsApp numbers.
pub const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Unique key an upsert resolves against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConversationKey {
    /// Key derived from the contact form submission.
    ConversationId(String),
    /// Bare visitor phone number.
    Phone(String),
}

impl ConversationKey {
    /// Key for a contact form submission.
    pub fn from_contact(visitor_name: &str, visitor_email: Option<&str>) -> Self {
        ConversationKey::ConversationId(derive_conversation_key(visitor_name, visitor_email))
    }

    /// Key for a WhatsApp address, prefix stripped.
    pub fn from_whatsapp_address(address: &str) -> Self {
        ConversationKey::Phone(strip_whatsapp_prefix(address))
    }
}

/// How an operator addresses an existing conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationRef {
    Id(ConversationId),
    Key(String),
}

impl FromStr for ConversationRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::empty_field("conversationId"));
        }
        Ok(match s.parse::<ConversationId>() {
            Ok(id) => ConversationRef::Id(id),
            Err(_) => ConversationRef::Key(s.to_string()),
        })
    }
}

/// Field updates applied when a message is upserted.
///
/// `None` leaves the stored value untouched. `updatedAt` is always refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorPatch {
    pub visitor_name: Option<String>,
    pub visitor_email: Option<String>,
    pub visitor_phone: Option<String>,
    pub updated_at: Option<Timestamp>,
}

impl VisitorPatch {
    pub fn contact(visitor_name: impl Into<String>, visitor_email: Option<String>) -> Self {
        Self {
            visitor_name: Some(visitor_name.into()),
            visitor_email,
            updated_at: Some(Timestamp::now()),
            ..Default::default()
        }
    }

    pub fn phone(visitor_phone: impl Into<String>) -> Self {
        Self {
            visitor_phone: Some(visitor_phone.into()),
            updated_at: Some(Timestamp::now()),
            ..Default::default()
        }
    }
}

/// Visitor email when present, otherwise the name with whitespace runs
/// collapsed to `_` and lowercased.
pub fn derive_conversation_key(visitor_name: &str, visitor_email: Option<&str>) -> String {
    if let Some(email) = visitor_email.map(str::trim).filter(|e| !e.is_empty()) {
        return email.to_string();
    }
    visitor_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Removes the `whatsapp:` address prefix, if any.
pub fn strip_whatsapp_prefix(address: &str) -> String {
    let address = address.trim();
    address
        .strip_prefix(WHATSAPP_PREFIX)
        .unwrap_or(address)
        .trim()
        .to_string()
}

/// Outbound WhatsApp address for a bare phone number.
pub fn whatsapp_address(phone: &str) -> String {
    format!("{}{}", WHATSAPP_PREFIX, strip_whatsapp_prefix(phone))
}
