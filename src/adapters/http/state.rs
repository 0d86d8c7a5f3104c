//! Shared application state.

use std::sync::Arc;

use crate::application::{
    ListConversationsHandler, Notifier, RecordContactMessageHandler, RecordInboundMessageHandler,
    ReplyToVisitorHandler, SendContactMessageHandler,
};
use crate::domain::contact::Channel;
use crate::ports::{ChatSender, ConversationStore};

use super::middleware::OperatorToken;

/// Shared application state containing all dependencies.
///
/// Cloned per request; every collaborator is behind an `Arc` and read-only
/// after startup. Handlers are created on demand from it.
#[derive(Clone)]
pub struct AppState {
    notifier: Notifier,
    store: Option<Arc<dyn ConversationStore>>,
    chat_sender: Option<Arc<dyn ChatSender>>,
    operator_token: OperatorToken,
}

impl AppState {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            store: None,
            chat_sender: None,
            operator_token: OperatorToken::default(),
        }
    }

    /// Enables conversation persistence.
    pub fn with_store(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Enables owner replies over WhatsApp.
    pub fn with_chat_sender(mut self, sender: Arc<dyn ChatSender>) -> Self {
        self.chat_sender = Some(sender);
        self
    }

    pub fn with_operator_token(mut self, token: OperatorToken) -> Self {
        self.operator_token = token;
        self
    }

    pub fn operator_token(&self) -> &OperatorToken {
        &self.operator_token
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn channel_ready(&self, channel: Channel) -> bool {
        self.notifier.is_configured(channel)
    }

    pub fn send_contact_handler(&self) -> SendContactMessageHandler {
        let handler = SendContactMessageHandler::new(self.notifier.clone());
        match &self.store {
            Some(store) => handler.with_recorder(RecordContactMessageHandler::new(store.clone())),
            None => handler,
        }
    }

    /// `None` when there is nowhere to record inbound messages.
    pub fn record_inbound_handler(&self) -> Option<RecordInboundMessageHandler> {
        self.store
            .as_ref()
            .map(|store| RecordInboundMessageHandler::new(store.clone()))
    }

    pub fn reply_handler(&self) -> ReplyToVisitorHandler {
        ReplyToVisitorHandler::new(self.store.clone(), self.chat_sender.clone())
    }

    pub fn list_conversations_handler(&self) -> ListConversationsHandler {
        ListConversationsHandler::new(self.store.clone())
    }
}
