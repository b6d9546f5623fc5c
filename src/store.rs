//! Conversation message log
//!
//! An append-only, in-memory record of everything said in the session.
//! Messages are never edited or removed; insertion order is display order.

use crate::client::ChatReply;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// The local user
    User,
    /// The assistant backend
    Assistant,
}

/// Message kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessageKind {
    /// An ordinary conversation message
    #[default]
    Normal,
    /// A locally synthesized failure notice; never sent to the backend
    Error,
}

/// Structured annotation attached to assistant replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyMetadata {
    /// Number of matched products, when the backend ran a search
    pub products_found: Option<u32>,
    /// Classification of the query, shape defined by the backend
    pub classification: Option<serde_json::Value>,
}

impl ReplyMetadata {
    /// Extract metadata from a chat reply, if it carries any
    pub fn from_reply(reply: &ChatReply) -> Option<Self> {
        if reply.products_found.is_none() && reply.classification.is_none() {
            return None;
        }
        Some(Self {
            products_found: reply.products_found,
            classification: reply.classification.clone(),
        })
    }
}

/// One entry in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message id (unique within the session)
    pub id: String,
    /// Displayed content
    pub text: String,
    /// Message author
    pub sender: Sender,
    /// Creation time in Unix milliseconds, immutable once set
    pub timestamp: i64,
    /// Normal or locally synthesized error
    #[serde(default)]
    pub kind: MessageKind,
    /// Assistant-only structured annotation, attached at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReplyMetadata>,
}

impl Message {
    fn new(text: String, sender: Sender, kind: MessageKind, metadata: Option<ReplyMetadata>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            sender,
            timestamp: Utc::now().timestamp_millis(),
            kind,
            metadata,
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::User, MessageKind::Normal, None)
    }

    /// Create an assistant message, with whatever metadata the reply carried
    pub fn assistant(text: impl Into<String>, metadata: Option<ReplyMetadata>) -> Self {
        Self::new(text.into(), Sender::Assistant, MessageKind::Normal, metadata)
    }

    /// Create a locally synthesized error message
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::Assistant, MessageKind::Error, None)
    }

    /// Whether this is a locally synthesized error notice
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// Append-only conversation store
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the end of the sequence
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The full ordered sequence, for rendering
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the conversation
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
