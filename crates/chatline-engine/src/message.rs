//! Chat messages shown in the log.
//!
//! Messages are transient UI state: they are created on submit or on a server
//! reply and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text of the transient entry shown while a reply is awaited.
pub const THINKING_TEXT: &str = "Thinking...";

/// Substituted when the reply has no usable `response` field.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong!";

/// Shown in place of a reply when the request itself failed.
pub const ERROR_REPLY: &str = "Sorry, there was an issue processing your request. 🤖";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// The person typing into the input field.
    User,
    /// The chat backend.
    Bot,
}

/// What a message represents in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Ordinary user input or bot reply.
    #[default]
    Text,
    /// "Thinking..." entry, removed once the reply is known.
    Placeholder,
    /// Fixed notice rendered when a request failed.
    Error,
}

/// Stable identifier of a message within one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

/// A single entry in the message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier assigned by the log.
    pub id: MessageId,
    /// Author of the message.
    pub author: Author,
    /// Kind of entry.
    #[serde(default)]
    pub kind: MessageKind,
    /// Message text, displayed verbatim.
    pub text: String,
    /// When the message was appended.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(id: MessageId, author: Author, kind: MessageKind, text: String) -> Self {
        Self {
            id,
            author,
            kind,
            text,
            timestamp: Utc::now(),
        }
    }

    /// Whether this is the transient thinking entry.
    pub fn is_placeholder(&self) -> bool {
        self.kind == MessageKind::Placeholder
    }

    /// Whether this is the fixed request-failure notice.
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}
