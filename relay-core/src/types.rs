//! Core types: message, content variants, and classified update events.

use serde::{Deserialize, Serialize};

/// A single message observed on the platform, reduced to what the relay needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Chat the message belongs to.
    pub chat_id: i64,
    /// Message id, unique within the chat.
    pub id: i64,
    pub content: MessageContent,
}

/// Forwardable content of a message. Only text-bearing variants carry a payload;
/// everything else lands in `Unsupported` with the content kind name for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    /// Plain text message body.
    Text(String),
    /// Caption of a media message (photo, video, document, ...).
    Caption(String),
    /// Any content kind the relay does not forward; the name is log-only.
    Unsupported(String),
}

impl MessageContent {
    /// Returns the text to resend on edit, if this content carries any.
    pub fn forwardable_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(body) => Some(body),
            MessageContent::Caption(caption) => Some(caption),
            MessageContent::Unsupported(_) => None,
        }
    }

    /// Content kind name for logging.
    pub fn kind(&self) -> &str {
        match self {
            MessageContent::Text(_) => "text",
            MessageContent::Caption(_) => "caption",
            MessageContent::Unsupported(kind) => kind,
        }
    }
}

/// A platform update classified for the relay. The transport adapter produces exactly
/// one variant per raw update; `Ignored` carries the update kind name and is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A freshly observed message, with its full body.
    NewMessage(Message),
    /// An existing message was edited; the body must be re-fetched.
    MessageEdited { chat_id: i64, message_id: i64 },
    /// Any other update kind; not processed.
    Ignored(String),
}
