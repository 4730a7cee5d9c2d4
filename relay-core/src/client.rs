//! Client abstraction for the messaging platform.
//!
//! [`RelayClient`] is transport-agnostic; relay-telegram implements it via teloxide.

use crate::error::Result;
use crate::types::Message;
use async_trait::async_trait;

/// Options for [`RelayClient::send_text`].
#[derive(Debug, Clone, Default)]
pub struct SendTextOptions {
    /// Suppress link-preview expansion in the destination.
    pub disable_link_preview: bool,
    /// Clear any compose draft in the destination chat. Transports without
    /// a draft concept accept and ignore this.
    pub clear_draft: bool,
    /// Message id in the destination chat to thread onto, if any.
    pub reply_to: Option<i64>,
}

/// Identifiers of a message the client just sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub id: i64,
}

/// Result of a forward operation. The platform may batch; the relay always
/// requests exactly one message and treats any other count as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardResult {
    pub total_count: usize,
    pub message_ids: Vec<i64>,
}

/// Abstraction over the platform operations the relay needs. Implementations map to
/// a transport (e.g. Telegram).
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Fetches the current body of a message by (chat, id).
    async fn fetch_message(&self, chat_id: i64, message_id: i64) -> Result<Message>;

    /// Sends a plain text message to the given chat.
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendTextOptions,
    ) -> Result<SentMessage>;

    /// Copies one message into `to_chat_id` as a fresh message (send-as-copy, immediate
    /// scheduling), so later resends can reply-thread onto it.
    async fn forward_message(
        &self,
        to_chat_id: i64,
        from_chat_id: i64,
        message_id: i64,
    ) -> Result<ForwardResult>;
}
