//! [`RelayClient`] over the Telegram Bot API.
//!
//! `forward_message` maps to copyMessage (send-as-copy, immediate). The Bot API
//! cannot fetch arbitrary messages, so `fetch_message` is served from a bounded
//! cache of message bodies observed on the update stream; the listener records
//! every edited body before emitting its event. The Bot API has no compose
//! drafts, so `clear_draft` is accepted and ignored.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use relay_core::{
    ForwardResult, Message, RelayClient, RelayError, Result, SendTextOptions, SentMessage,
};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, LinkPreviewOptions, MessageId, ReplyParameters};

const SEEN_CACHE_CAPACITY: usize = 1024;

/// Teloxide-based implementation of [`RelayClient`].
pub struct TelegramRelayClient {
    bot: teloxide::Bot,
    seen: Mutex<SeenCache>,
}

/// FIFO-bounded map of message bodies keyed by (chat, message id).
struct SeenCache {
    capacity: usize,
    order: VecDeque<(i64, i64)>,
    bodies: HashMap<(i64, i64), Message>,
}

impl SeenCache {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            bodies: HashMap::new(),
        }
    }

    fn remember(&mut self, message: Message) {
        let key = (message.chat_id, message.id);
        if self.bodies.insert(key, message).is_none() {
            self.order.push_back(key);
            if self.order.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.bodies.remove(&oldest);
                }
            }
        }
    }
}

impl TelegramRelayClient {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self::with_cache_capacity(bot, SEEN_CACHE_CAPACITY)
    }

    fn with_cache_capacity(bot: teloxide::Bot, capacity: usize) -> Self {
        Self {
            bot,
            seen: Mutex::new(SeenCache::with_capacity(capacity)),
        }
    }

    /// Records a message body so a later `fetch_message` can return it.
    pub fn remember(&self, message: Message) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.remember(message);
        }
    }
}

#[async_trait]
impl RelayClient for TelegramRelayClient {
    async fn fetch_message(&self, chat_id: i64, message_id: i64) -> Result<Message> {
        let seen = self
            .seen
            .lock()
            .map_err(|_| RelayError::Client("seen cache lock poisoned".to_string()))?;
        seen.bodies
            .get(&(chat_id, message_id))
            .cloned()
            .ok_or(RelayError::MessageNotFound {
                chat_id,
                message_id,
            })
    }

    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendTextOptions,
    ) -> Result<SentMessage> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if options.disable_link_preview {
            request = request.link_preview_options(LinkPreviewOptions {
                is_disabled: true,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            });
        }
        if let Some(reply_to) = options.reply_to {
            request = request.reply_parameters(ReplyParameters::new(MessageId(reply_to as i32)));
        }
        let sent = request
            .await
            .map_err(|e| RelayError::Client(e.to_string()))?;
        Ok(SentMessage {
            chat_id: sent.chat.id.0,
            id: sent.id.0 as i64,
        })
    }

    async fn forward_message(
        &self,
        to_chat_id: i64,
        from_chat_id: i64,
        message_id: i64,
    ) -> Result<ForwardResult> {
        let copied = self
            .bot
            .copy_message(
                ChatId(to_chat_id),
                ChatId(from_chat_id),
                MessageId(message_id as i32),
            )
            .await
            .map_err(|e| RelayError::Client(e.to_string()))?;
        Ok(ForwardResult {
            total_count: 1,
            message_ids: vec![copied.0 as i64],
        })
    }
}
