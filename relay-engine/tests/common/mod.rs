//! Mock implementation of [`relay_core::RelayClient`] for integration tests.
//!
//! Records every forward and send call so tests can assert on destinations,
//! reply threading, and options without hitting a real platform. Destinations
//! can be marked failing, hanging, or miscounting to exercise error paths.

#![allow(dead_code)]

use async_trait::async_trait;
use relay_core::{
    ForwardResult, Message, RelayClient, RelayError, Result, SendTextOptions, SentMessage,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// One recorded `forward_message(to, from, message_id)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardRecord {
    pub to_chat_id: i64,
    pub from_chat_id: i64,
    pub message_id: i64,
}

/// One recorded `send_text(chat, text, options)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRecord {
    pub chat_id: i64,
    pub text: String,
    pub reply_to: Option<i64>,
    pub disable_link_preview: bool,
    pub clear_draft: bool,
}

/// Recording mock client. Successful calls return message ids from a counter
/// starting at 1000, so tests can predict ids in call order.
pub struct MockClient {
    next_id: AtomicI64,
    forwards: Mutex<Vec<ForwardRecord>>,
    sends: Mutex<Vec<SendRecord>>,
    messages: Mutex<HashMap<(i64, i64), Message>>,
    failing: Mutex<HashSet<i64>>,
    miscounting: Mutex<HashSet<i64>>,
    empty_results: Mutex<HashSet<i64>>,
    hanging: Mutex<HashSet<i64>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1000),
            forwards: Mutex::new(Vec::new()),
            sends: Mutex::new(Vec::new()),
            messages: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            miscounting: Mutex::new(HashSet::new()),
            empty_results: Mutex::new(HashSet::new()),
            hanging: Mutex::new(HashSet::new()),
        }
    }

    /// Makes the given message fetchable via `fetch_message`.
    pub fn insert_message(&self, message: Message) {
        self.messages
            .lock()
            .unwrap()
            .insert((message.chat_id, message.id), message);
    }

    /// Every forward or send to this chat fails.
    pub fn fail_destination(&self, chat_id: i64) {
        self.failing.lock().unwrap().insert(chat_id);
    }

    /// Forwards to this chat report total_count 2 instead of 1.
    pub fn miscount_destination(&self, chat_id: i64) {
        self.miscounting.lock().unwrap().insert(chat_id);
    }

    /// Forwards to this chat report total_count 1 but carry no message ids.
    pub fn empty_result_destination(&self, chat_id: i64) {
        self.empty_results.lock().unwrap().insert(chat_id);
    }

    /// Every forward or send to this chat hangs far longer than any test timeout.
    pub fn hang_destination(&self, chat_id: i64) {
        self.hanging.lock().unwrap().insert(chat_id);
    }

    pub fn forwards(&self) -> Vec<ForwardRecord> {
        self.forwards.lock().unwrap().clone()
    }

    pub fn sends(&self) -> Vec<SendRecord> {
        self.sends.lock().unwrap().clone()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn check_destination(&self, chat_id: i64, what: &str) -> Result<()> {
        if self.hanging.lock().unwrap().contains(&chat_id) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing.lock().unwrap().contains(&chat_id) {
            return Err(RelayError::Client(format!(
                "mock {} failure for chat {}",
                what, chat_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RelayClient for MockClient {
    async fn fetch_message(&self, chat_id: i64, message_id: i64) -> Result<Message> {
        self.messages
            .lock()
            .unwrap()
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
        self.check_destination(chat_id, "send").await?;
        self.sends.lock().unwrap().push(SendRecord {
            chat_id,
            text: text.to_string(),
            reply_to: options.reply_to,
            disable_link_preview: options.disable_link_preview,
            clear_draft: options.clear_draft,
        });
        Ok(SentMessage {
            chat_id,
            id: self.allocate_id(),
        })
    }

    async fn forward_message(
        &self,
        to_chat_id: i64,
        from_chat_id: i64,
        message_id: i64,
    ) -> Result<ForwardResult> {
        self.check_destination(to_chat_id, "forward").await?;
        if self.miscounting.lock().unwrap().contains(&to_chat_id) {
            return Ok(ForwardResult {
                total_count: 2,
                message_ids: vec![self.allocate_id(), self.allocate_id()],
            });
        }
        if self.empty_results.lock().unwrap().contains(&to_chat_id) {
            return Ok(ForwardResult {
                total_count: 1,
                message_ids: Vec::new(),
            });
        }
        self.forwards.lock().unwrap().push(ForwardRecord {
            to_chat_id,
            from_chat_id,
            message_id,
        });
        Ok(ForwardResult {
            total_count: 1,
            message_ids: vec![self.allocate_id()],
        })
    }
}
