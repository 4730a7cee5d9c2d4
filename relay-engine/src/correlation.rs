//! Correlation store: links an original message to its forwarded copy per destination.
//!
//! Each key holds only the current copy's id. A later put for the same key (a
//! resend after an edit) overwrites the previous value; history is not kept.
//!
//! The store is read and mutated only from the single event-processing task, so
//! it is a plain map with no interior locking.

use std::collections::HashMap;

/// Identifies one forwarded linkage: which source message went to which destination chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationKey {
    pub source_chat: i64,
    pub source_message: i64,
    pub destination_chat: i64,
}

/// In-memory map from [`CorrelationKey`] to the destination message id.
/// Lives for the process lifetime; entries are never removed.
#[derive(Debug, Default)]
pub struct CorrelationStore {
    entries: HashMap<CorrelationKey, i64>,
}

impl CorrelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional upsert.
    pub fn put(&mut self, key: CorrelationKey, destination_message: i64) {
        self.entries.insert(key, destination_message);
    }

    /// Current destination message id for this key. `None` is an expected outcome
    /// (first forward, or an edit of a message never forwarded to that destination).
    pub fn get(&self, key: &CorrelationKey) -> Option<i64> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
