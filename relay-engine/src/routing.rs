//! Routing rules: which source chats forward to which destinations.
//!
//! Rules are a list, not a map: several rules may share a source, and every
//! matching rule applies independently.

use serde::{Deserialize, Serialize};

/// One routing rule: messages from `source` are forwarded to each of `destinations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    pub source: i64,
    pub destinations: Vec<i64>,
}

/// Ordered rule list, immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    rules: Vec<RoutingRule>,
}

impl RoutingTable {
    pub fn new(rules: Vec<RoutingRule>) -> Self {
        Self { rules }
    }

    /// Every rule whose source equals `source`, in rule order. Empty when nothing matches.
    pub fn matches(&self, source: i64) -> impl Iterator<Item = &RoutingRule> {
        self.rules.iter().filter(move |rule| rule.source == source)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
