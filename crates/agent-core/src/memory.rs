//! Bounded interaction memory

use serde_json::Value;
use std::collections::VecDeque;
use tracing::debug;

/// Memory bound used when the config does not set one
pub const DEFAULT_MAX_MEMORY: usize = 100;

/// Number of entries `recall` returns by default
pub const DEFAULT_RECALL_LIMIT: usize = 10;

/// Insertion-ordered log of interaction records with a fixed capacity
///
/// Every append that pushes the log past `max_memory` drops exactly one
/// entry from the head, so `len() <= max_memory()` holds after any call.
/// Entries are opaque JSON records.
#[derive(Debug, Clone)]
pub struct MemoryLog {
    entries: VecDeque<Value>,
    max_memory: usize,
}

impl Default for MemoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MEMORY)
    }
}

impl MemoryLog {
    /// Create an empty log holding at most `max_memory` entries
    pub fn new(max_memory: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_memory,
        }
    }

    /// Append an entry, evicting the oldest one if the bound is exceeded
    pub fn append(&mut self, entry: Value) {
        self.entries.push_back(entry);
        if self.entries.len() > self.max_memory {
            self.entries.pop_front();
            debug!(max_memory = self.max_memory, "Evicted oldest memory entry");
        }
    }

    /// The last `limit` entries in insertion order
    pub fn recent(&self, limit: usize) -> Vec<Value> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Iterate over all entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter()
    }

    /// Configured capacity
    pub fn max_memory(&self) -> usize {
        self.max_memory
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
