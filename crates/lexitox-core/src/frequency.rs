//! Word frequency table.
//!
//! A fixed-size chained hash table keyed by normalized word. The bucket
//! array never grows and never rehashes; capacity is bounded by
//! [`MAX_WORDS`] distinct entries; further unique words are dropped.
//!
//! Chains live in an arena (`Vec<Node>`) and link by index, with new nodes
//! prepended to their bucket. [`FrequencyTable::export`] walks buckets in
//! index order and each chain head-first, so export order is deterministic
//! for a given insertion sequence.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of hash buckets (prime).
pub const HASH_TABLE_SIZE: usize = 10_007;

/// Maximum number of distinct words tracked per analysis.
pub const MAX_WORDS: usize = 10_000;

/// A normalized word and its occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordEntry {
    /// Normalized word (lowercase ASCII alphanumerics).
    pub word: String,
    /// Number of occurrences (always at least 1).
    pub frequency: usize,
}

/// What happened to a word passed to [`FrequencyTable::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The word was already present; its count went up.
    Incremented,
    /// The word was new and got an entry with count 1.
    Created,
    /// The word was new but the table was full.
    Dropped,
}

/// Polynomial hash (`h = h * 31 + byte`) reduced modulo [`HASH_TABLE_SIZE`].
pub fn hash_word(word: &str) -> usize {
    let hash = word
        .bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)));
    hash as usize % HASH_TABLE_SIZE
}

#[derive(Debug)]
struct Node {
    entry: WordEntry,
    next: Option<usize>,
}

/// Fixed-bucket chained hash map from word to count.
#[derive(Debug)]
pub struct FrequencyTable {
    buckets: Vec<Option<usize>>,
    nodes: Vec<Node>,
    capacity: usize,
    dropped: usize,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// Create an empty table holding up to [`MAX_WORDS`] distinct words.
    pub fn new() -> Self {
        Self::with_capacity(MAX_WORDS)
    }

    /// Create an empty table holding up to `capacity` distinct words.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: vec![None; HASH_TABLE_SIZE],
            nodes: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Count one occurrence of `word`.
    pub fn insert(&mut self, word: &str) -> Insertion {
        let index = hash_word(word);

        let mut cursor = self.buckets[index];
        while let Some(node_id) = cursor {
            let node = &mut self.nodes[node_id];
            if node.entry.word == word {
                node.entry.frequency += 1;
                return Insertion::Incremented;
            }
            cursor = node.next;
        }

        if self.nodes.len() >= self.capacity {
            self.dropped += 1;
            return Insertion::Dropped;
        }

        self.nodes.push(Node {
            entry: WordEntry {
                word: word.to_string(),
                frequency: 1,
            },
            next: self.buckets[index],
        });
        self.buckets[index] = Some(self.nodes.len() - 1);
        Insertion::Created
    }

    /// Current count for `word`, if present.
    pub fn get(&self, word: &str) -> Option<usize> {
        let mut cursor = self.buckets[hash_word(word)];
        while let Some(node_id) = cursor {
            let node = &self.nodes[node_id];
            if node.entry.word == word {
                return Some(node.entry.frequency);
            }
            cursor = node.next;
        }
        None
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no word has been stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of insert attempts rejected because the table was full.
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Consume the table, returning every entry in bucket order.
    pub fn export(self) -> Vec<WordEntry> {
        let mut slots: Vec<Option<Node>> = self.nodes.into_iter().map(Some).collect();
        let mut entries = Vec::with_capacity(slots.len());

        for head in self.buckets {
            let mut cursor = head;
            while let Some(node_id) = cursor {
                let Some(node) = slots[node_id].take() else {
                    break;
                };
                cursor = node.next;
                entries.push(node.entry);
            }
        }

        entries
    }
}
