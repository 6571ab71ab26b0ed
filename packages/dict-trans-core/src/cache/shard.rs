//! Code table for a single named dictionary.

use std::collections::HashMap;

use super::entry::DictEntry;

/// A resolved code within a shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardEntry {
    /// Code
    pub code: String,
    /// Meaning
    pub meaning: String,
    /// Presentation order (defaulted to -1 at ingestion)
    pub sort_num: i32,
    /// Input position of the record that produced this entry
    seq: usize,
}

/// Immutable `code -> meaning` table for one dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictShard {
    entries: HashMap<String, ShardEntry>,
}

impl DictShard {
    /// Builds a shard from one dictionary's records in input order.
    ///
    /// When a code repeats, the later record wins.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a DictEntry>,
    {
        let iter = entries.into_iter();
        let mut map = HashMap::with_capacity(iter.size_hint().0);
        for (seq, entry) in iter.enumerate() {
            map.insert(
                entry.code.clone(),
                ShardEntry {
                    code: entry.code.clone(),
                    meaning: entry.meaning.clone(),
                    sort_num: entry.sort_num_or_default(),
                    seq,
                },
            );
        }
        Self { entries: map }
    }

    /// Returns the entry for a code.
    pub fn get(&self, code: &str) -> Option<&ShardEntry> {
        self.entries.get(code)
    }

    /// Returns the meaning for a code.
    pub fn meaning(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(|e| e.meaning.as_str())
    }

    /// Returns `true` if the code is present.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the shard holds no codes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered for display: by sort number, then by input position.
    pub fn sorted_entries(&self) -> Vec<&ShardEntry> {
        let mut entries: Vec<&ShardEntry> = self.entries.values().collect();
        entries.sort_by_key(|e| (e.sort_num, e.seq));
        entries
    }
}
