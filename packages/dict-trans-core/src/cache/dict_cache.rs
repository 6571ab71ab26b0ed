//! Two-level dictionary store: dictionary name -> shard.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use super::entry::DictEntry;
use super::shard::{DictShard, ShardEntry};
use super::DictionaryLookup;
use crate::error::{DictError, Result};

/// Immutable collection of named dictionaries.
///
/// Built once from bulk input or by merging other caches. Shards are
/// reference counted, so merged caches share shard storage with their inputs.
#[derive(Debug, Clone, Default)]
pub struct DictCache {
    shards: HashMap<String, Arc<DictShard>>,
}

impl DictCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cache from records in input order.
    ///
    /// Records are grouped by dictionary name, keeping input order inside a
    /// group. Records without a dictionary name are dropped. Missing sort
    /// numbers default to -1.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DictEntry>,
    {
        let mut groups: HashMap<String, Vec<DictEntry>> = HashMap::new();
        let mut total = 0usize;
        let mut dropped = 0usize;

        for entry in entries {
            total += 1;
            if entry.dict_code.is_empty() {
                dropped += 1;
                continue;
            }
            groups.entry(entry.dict_code.clone()).or_default().push(entry);
        }

        if dropped > 0 {
            tracing::debug!("Dropped {} entries without a dictionary name", dropped);
        }

        let shards: HashMap<String, Arc<DictShard>> = groups
            .into_iter()
            .map(|(name, group)| (name, Arc::new(DictShard::from_entries(&group))))
            .collect();

        tracing::info!(
            "Built dictionary cache with {} dictionaries from {} entries",
            shards.len(),
            total
        );

        Self { shards }
    }

    /// Parses a JSON array of records and builds a cache from it.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Vec<DictEntry> = serde_json::from_reader(reader)?;
        Ok(Self::build(entries))
    }

    /// Parses a JSON array of records held in a string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<DictEntry> = serde_json::from_str(json)?;
        Ok(Self::build(entries))
    }

    /// Merges caches into a new one.
    ///
    /// `caches` is in descending priority: when a dictionary name appears in
    /// several inputs, the whole shard of the earliest input wins. Inputs are
    /// left untouched.
    pub fn merge<'a, I>(caches: I) -> Self
    where
        I: IntoIterator<Item = &'a DictCache>,
    {
        let mut shards: HashMap<String, Arc<DictShard>> = HashMap::new();
        let mut inputs = 0usize;
        for cache in caches {
            inputs += 1;
            for (name, shard) in &cache.shards {
                shards
                    .entry(name.clone())
                    .or_insert_with(|| Arc::clone(shard));
            }
        }

        tracing::info!(
            "Merged {} caches into {} dictionaries",
            inputs,
            shards.len()
        );

        Self { shards }
    }

    /// Looks up the meaning of a code.
    ///
    /// # Errors
    /// `UnknownDictionary` if the dictionary is absent, `UnknownCode` if the
    /// dictionary exists but the code does not.
    pub fn lookup(&self, dict: &str, code: &str) -> Result<&str> {
        self.entry(dict, code).map(|e| e.meaning.as_str())
    }

    /// Looks up the full entry for a code.
    pub fn entry(&self, dict: &str, code: &str) -> Result<&ShardEntry> {
        let shard = self
            .shards
            .get(dict)
            .ok_or_else(|| DictError::UnknownDictionary {
                dict: dict.to_string(),
            })?;
        shard.get(code).ok_or_else(|| DictError::UnknownCode {
            dict: dict.to_string(),
            code: code.to_string(),
        })
    }

    /// Returns the shard for a dictionary.
    pub fn dictionary(&self, dict: &str) -> Option<&DictShard> {
        self.shards.get(dict).map(|s| s.as_ref())
    }

    /// Returns `true` if the dictionary is present.
    pub fn contains(&self, dict: &str) -> bool {
        self.shards.contains_key(dict)
    }

    /// Dictionary names in lexical order.
    pub fn dict_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.shards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of dictionaries.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    /// Returns `true` if the cache holds no dictionaries.
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }
}

impl DictionaryLookup for DictCache {
    fn lookup_meaning(&self, dict: &str, code: &str) -> Result<String> {
        self.lookup(dict, code).map(str::to_string)
    }
}
