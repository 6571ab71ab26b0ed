//! Hot-swappable cache reference using ArcSwap.
//!
//! Readers take an `Arc<DictCache>` snapshot without locking. A writer builds
//! a complete replacement and publishes it with one atomic store; readers
//! that loaded the old cache finish against it.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::entry::DictEntry;
use super::{DictCache, DictionaryLookup};
use crate::error::Result;

/// Atomically replaceable cache reference.
#[derive(Debug)]
pub struct CacheHandle {
    inner: ArcSwap<DictCache>,
}

impl CacheHandle {
    /// Wraps an initial cache.
    pub fn new(cache: DictCache) -> Self {
        Self {
            inner: ArcSwap::from_pointee(cache),
        }
    }

    /// Loads the current cache.
    ///
    /// The returned `Arc` keeps this cache alive across later swaps.
    pub fn load(&self) -> Arc<DictCache> {
        self.inner.load_full()
    }

    /// Publishes a new cache and returns the one it replaced.
    pub fn store(&self, cache: DictCache) -> Arc<DictCache> {
        let dicts = cache.len();
        let previous = self.inner.swap(Arc::new(cache));
        tracing::info!(
            "Swapped dictionary cache: {} -> {} dictionaries",
            previous.len(),
            dicts
        );
        previous
    }

    /// Builds a cache from records and publishes it.
    pub fn reload<I>(&self, entries: I) -> Arc<DictCache>
    where
        I: IntoIterator<Item = DictEntry>,
    {
        self.store(DictCache::build(entries))
    }
}

impl Default for CacheHandle {
    fn default() -> Self {
        Self::new(DictCache::new())
    }
}

impl DictionaryLookup for CacheHandle {
    fn lookup_meaning(&self, dict: &str, code: &str) -> Result<String> {
        self.inner.load().lookup(dict, code).map(str::to_string)
    }
}
