//! Dictionary cache: bulk build, priority merge, lookup, hot swap.

mod dict_cache;
mod entry;
mod handle;
mod shard;

pub use dict_cache::DictCache;
pub use entry::{DictEntry, DEFAULT_SORT_NUM};
pub use handle::CacheHandle;
pub use shard::{DictShard, ShardEntry};

use crate::error::Result;

/// Code-to-meaning lookup capability consumed by the translation engine.
pub trait DictionaryLookup: Send + Sync {
    /// Resolves `code` within dictionary `dict`.
    ///
    /// # Errors
    /// `DictError::UnknownDictionary` or `DictError::UnknownCode`.
    fn lookup_meaning(&self, dict: &str, code: &str) -> Result<String>;
}
