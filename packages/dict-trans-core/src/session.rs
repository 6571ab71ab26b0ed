//! Session owning the shared cache, the field resolver and the worker pool.

use std::sync::Arc;

use crate::batch::{TaskHandle, WorkerPool};
use crate::cache::{CacheHandle, DictCache, DictEntry};
use crate::config::SessionConfig;
use crate::engine::{FieldOverrides, TranslationEngine};
use crate::error::Result;
use crate::graph::{Shared, Translatable};
use crate::meta::FieldResolver;

/// Owning context for dictionary translation.
///
/// Engines handed out by [`DictSession::engine`] read through the session's
/// cache handle, so a [`reload`](DictSession::reload) is visible to them on
/// their next lookup.
pub struct DictSession {
    config: SessionConfig,
    cache: Arc<CacheHandle>,
    resolver: Arc<FieldResolver>,
    pool: Arc<dyn WorkerPool>,
}

impl std::fmt::Debug for DictSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictSession")
            .field("config", &self.config)
            .field("dictionaries", &self.cache.load().len())
            .finish()
    }
}

impl DictSession {
    /// Creates a session with a Rayon worker pool sized from `config`.
    #[cfg(feature = "parallel")]
    pub fn new<I>(config: SessionConfig, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = DictEntry>,
    {
        config.validate()?;
        let pool = crate::batch::RayonPool::new(config.worker_threads, &config.thread_name_prefix)?;
        Self::with_pool(config, DictCache::build(entries), Arc::new(pool))
    }

    /// Creates a session that runs batch tasks on the calling thread.
    #[cfg(not(feature = "parallel"))]
    pub fn new<I>(config: SessionConfig, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = DictEntry>,
    {
        Self::with_pool(
            config,
            DictCache::build(entries),
            Arc::new(crate::batch::InlinePool),
        )
    }

    /// Creates a session around an existing cache and pool.
    pub fn with_pool(
        config: SessionConfig,
        cache: DictCache,
        pool: Arc<dyn WorkerPool>,
    ) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            "Starting dictionary session with {} dictionaries",
            cache.len()
        );
        Ok(Self {
            config,
            cache: Arc::new(CacheHandle::new(cache)),
            resolver: Arc::new(FieldResolver::new()),
            pool,
        })
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Shared cache handle.
    pub fn cache(&self) -> &Arc<CacheHandle> {
        &self.cache
    }

    /// Worker pool used for parallel batches.
    pub fn pool(&self) -> &Arc<dyn WorkerPool> {
        &self.pool
    }

    /// Engine bound to this session's cache handle and resolver.
    pub fn engine(&self) -> TranslationEngine {
        let lookup = Arc::clone(&self.cache);
        TranslationEngine::with_resolver(lookup, Arc::clone(&self.resolver))
            .with_ancestor_depth(self.config.ancestor_depth)
    }

    /// Looks up one meaning in the current cache.
    pub fn lookup(&self, dict: &str, code: &str) -> Result<String> {
        self.cache.load().lookup(dict, code).map(str::to_string)
    }

    /// Rebuilds the cache from records and swaps it in.
    pub fn reload<I>(&self, entries: I)
    where
        I: IntoIterator<Item = DictEntry>,
    {
        self.cache.reload(entries);
    }

    /// Swaps in the priority merge of `caches` (highest priority first).
    pub fn replace_with_merge<'a, I>(&self, caches: I)
    where
        I: IntoIterator<Item = &'a DictCache>,
    {
        self.cache.store(DictCache::merge(caches));
    }

    /// Parallel batch translation on the session pool.
    ///
    /// Blocks according to `SessionConfig::block_parallel_batches`.
    pub fn translate_list_parallel<T>(
        &self,
        items: &[Shared<T>],
        overrides: Option<&FieldOverrides>,
    ) -> Vec<TaskHandle>
    where
        T: Translatable + Send + Sync + 'static,
    {
        self.engine().translate_list_parallel(
            items,
            overrides,
            self.pool.as_ref(),
            self.config.block_parallel_batches,
        )
    }
}
