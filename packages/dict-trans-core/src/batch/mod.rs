//! Worker pool capability and batch execution helpers.

mod handle;

pub use handle::{wait_all, TaskHandle};

use crate::graph::{shared, Shared};

#[cfg(feature = "parallel")]
use crate::error::{DictError, Result};

/// A unit of work submitted to a pool.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Task submission capability.
///
/// The pool is owned by the caller; the engine only submits to it.
pub trait WorkerPool: Send + Sync {
    /// Schedules `task` and returns a handle to its outcome.
    fn submit(&self, task: Task) -> TaskHandle;
}

/// Runs every task immediately on the submitting thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlinePool;

impl WorkerPool for InlinePool {
    fn submit(&self, task: Task) -> TaskHandle {
        let (handle, run) = TaskHandle::prepare(task);
        run();
        handle
    }
}

/// Worker pool backed by a dedicated Rayon thread pool.
#[cfg(feature = "parallel")]
#[derive(Debug)]
pub struct RayonPool {
    pool: rayon::ThreadPool,
}

#[cfg(feature = "parallel")]
impl RayonPool {
    /// Builds a pool with `threads` workers (0 = Rayon's default).
    pub fn new(threads: usize, name_prefix: &str) -> Result<Self> {
        let prefix = name_prefix.to_string();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |i| format!("{}-{}", prefix, i))
            .build()
            .map_err(|e| DictError::Config(format!("failed to build worker pool: {}", e)))?;
        tracing::info!(
            "Started translation worker pool with {} threads",
            pool.current_num_threads()
        );
        Ok(Self { pool })
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

#[cfg(feature = "parallel")]
impl WorkerPool for RayonPool {
    fn submit(&self, task: Task) -> TaskHandle {
        let (handle, run) = TaskHandle::prepare(task);
        self.pool.spawn(run);
        handle
    }
}

/// Independent copy of a shared object.
///
/// Callers take a snapshot before handing the same object to more than one
/// concurrent translation.
pub fn snapshot<T: Clone>(node: &Shared<T>) -> Shared<T> {
    shared(node.read().clone())
}
