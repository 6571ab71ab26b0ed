//! Session configuration.

use serde::Deserialize;

use crate::error::{DictError, Result};

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Worker thread count for parallel batches (0 = number of CPUs)
    pub worker_threads: usize,
    /// Name prefix for worker threads
    pub thread_name_prefix: String,
    /// Ancestor search depth for field resolution (-1 = unbounded)
    pub ancestor_depth: i32,
    /// Whether the session's parallel batch call waits for its tasks
    pub block_parallel_batches: bool,
}

impl SessionConfig {
    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.ancestor_depth < -1 {
            return Err(DictError::Config(format!(
                "ancestor_depth must be -1 or greater, got {}",
                self.ancestor_depth
            )));
        }
        if self.thread_name_prefix.is_empty() {
            return Err(DictError::Config(
                "thread_name_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            thread_name_prefix: "dict-trans".to_string(),
            ancestor_depth: -1,
            block_parallel_batches: true,
        }
    }
}
