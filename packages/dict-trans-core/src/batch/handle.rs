//! Completion handle for a submitted task.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tokio::sync::oneshot;

use super::Task;
use crate::error::{DictError, Result};

type Outcome = Result<()>;

#[derive(Debug)]
struct HandleState {
    cancelled: AtomicBool,
    receiver: Mutex<Option<oneshot::Receiver<Outcome>>>,
    outcome: Mutex<Option<Outcome>>,
    published: Condvar,
}

impl HandleState {
    /// Stores `result` unless an outcome is already recorded, and returns
    /// the recorded outcome.
    fn publish(&self, result: Outcome) -> Outcome {
        let mut outcome = self.outcome.lock();
        let recorded = outcome.get_or_insert(result).clone();
        self.published.notify_all();
        recorded
    }
}

/// Handle to a task submitted to a [`WorkerPool`](super::WorkerPool).
///
/// Clones observe the same task. The outcome is cached, so `wait` may be
/// called any number of times.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    state: Arc<HandleState>,
}

impl TaskHandle {
    /// Pairs a task with a new handle.
    ///
    /// The returned closure runs the task on whatever thread the pool picks:
    /// it skips the task if the handle was cancelled first, converts a panic
    /// into `ExecutionFailure`, and reports the outcome to the handle.
    pub fn prepare(task: Task) -> (TaskHandle, impl FnOnce() + Send + 'static) {
        let (tx, rx) = oneshot::channel();
        let state = Arc::new(HandleState {
            cancelled: AtomicBool::new(false),
            receiver: Mutex::new(Some(rx)),
            outcome: Mutex::new(None),
            published: Condvar::new(),
        });
        let handle = TaskHandle {
            state: Arc::clone(&state),
        };

        let run = move || {
            if state.cancelled.load(Ordering::Acquire) {
                let _ = tx.send(Err(DictError::Cancelled));
                return;
            }
            let outcome = match std::panic::catch_unwind(AssertUnwindSafe(task)) {
                Ok(()) => Ok(()),
                Err(panic) => {
                    let panic_msg = if let Some(msg) = panic.downcast_ref::<&str>() {
                        msg.to_string()
                    } else if let Some(msg) = panic.downcast_ref::<String>() {
                        msg.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    tracing::error!("Translation task panicked: {}", panic_msg);
                    Err(DictError::ExecutionFailure(panic_msg))
                }
            };
            // Receiver may be gone if every handle was dropped
            let _ = tx.send(outcome);
        };

        (handle, run)
    }

    /// Blocks until the task finishes and returns its outcome.
    ///
    /// Must not be called from inside an async runtime.
    ///
    /// # Errors
    /// `ExecutionFailure` if the task panicked, `Cancelled` if it was
    /// cancelled or dropped by the pool without running.
    pub fn wait(&self) -> Result<()> {
        if let Some(done) = self.state.outcome.lock().as_ref() {
            return done.clone();
        }

        // No lock is held while blocking, so clones can still poll.
        let receiver = self.state.receiver.lock().take();
        if let Some(rx) = receiver {
            let result = rx.blocking_recv().unwrap_or(Err(DictError::Cancelled));
            return self.state.publish(result);
        }

        // Another caller owns the receiver and publishes for everyone.
        let mut outcome = self.state.outcome.lock();
        loop {
            if let Some(done) = outcome.as_ref() {
                return done.clone();
            }
            self.state.published.wait(&mut outcome);
        }
    }

    /// Returns `true` once the task has produced an outcome.
    pub fn is_finished(&self) -> bool {
        if self.state.outcome.lock().is_some() {
            return true;
        }
        let polled = {
            let mut receiver = self.state.receiver.lock();
            let polled = match receiver.as_mut() {
                Some(rx) => match rx.try_recv() {
                    Ok(result) => Some(result),
                    Err(oneshot::error::TryRecvError::Empty) => None,
                    Err(oneshot::error::TryRecvError::Closed) => {
                        Some(Err(DictError::Cancelled))
                    }
                },
                // A waiter holds the receiver and has not published yet
                None => None,
            };
            if polled.is_some() {
                receiver.take();
            }
            polled
        };
        match polled {
            Some(result) => {
                self.state.publish(result);
                true
            }
            None => self.state.outcome.lock().is_some(),
        }
    }

    /// Asks the pool to skip the task if it has not started yet.
    ///
    /// A task already running completes normally.
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` if `cancel` was called.
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::Acquire)
    }
}

/// Waits for every handle, logging failures without stopping.
///
/// Returns the number of tasks that did not complete successfully.
pub fn wait_all(handles: &[TaskHandle]) -> usize {
    let mut failed = 0;
    for (index, handle) in handles.iter().enumerate() {
        if let Err(e) = handle.wait() {
            tracing::warn!("Translation task {} did not complete: {}", index, e);
            failed += 1;
        }
    }
    if failed > 0 {
        tracing::debug!(
            "Parallel translation: {} succeeded, {} failed",
            handles.len() - failed,
            failed
        );
    }
    failed
}
