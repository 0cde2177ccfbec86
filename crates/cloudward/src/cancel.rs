//! Cooperative cancellation for long-running cloud operations

use crate::error::{CloudError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle onto the halt flag of an enclosing orchestrator task.
///
/// Clones share the flag, so one token can be handed to any number of
/// in-flight retry and polling loops. Cancellation is cooperative:
/// loops observe the flag only at their per-iteration
/// [`checkpoint`](CancelToken::checkpoint) call, never mid-sleep.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    halted: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the enclosing task as halted. Idempotent.
    pub fn cancel(&self) {
        self.halted.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    /// Fails with [`CloudError::Cancelled`] once the task is halted,
    /// otherwise does nothing.
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(CloudError::Cancelled);
        }
        Ok(())
    }
}
