//! Cooperative cancellation for a running simulation.
//!
//! The step loop checks a [`StopSignal`] once per iteration. Any clone of
//! the signal can request a stop from another thread or task (the binary
//! does so from its Ctrl-C handler); the loop then bails out with
//! [`SimulationError::ContextCancelled`] instead of finalizing.
//!
//! [`SimulationError::ContextCancelled`]: crate::error::SimulationError::ContextCancelled

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stop_requested: Arc<AtomicBool>,
}

impl StopSignal {
    /// Create a signal that has not been raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the run to stop at its next check.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }
}
