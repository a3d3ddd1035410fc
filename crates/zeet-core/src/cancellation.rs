//! Cancellation support for splash workers
//!
//! One-shot stop request, polled once per loop iteration by every worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Wrapper around CancellationToken for cooperative worker shutdown
#[derive(Clone, Debug)]
pub struct CancellationSignal {
    token: CancellationToken,
    flipped: Arc<AtomicBool>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            flipped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request that all workers stop.
    ///
    /// Returns true only for the call that actually flipped the signal;
    /// later calls are no-ops.
    pub fn request(&self) -> bool {
        if self.flipped.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.token.cancel();
        true
    }

    /// Whether a stop has been requested
    pub fn is_requested(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}
