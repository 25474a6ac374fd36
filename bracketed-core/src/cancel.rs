//! Cooperative cancellation signal shared between a host and in-flight builds.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Cloneable flag; every clone observes the same cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
