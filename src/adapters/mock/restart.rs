//! Mock restart handle for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::traits::RestartHandle;

/// Restart handle that counts invocations instead of restarting.
#[derive(Debug, Default)]
pub struct MockRestart {
    invocations: AtomicUsize,
}

impl MockRestart {
    /// Create a handle with zero recorded invocations.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the restart capability was invoked.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl RestartHandle for MockRestart {
    fn terminate_and_relaunch(&self) {
        self.invocations.fetch_add(1, Ordering::SeqCst);
    }
}
