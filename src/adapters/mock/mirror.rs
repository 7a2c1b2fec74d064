//! Mock profile mirror for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;

use crate::error::SyncError;
use crate::traits::ProfileMirror;

struct MockMirrorInner {
    /// Scripted outcomes consumed in call order; each carries its own delay.
    script: VecDeque<(Duration, Result<(), SyncError>)>,
    /// Outcome once the script is exhausted.
    default: Result<(), SyncError>,
    /// Delay applied to default outcomes.
    default_delay: Duration,
    calls: Vec<(String, Value)>,
}

/// Mock profile mirror with scripted outcomes and recorded calls.
///
/// Defaults to succeeding immediately; tests script failures (or slow
/// confirmations) per call, or switch the default to drive retry
/// exhaustion.
#[derive(Clone)]
pub struct MockProfileMirror {
    inner: Arc<Mutex<MockMirrorInner>>,
}

impl MockProfileMirror {
    /// Create a mock that accepts every write immediately.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockMirrorInner {
                script: VecDeque::new(),
                default: Ok(()),
                default_delay: Duration::ZERO,
                calls: Vec::new(),
            })),
        }
    }

    /// Queue an outcome for the next unscripted call.
    pub fn queue(&self, result: Result<(), SyncError>) {
        self.queue_delayed(Duration::ZERO, result);
    }

    /// Queue an outcome that resolves after a delay.
    pub fn queue_delayed(&self, delay: Duration, result: Result<(), SyncError>) {
        self.inner.lock().unwrap().script.push_back((delay, result));
    }

    /// Set the outcome used once the script is exhausted.
    pub fn set_default(&self, result: Result<(), SyncError>) {
        self.inner.lock().unwrap().default = result;
    }

    /// Set the delay applied to default outcomes.
    pub fn set_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().default_delay = delay;
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }
}

impl Default for MockProfileMirror {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileMirror for MockProfileMirror {
    async fn set_remote(&self, key: &str, value: &Value) -> Result<(), SyncError> {
        let (delay, result) = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push((key.to_string(), value.clone()));
            match inner.script.pop_front() {
                Some(scripted) => scripted,
                None => (inner.default_delay, inner.default.clone()),
            }
        };
        if !delay.is_zero() {
            sleep(delay).await;
        }
        result
    }
}
