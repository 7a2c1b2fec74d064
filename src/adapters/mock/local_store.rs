//! In-memory local durable store for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::SyncError;
use crate::traits::LocalStore;

struct LocalInner {
    map: HashMap<String, Value>,
    fail_writes: bool,
    write_count: usize,
}

/// In-memory [`LocalStore`] with a failure switch and a write counter.
///
/// `seed` installs values without counting them as writes, so tests can
/// distinguish fixture setup from writes performed by the code under
/// test. While `fail_writes` is on, every `set_local` fails and the map
/// is left untouched.
#[derive(Clone)]
pub struct InMemoryLocalStore {
    inner: Arc<Mutex<LocalInner>>,
}

impl InMemoryLocalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LocalInner {
                map: HashMap::new(),
                fail_writes: false,
                write_count: 0,
            })),
        }
    }

    /// Install a value without counting it as a write.
    pub fn seed(&self, key: &str, value: Value) {
        self.inner.lock().unwrap().map.insert(key.to_string(), value);
    }

    /// Toggle write failures.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    /// Number of successful writes performed through `set_local`.
    pub fn write_count(&self) -> usize {
        self.inner.lock().unwrap().write_count
    }

    /// A copy of the stored map.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.inner.lock().unwrap().map.clone()
    }
}

impl Default for InMemoryLocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStore for InMemoryLocalStore {
    fn set_local(&self, key: &str, value: &Value) -> Result<(), SyncError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(SyncError::LocalWriteFailed {
                message: "simulated local write failure".to_string(),
            });
        }
        inner.map.insert(key.to_string(), value.clone());
        inner.write_count += 1;
        Ok(())
    }

    fn get_local(&self, key: &str) -> Option<Value> {
        self.inner.lock().unwrap().map.get(key).cloned()
    }
}
