//! Generic reactive key/value preference store.
//!
//! Every `set` is a dual write: a synchronous local durable write that
//! must succeed before anything is published, then a best-effort remote
//! mirror write retried with bounded backoff. Between local success and
//! remote confirmation the new value is published optimistically; if the
//! mirror keeps failing the key reverts to its last confirmed value and
//! the failure is recorded.
//!
//! Each key's slot tracks a write generation. Mirror completions carry
//! the generation of the `set` that spawned them, and a completion whose
//! generation no longer matches is dropped - the same last-call-wins rule
//! the session store applies to sign-in, so a slow confirmation or revert
//! can never clobber a newer pending value.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::models::SyncFailure;
use crate::preferences::SyncRetryPolicy;
use crate::traits::{LocalStore, ProfileMirror};

/// Reactive dual-write preference store.
///
/// Cheap to clone; clones share the same underlying state. The remote
/// half of `set` is issued onto the ambient tokio runtime.
#[derive(Clone)]
pub struct PreferenceStore {
    inner: Arc<PrefInner>,
}

struct PrefInner {
    local: Arc<dyn LocalStore>,
    mirror: Arc<dyn ProfileMirror>,
    retry: SyncRetryPolicy,
    slots: Mutex<HashMap<String, Slot>>,
}

/// Per-key state. `pending`, when present, was already durably written
/// locally; it is cleared on remote confirmation or on revert.
struct Slot {
    confirmed: Option<Value>,
    pending: Option<Value>,
    generation: u64,
    last_sync_error: Option<SyncFailure>,
    publisher: watch::Sender<Option<Value>>,
}

impl Slot {
    fn new(confirmed: Option<Value>) -> Self {
        let (publisher, _) = watch::channel(confirmed.clone());
        Self {
            confirmed,
            pending: None,
            generation: 0,
            last_sync_error: None,
            publisher,
        }
    }

    /// The currently published value: optimistic if pending, else confirmed.
    fn published(&self) -> Option<Value> {
        self.pending.clone().or_else(|| self.confirmed.clone())
    }

    fn publish(&self) {
        let value = self.published();
        self.publisher.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }
}

impl PreferenceStore {
    /// Create a store over a local durable store and a remote mirror,
    /// with the default retry policy.
    pub fn new(local: Arc<dyn LocalStore>, mirror: Arc<dyn ProfileMirror>) -> Self {
        Self::with_retry_policy(local, mirror, SyncRetryPolicy::default())
    }

    /// Create a store with a custom retry policy for mirror writes.
    pub fn with_retry_policy(
        local: Arc<dyn LocalStore>,
        mirror: Arc<dyn ProfileMirror>,
        retry: SyncRetryPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(PrefInner {
                local,
                mirror,
                retry,
                slots: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Set a preference value.
    ///
    /// The local durable write completes (or fails) before this returns;
    /// a local failure is fatal to the call and nothing is published. On
    /// local success the value is published optimistically and the mirror
    /// write proceeds in the background - its failure never reaches the
    /// caller, only [`PreferenceStore::last_sync_error`].
    pub fn set<T: Serialize>(&self, key: &str, value: T) -> Result<(), SyncError> {
        let value = serde_json::to_value(value).map_err(|e| SyncError::LocalWriteFailed {
            message: format!("value not representable as JSON: {}", e),
        })?;

        let generation = {
            let mut slots = self.inner.slots.lock().unwrap();
            let slot = self.inner.slot_entry(&mut slots, key);
            // Durable write first; only then does the value become pending.
            self.inner.local.set_local(key, &value)?;
            slot.generation += 1;
            slot.pending = Some(value.clone());
            slot.publish();
            slot.generation
        };
        debug!(key, generation, "preference written locally, mirroring");

        let inner = Arc::clone(&self.inner);
        let key = key.to_string();
        tokio::spawn(async move {
            let outcome = inner.mirror_with_retry(&key, &value).await;
            inner.apply_mirror_outcome(&key, generation, value, outcome);
        });

        Ok(())
    }

    /// Get the currently published value for a key, deserialized.
    ///
    /// Optimistic if a write is pending, else confirmed; falls back to
    /// the local durable store for keys not yet touched this process
    /// lifetime. Never blocks on the network.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.value(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Get the currently published value for a key as raw JSON.
    pub fn value(&self, key: &str) -> Option<Value> {
        let mut slots = self.inner.slots.lock().unwrap();
        self.inner.slot_entry(&mut slots, key).published()
    }

    /// Subscribe to published-value changes for one key.
    ///
    /// The receiver observes the current value immediately and every
    /// optimistic publish, confirmation, and revert afterwards.
    pub fn subscribe(&self, key: &str) -> watch::Receiver<Option<Value>> {
        let mut slots = self.inner.slots.lock().unwrap();
        self.inner.slot_entry(&mut slots, key).publisher.subscribe()
    }

    /// The recorded failure from the last exhausted mirror write for a
    /// key, if any.
    pub fn last_sync_error(&self, key: &str) -> Option<SyncFailure> {
        let slots = self.inner.slots.lock().unwrap();
        slots.get(key).and_then(|slot| slot.last_sync_error.clone())
    }

    /// Clear a key's recorded sync failure.
    pub fn clear_sync_error(&self, key: &str) {
        let mut slots = self.inner.slots.lock().unwrap();
        if let Some(slot) = slots.get_mut(key) {
            slot.last_sync_error = None;
        }
    }
}

impl PrefInner {
    /// Get or create the slot for a key, hydrating `confirmed` from the
    /// local durable store on first touch so values survive restarts.
    fn slot_entry<'a>(&self, slots: &'a mut HashMap<String, Slot>, key: &str) -> &'a mut Slot {
        slots
            .entry(key.to_string())
            .or_insert_with(|| Slot::new(self.local.get_local(key)))
    }

    async fn mirror_with_retry(&self, key: &str, value: &Value) -> Result<u32, (SyncError, u32)> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.mirror.set_remote(key, value).await {
                Ok(()) => return Ok(attempt),
                Err(err) if attempt >= self.retry.max_attempts => return Err((err, attempt)),
                Err(err) => {
                    let delay = self.retry.delay_for(attempt);
                    debug!(
                        key,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "mirror write failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    fn apply_mirror_outcome(
        &self,
        key: &str,
        generation: u64,
        value: Value,
        outcome: Result<u32, (SyncError, u32)>,
    ) {
        let mut slots = self.slots.lock().unwrap();
        let Some(slot) = slots.get_mut(key) else {
            return;
        };
        if slot.generation != generation {
            debug!(
                key,
                generation,
                current = slot.generation,
                "dropping stale mirror completion"
            );
            return;
        }
        match outcome {
            Ok(attempts) => {
                debug!(key, attempts, "preference confirmed by mirror");
                slot.confirmed = Some(value);
                slot.pending = None;
                slot.last_sync_error = None;
                // Published value is unchanged; no notification needed.
            }
            Err((err, attempts)) => {
                warn!(
                    key,
                    attempts,
                    error = %err,
                    "mirror write exhausted retries, reverting to confirmed value"
                );
                slot.pending = None;
                slot.last_sync_error = Some(SyncFailure {
                    error: err,
                    attempts,
                    at: Utc::now(),
                });
                slot.publish();
            }
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.inner.slots.lock().unwrap();
        f.debug_struct("PreferenceStore")
            .field("keys", &slots.keys().collect::<Vec<_>>())
            .finish()
    }
}
