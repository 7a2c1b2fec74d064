//! Profile mirror trait abstraction.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SyncError;

/// Best-effort remote mirror of preference values.
///
/// Mirror writes are asynchronous and unreliable; the preference store
/// retries them with bounded backoff and degrades to a recorded
/// [`SyncError`] when they keep failing. A mirror failure never fails
/// the caller's `set`.
#[async_trait]
pub trait ProfileMirror: Send + Sync {
    /// Write one key's value to the remote mirror.
    async fn set_remote(&self, key: &str, value: &Value) -> Result<(), SyncError>;
}
