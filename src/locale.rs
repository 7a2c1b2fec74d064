//! Locale switch coordinator.
//!
//! A locale change spans a preference write, a durability flush, and a
//! deliberate process restart. The coordinator makes that look atomic
//! from the outside: the restart capability is invoked if and only if
//! the local durable write for the new locale succeeded. The remote
//! mirror is not awaited - locale is locally authoritative, and a mirror
//! failure after the flush is only a logged discrepancy.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::SyncError;
use crate::models::{LocaleChangeRequest, LocaleChangeStatus};
use crate::preferences::PreferenceStore;
use crate::traits::RestartHandle;

/// Preference key the locale is stored under.
pub const LOCALE_KEY: &str = "locale";

/// Wait between the confirmed local write and the restart, sized to
/// exceed the local store's flush-to-disk latency.
pub const DEFAULT_GRACE_DELAY: Duration = Duration::from_millis(300);

/// Result of a locale change request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleSwitchOutcome {
    /// The requested locale was already current; nothing was written and
    /// the restart capability was not invoked.
    Unchanged,
    /// The locale was flushed locally and the restart capability was
    /// invoked. Production restart handles do not return, so callers
    /// only ever observe this variant in tests.
    RestartTriggered(LocaleChangeRequest),
}

/// A locale change that failed before the restart was triggered.
#[derive(Debug, Clone, Error)]
#[error("locale change to '{}' reverted: {}", .request.requested_code, .source)]
pub struct LocaleSwitchError {
    /// The failed request; its status is always `Reverted`.
    pub request: LocaleChangeRequest,
    /// The local write failure that caused the revert.
    pub source: SyncError,
}

/// Coordinates locale changes across the preference store and the
/// restart capability.
pub struct LocaleSwitchCoordinator {
    preferences: PreferenceStore,
    restart: Arc<dyn RestartHandle>,
    grace_delay: Duration,
}

impl LocaleSwitchCoordinator {
    /// Create a coordinator with the default grace delay.
    pub fn new(preferences: PreferenceStore, restart: Arc<dyn RestartHandle>) -> Self {
        Self {
            preferences,
            restart,
            grace_delay: DEFAULT_GRACE_DELAY,
        }
    }

    /// Override the grace delay.
    pub fn with_grace_delay(mut self, grace_delay: Duration) -> Self {
        self.grace_delay = grace_delay;
        self
    }

    /// The locale currently in effect, if one was ever stored.
    pub fn current_locale(&self) -> Option<String> {
        self.preferences.get(LOCALE_KEY)
    }

    /// Request a locale change.
    ///
    /// Requesting the current locale is a no-op: no writes, no restart.
    /// Otherwise the new code is written through the preference store;
    /// a local durable failure reverts the request and is returned, and
    /// the restart capability is never invoked. On local success the
    /// coordinator waits the grace delay so the flushed write reaches
    /// stable storage, then invokes the restart capability exactly once.
    pub async fn request_change(
        &self,
        new_code: &str,
    ) -> Result<LocaleSwitchOutcome, LocaleSwitchError> {
        let previous = self.current_locale();
        if previous.as_deref() == Some(new_code) {
            debug!(locale = new_code, "locale unchanged, nothing to do");
            return Ok(LocaleSwitchOutcome::Unchanged);
        }

        let mut request = LocaleChangeRequest {
            requested_code: new_code.to_string(),
            previous_code: previous,
            status: LocaleChangeStatus::Pending,
        };

        if let Err(err) = self.preferences.set(LOCALE_KEY, new_code) {
            request.status = LocaleChangeStatus::Reverted;
            warn!(
                locale = new_code,
                error = %err,
                "locale change reverted, local write failed"
            );
            return Err(LocaleSwitchError {
                request,
                source: err,
            });
        }

        request.status = LocaleChangeStatus::Flushed;
        info!(
            locale = new_code,
            previous = request.previous_code.as_deref().unwrap_or("<unset>"),
            grace_ms = self.grace_delay.as_millis() as u64,
            "locale flushed locally, restarting after grace delay"
        );
        // The mirror write continues in the background; its failure is a
        // logged discrepancy, never a reason to abort the restart.
        sleep(self.grace_delay).await;

        request.status = LocaleChangeStatus::RestartTriggered;
        self.restart.terminate_and_relaunch();
        Ok(LocaleSwitchOutcome::RestartTriggered(request))
    }
}
