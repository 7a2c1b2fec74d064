//! Core data types shared across the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Profile returned by the identity service on a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Authentication state machine states.
///
/// The enum shape guarantees that a profile is present exactly when the
/// session is `Authenticated` and an error message exactly when `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No sign-in attempted since process start or last sign-out.
    Idle,
    /// A sign-in call is in flight.
    Authenticating,
    /// Signed in; carries the profile returned by the identity service.
    Authenticated(Profile),
    /// The last sign-in attempt failed; carries the service's verbatim message.
    Failed(String),
}

impl AuthState {
    /// Check if the session is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// The signed-in profile, if any.
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            AuthState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }

    /// The failure message, if the last attempt failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Observable session value published by the session store.
///
/// `generation` increases monotonically with every sign-in attempt (and
/// sign-out); completions tagged with an older generation are stale and
/// are dropped rather than applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub state: AuthState,
    pub generation: u64,
}

impl AuthSession {
    /// The session every process starts with.
    pub fn idle() -> Self {
        Self {
            state: AuthState::Idle,
            generation: 0,
        }
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::idle()
    }
}

/// Record of an exhausted remote mirror write for one preference key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    /// The final error after retries were exhausted.
    pub error: SyncError,
    /// How many attempts were made, including the first.
    pub attempts: u32,
    /// When the failure was recorded.
    pub at: DateTime<Utc>,
}

/// Status of one in-flight locale change operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleChangeStatus {
    /// Created; no write performed yet.
    Pending,
    /// The local durable write succeeded.
    Flushed,
    /// The restart capability is about to be invoked. Reachable only
    /// from `Flushed`.
    RestartTriggered,
    /// The local durable write failed. Reachable only from `Pending`.
    Reverted,
}

/// One locale change operation. Lives only for the duration of the
/// operation; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChangeRequest {
    pub requested_code: String,
    /// The locale in effect before the change; `None` on a fresh install
    /// where no locale was ever stored.
    pub previous_code: Option<String>,
    pub status: LocaleChangeStatus,
}
