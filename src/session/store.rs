//! Session store owning the authentication state machine.
//!
//! The store is the single writer of [`AuthSession`]: every transition is
//! applied under the watch channel's internal lock, one at a time, and
//! observers only ever receive values through [`SessionStore::subscribe`].
//! Sign-in completions are tagged with the generation of the attempt that
//! issued them; a completion whose generation no longer matches the
//! store's current generation is stale (a newer attempt superseded it)
//! and is dropped instead of applied - last call wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{AuthError, ChangePasswordError};
use crate::models::{AuthSession, AuthState, Profile};
use crate::traits::IdentityService;
use crate::validation;

/// Observable authentication state machine.
///
/// Cheap to clone; clones share the same underlying state. All async
/// work is issued onto the ambient tokio runtime, so the store must be
/// used from within one.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    identity: Arc<dyn IdentityService>,
    sessions: watch::Sender<AuthSession>,
    password_change_in_flight: AtomicBool,
}

impl SessionStore {
    /// Create a store in the `Idle` state over the given identity service.
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        let (sessions, _) = watch::channel(AuthSession::idle());
        Self {
            inner: Arc::new(SessionInner {
                identity,
                sessions,
                password_change_in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// The currently published session value.
    pub fn current(&self) -> AuthSession {
        self.inner.sessions.borrow().clone()
    }

    /// Subscribe to session changes.
    ///
    /// The receiver observes the current value immediately and every
    /// transition afterwards. Subscribers cannot mutate the store.
    pub fn subscribe(&self) -> watch::Receiver<AuthSession> {
        self.inner.sessions.subscribe()
    }

    /// Start a sign-in attempt.
    ///
    /// Transitions to `Authenticating`, issues the identity-service call
    /// asynchronously, and returns the attempt's generation immediately.
    /// Calling again while `Authenticating` or from `Failed` starts a new
    /// generation and invalidates the prior in-flight attempt: its
    /// completion, whenever it arrives, is dropped.
    pub fn sign_in(&self, identifier: impl Into<String>, secret: impl Into<String>) -> u64 {
        let identifier = identifier.into();
        let secret = secret.into();

        let mut generation = 0;
        self.inner.sessions.send_modify(|session| {
            session.generation += 1;
            session.state = AuthState::Authenticating;
            generation = session.generation;
        });
        debug!(generation, "sign-in attempt started");

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = inner.identity.sign_in(&identifier, &secret).await;
            inner.apply_sign_in_result(generation, result);
        });

        generation
    }

    /// Change the password of the signed-in account.
    ///
    /// Validation runs first and short-circuits without any network call.
    /// A second call while one is in flight is rejected with
    /// [`ChangePasswordError::InFlight`]. The outcome never affects
    /// session state, and the store retains no copy of the secrets: the
    /// owned arguments are dropped when the call returns.
    pub async fn change_password(
        &self,
        current: String,
        new: String,
        confirm: String,
    ) -> Result<(), ChangePasswordError> {
        validation::validate(&new, &confirm)?;

        if self
            .inner
            .password_change_in_flight
            .swap(true, Ordering::SeqCst)
        {
            return Err(ChangePasswordError::InFlight);
        }

        let result = self.inner.identity.change_password(&current, &new).await;
        self.inner
            .password_change_in_flight
            .store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                info!("password changed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "password change rejected");
                Err(ChangePasswordError::Auth(err))
            }
        }
    }

    /// Discard the session and return to `Idle`.
    ///
    /// Also bumps the generation, so any in-flight sign-in completion is
    /// dropped instead of resurrecting the session.
    pub fn sign_out(&self) {
        self.inner.sessions.send_modify(|session| {
            session.generation += 1;
            session.state = AuthState::Idle;
        });
        info!("signed out");
    }
}

impl SessionInner {
    fn apply_sign_in_result(&self, generation: u64, result: Result<Profile, AuthError>) {
        self.sessions.send_if_modified(|session| {
            if session.generation != generation {
                debug!(
                    generation,
                    current = session.generation,
                    "dropping stale sign-in completion"
                );
                return false;
            }
            session.state = match result {
                Ok(profile) => {
                    info!(generation, user_id = %profile.user_id, "sign-in succeeded");
                    AuthState::Authenticated(profile)
                }
                Err(err) => {
                    warn!(generation, error = %err, "sign-in failed");
                    AuthState::Failed(err.message().to_string())
                }
            };
            true
        });
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.current())
            .finish()
    }
}
