//! Mock identity service for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::error::AuthError;
use crate::models::Profile;
use crate::traits::IdentityService;

struct Scripted<T> {
    delay: Duration,
    result: Result<T, AuthError>,
}

#[derive(Default)]
struct MockIdentityInner {
    /// Sign-in results keyed by identifier, consumed in order.
    sign_in_responses: HashMap<String, VecDeque<Scripted<Profile>>>,
    change_password_responses: VecDeque<Scripted<()>>,
    sign_in_calls: Vec<String>,
    change_password_calls: Vec<String>,
}

/// Mock identity service with scripted responses.
///
/// Sign-in responses are keyed by identifier so concurrent attempts
/// resolve deterministically regardless of task scheduling; each queued
/// response is consumed once. An unscripted sign-in fails with an
/// `Unknown` error; an unscripted password change succeeds.
///
/// Recorded calls keep identifiers only - the mock never stores secrets.
#[derive(Clone)]
pub struct MockIdentityService {
    inner: Arc<Mutex<MockIdentityInner>>,
}

impl MockIdentityService {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockIdentityInner::default())),
        }
    }

    /// Queue a sign-in result for an identifier.
    pub fn set_sign_in_response(&self, identifier: &str, result: Result<Profile, AuthError>) {
        self.set_sign_in_response_delayed(identifier, Duration::ZERO, result);
    }

    /// Queue a sign-in result that resolves after a delay.
    pub fn set_sign_in_response_delayed(
        &self,
        identifier: &str,
        delay: Duration,
        result: Result<Profile, AuthError>,
    ) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .sign_in_responses
            .entry(identifier.to_string())
            .or_default()
            .push_back(Scripted { delay, result });
    }

    /// Queue a password-change result.
    pub fn queue_change_password(&self, result: Result<(), AuthError>) {
        self.queue_change_password_delayed(Duration::ZERO, result);
    }

    /// Queue a password-change result that resolves after a delay.
    pub fn queue_change_password_delayed(&self, delay: Duration, result: Result<(), AuthError>) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .change_password_responses
            .push_back(Scripted { delay, result });
    }

    /// Identifiers of all recorded sign-in calls, in order.
    pub fn sign_in_calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().sign_in_calls.clone()
    }

    /// Identifiers-free record of password-change calls (one entry per
    /// call, carrying only a redacted marker).
    pub fn change_password_calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().change_password_calls.clone()
    }
}

impl Default for MockIdentityService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn sign_in(&self, identifier: &str, _secret: &str) -> Result<Profile, AuthError> {
        let scripted = {
            let mut inner = self.inner.lock().unwrap();
            inner.sign_in_calls.push(identifier.to_string());
            inner
                .sign_in_responses
                .get_mut(identifier)
                .and_then(|queue| queue.pop_front())
        };
        match scripted {
            Some(Scripted { delay, result }) => {
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                result
            }
            None => Err(AuthError::Unknown {
                message: format!("no scripted sign-in response for '{}'", identifier),
            }),
        }
    }

    async fn change_password(&self, _current: &str, _new: &str) -> Result<(), AuthError> {
        let scripted = {
            let mut inner = self.inner.lock().unwrap();
            inner.change_password_calls.push("<redacted>".to_string());
            inner.change_password_responses.pop_front()
        };
        match scripted {
            Some(Scripted { delay, result }) => {
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                result
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            user_id: "user-1".to_string(),
            username: "marisol".to_string(),
            display_name: None,
            email: None,
            locale: None,
        }
    }

    #[tokio::test]
    async fn test_scripted_responses_consumed_in_order() {
        let mock = MockIdentityService::new();
        mock.set_sign_in_response(
            "marisol",
            Err(AuthError::InvalidCredentials {
                message: "nope".to_string(),
            }),
        );
        mock.set_sign_in_response("marisol", Ok(sample_profile()));

        assert!(mock.sign_in("marisol", "a").await.is_err());
        assert!(mock.sign_in("marisol", "b").await.is_ok());
        assert_eq!(mock.sign_in_calls(), vec!["marisol", "marisol"]);
    }

    #[tokio::test]
    async fn test_unscripted_sign_in_fails() {
        let mock = MockIdentityService::new();
        let err = mock.sign_in("nobody", "x").await.unwrap_err();
        assert!(err.message().contains("nobody"));
    }

    #[tokio::test]
    async fn test_unscripted_change_password_succeeds_and_records() {
        let mock = MockIdentityService::new();
        assert!(mock.change_password("old", "new").await.is_ok());
        assert_eq!(mock.change_password_calls().len(), 1);
    }
}
