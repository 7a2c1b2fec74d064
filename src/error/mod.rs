//! Error types for the synchronization core.
//!
//! One enum per concern, matching how failures propagate:
//!
//! - [`ValidationError`] - resolved entirely locally, surfaced synchronously
//! - [`AuthError`] - surfaced verbatim to the caller, never retried here
//! - [`SyncError`] - remote failures handled internally with bounded
//!   retries; local failures always fatal to the caller
//! - [`ChangePasswordError`] - composite result of the password operation

pub mod auth;
pub mod sync;
pub mod validation;

pub use auth::AuthError;
pub use sync::SyncError;
pub use validation::ValidationError;

use std::fmt;

/// Errors from [`SessionStore::change_password`](crate::session::SessionStore::change_password).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangePasswordError {
    /// The proposed password failed local validation. No network call
    /// was made.
    Validation(ValidationError),

    /// The identity service rejected the change.
    Auth(AuthError),

    /// Another password change is already in flight.
    InFlight,
}

impl ChangePasswordError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChangePasswordError::Validation(err) => err.user_message(),
            ChangePasswordError::Auth(err) => err.message().to_string(),
            ChangePasswordError::InFlight => {
                "A password change is already in progress.".to_string()
            }
        }
    }
}

impl fmt::Display for ChangePasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangePasswordError::Validation(err) => write!(f, "Validation failed: {}", err),
            ChangePasswordError::Auth(err) => write!(f, "{}", err),
            ChangePasswordError::InFlight => write!(f, "Password change already in flight"),
        }
    }
}

impl std::error::Error for ChangePasswordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChangePasswordError::Validation(err) => Some(err),
            ChangePasswordError::Auth(err) => Some(err),
            ChangePasswordError::InFlight => None,
        }
    }
}

impl From<ValidationError> for ChangePasswordError {
    fn from(err: ValidationError) -> Self {
        ChangePasswordError::Validation(err)
    }
}

impl From<AuthError> for ChangePasswordError {
    fn from(err: AuthError) -> Self {
        ChangePasswordError::Auth(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_validation_error() {
        let err: ChangePasswordError = ValidationError::MinLength.into();
        assert_eq!(
            err,
            ChangePasswordError::Validation(ValidationError::MinLength)
        );
    }

    #[test]
    fn test_from_auth_error() {
        let err: ChangePasswordError = AuthError::InvalidCredentials {
            message: "wrong password".to_string(),
        }
        .into();
        assert!(matches!(err, ChangePasswordError::Auth(_)));
    }

    #[test]
    fn test_auth_user_message_is_verbatim() {
        let err = ChangePasswordError::Auth(AuthError::Unknown {
            message: "rate limited".to_string(),
        });
        assert_eq!(err.user_message(), "rate limited");
    }

    #[test]
    fn test_in_flight_display() {
        let err = ChangePasswordError::InFlight;
        assert!(err.to_string().contains("in flight"));
        assert!(err.user_message().contains("in progress"));
    }
}
