//! Authentication error types.
//!
//! Errors returned by the identity service for sign-in and password-change
//! operations. The core never retries these; the service-provided message
//! is surfaced verbatim as the terminal result.

use std::fmt;

/// Errors returned by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The identifier/secret pair was rejected.
    InvalidCredentials { message: String },

    /// The identity service could not be reached.
    NetworkFailure { message: String },

    /// The identity service returned an unrecognized error.
    Unknown { message: String },
}

impl AuthError {
    /// The verbatim message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            AuthError::InvalidCredentials { message }
            | AuthError::NetworkFailure { message }
            | AuthError::Unknown { message } => message,
        }
    }

    /// Check if this error is transient (retrying may succeed without
    /// the user changing anything).
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::NetworkFailure { .. })
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { .. } => "E_AUTH_INVALID",
            AuthError::NetworkFailure { .. } => "E_AUTH_NETWORK",
            AuthError::Unknown { .. } => "E_AUTH_UNKNOWN",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials { message } => {
                write!(f, "Invalid credentials: {}", message)
            }
            AuthError::NetworkFailure { message } => {
                write!(f, "Network failure: {}", message)
            }
            AuthError::Unknown { message } => {
                write!(f, "Authentication error: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}
