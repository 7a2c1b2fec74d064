//! Preference synchronization error types.
//!
//! A failing local durable write is always fatal to the caller's `set`.
//! A failing remote mirror write is handled internally with bounded
//! retries and, on exhaustion, recorded against the affected key.

use std::fmt;

/// Errors from the dual-write preference path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The synchronous local durable write failed.
    LocalWriteFailed { message: String },

    /// The remote mirror write failed.
    RemoteWriteFailed { message: String },

    /// The remote mirror write timed out.
    Timeout,
}

impl SyncError {
    /// Check whether this error came from the local durable store.
    ///
    /// Local failures are fatal to the caller; remote failures degrade to
    /// a recorded error and a value revert.
    pub fn is_local(&self) -> bool {
        matches!(self, SyncError::LocalWriteFailed { .. })
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SyncError::LocalWriteFailed { .. } => "E_SYNC_LOCAL",
            SyncError::RemoteWriteFailed { .. } => "E_SYNC_REMOTE",
            SyncError::Timeout => "E_SYNC_TIMEOUT",
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::LocalWriteFailed { message } => {
                write!(f, "Local write failed: {}", message)
            }
            SyncError::RemoteWriteFailed { message } => {
                write!(f, "Remote write failed: {}", message)
            }
            SyncError::Timeout => write!(f, "Remote write timed out"),
        }
    }
}

impl std::error::Error for SyncError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local() {
        assert!(SyncError::LocalWriteFailed {
            message: "disk full".to_string()
        }
        .is_local());
        assert!(!SyncError::RemoteWriteFailed {
            message: "503".to_string()
        }
        .is_local());
        assert!(!SyncError::Timeout.is_local());
    }

    #[test]
    fn test_display_format() {
        let err = SyncError::LocalWriteFailed {
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(SyncError::Timeout.to_string(), "Remote write timed out");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SyncError::RemoteWriteFailed {
                message: String::new()
            }
            .error_code(),
            "E_SYNC_REMOTE"
        );
        assert_eq!(SyncError::Timeout.error_code(), "E_SYNC_TIMEOUT");
    }
}
