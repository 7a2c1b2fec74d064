//! Stateless password-change validation policy.
//!
//! Pure checks applied before any network call. A failure here means the
//! identity service is never contacted for the attempted change.

use crate::error::ValidationError;

/// Minimum password length in code points.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate a proposed password change.
///
/// Rules, applied in order:
/// 1. `new_password` must be at least [`MIN_PASSWORD_LEN`] code points.
/// 2. `new_password` and `confirm_password` must match exactly
///    (case-sensitive, code-point comparison).
pub fn validate(new_password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::MinLength);
    }
    if new_password != confirm_password {
        return Err(ValidationError::Mismatch);
    }
    Ok(())
}
