//! Identity service trait abstraction.

use async_trait::async_trait;

use crate::error::AuthError;
use crate::models::Profile;

/// Remote identity service operations.
///
/// Both operations are asynchronous and may fail with an [`AuthError`]
/// whose message is surfaced verbatim to the user. The core never retries
/// these calls; retry is a caller decision.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Authenticate with an identifier/secret pair.
    ///
    /// Returns the signed-in profile on success.
    async fn sign_in(&self, identifier: &str, secret: &str) -> Result<Profile, AuthError>;

    /// Change the password of the currently authenticated account.
    ///
    /// Operates out of band on an already-authenticated session; the
    /// outcome never affects session state.
    async fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError>;
}
