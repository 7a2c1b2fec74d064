//! Prelude module for convenient imports.
//!
//! Re-exports the types a presentation layer touches most.
//!
//! # Usage
//!
//! ```ignore
//! use tandem::prelude::*;
//! ```

// Stores and coordinator
pub use crate::locale::{LocaleSwitchCoordinator, LocaleSwitchOutcome, LOCALE_KEY};
pub use crate::preferences::{PreferenceStore, SyncRetryPolicy};
pub use crate::session::SessionStore;

// Data model
pub use crate::models::{
    AuthSession, AuthState, LocaleChangeRequest, LocaleChangeStatus, Profile, SyncFailure,
};

// Errors
pub use crate::error::{AuthError, ChangePasswordError, SyncError, ValidationError};

// Collaborator traits
pub use crate::traits::{IdentityService, LocalStore, ProfileMirror, RestartHandle};

// Validation policy
pub use crate::validation::{validate, MIN_PASSWORD_LEN};
