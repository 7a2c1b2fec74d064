//! Common test utilities for integration tests.
//!
//! Shared fixtures and helpers for exercising the stores end to end
//! over the mock collaborators.
#![allow(dead_code)]

use tandem::models::Profile;

/// Initialize tracing output for a test run. Safe to call repeatedly;
/// only the first call installs the subscriber.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tandem=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Profile fixture for a given username.
pub fn profile(username: &str) -> Profile {
    Profile {
        user_id: format!("user-{}", username),
        username: username.to_string(),
        display_name: None,
        email: None,
        locale: None,
    }
}
