//! Concrete implementations of the collaborator traits.
//!
//! Production adapters the presentation layer plugs into the stores,
//! plus test doubles under [`mock`].
//!
//! # Adapters
//!
//! - [`HttpIdentityService`] - identity service over reqwest
//! - [`HttpProfileMirror`] - profile mirror over reqwest
//! - [`FileStore`] - JSON-file-backed local durable store
//! - [`ProcessRestart`] - relaunch-and-exit restart handle
//!
//! # Mock Implementations
//!
//! - [`mock::MockIdentityService`] - scripted sign-in/password results
//! - [`mock::MockProfileMirror`] - scripted mirror outcomes
//! - [`mock::InMemoryLocalStore`] - in-memory durable store
//! - [`mock::MockRestart`] - records restart invocations

pub mod file_store;
pub mod http_identity;
pub mod http_mirror;
pub mod mock;
pub mod process_restart;

pub use file_store::FileStore;
pub use http_identity::HttpIdentityService;
pub use http_mirror::HttpProfileMirror;
pub use process_restart::ProcessRestart;
