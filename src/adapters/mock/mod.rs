//! Mock collaborators for testing.
//!
//! Test doubles for every trait seam, with scripted results, recorded
//! calls, and optional per-call latency so tests can interleave
//! completions deterministically:
//!
//! - [`MockIdentityService`] - sign-in results scripted per identifier
//! - [`MockProfileMirror`] - scripted mirror outcomes and call recording
//! - [`InMemoryLocalStore`] - in-memory durable store with a failure switch
//! - [`MockRestart`] - counts restart invocations instead of restarting

pub mod identity;
pub mod local_store;
pub mod mirror;
pub mod restart;

pub use identity::MockIdentityService;
pub use local_store::InMemoryLocalStore;
pub use mirror::MockProfileMirror;
pub use restart::MockRestart;
