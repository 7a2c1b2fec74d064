//! Tandem - reactive session and preference synchronization core
//!
//! Coordinates three asynchronous, partially-unreliable collaborators -
//! a remote identity service, a remote profile mirror, and local durable
//! storage - into one consistent, observable picture of who is signed in
//! and what the user's current configuration is. A restart-based
//! protocol applies locale changes without losing or duplicating a
//! write.
//!
//! This is a library consumed by a presentation layer: it renders
//! nothing and owns no wire format beyond the operations it calls.

pub mod adapters;
pub mod error;
pub mod locale;
pub mod models;
pub mod preferences;
pub mod prelude;
pub mod session;
pub mod traits;
pub mod validation;
