//! Process restart trait abstraction.

/// Process-level terminate-and-relaunch capability.
///
/// Production implementations tear the process down and do not return.
/// The signature still returns `()` so test doubles can record the
/// invocation and hand control back to the test.
pub trait RestartHandle: Send + Sync {
    /// Terminate the current process and relaunch it.
    fn terminate_and_relaunch(&self);
}
