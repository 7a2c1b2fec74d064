//! Bounded exponential backoff policy for remote mirror writes.

use std::time::Duration;

/// Retry policy for the remote half of a preference write.
///
/// Attempt `n` (1-based) is followed, on failure, by a wait of
/// `base_delay * 2^(n-1)` capped at `max_delay`, until `max_attempts`
/// is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl Default for SyncRetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl SyncRetryPolicy {
    /// The delay to wait after the given failed attempt (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let delay = self.base_delay.saturating_mul(1u32 << exponent);
        delay.min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = SyncRetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_for(1), Duration::from_millis(250));
        assert_eq!(policy.delay_for(2), Duration::from_millis(500));
        assert_eq!(policy.delay_for(3), Duration::from_millis(1000));
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = SyncRetryPolicy::default();
        assert_eq!(policy.delay_for(10), Duration::from_secs(2));
        // Exponent is clamped, so large attempt numbers cannot overflow.
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_secs(2));
    }
}
