//! Bounded retry policy for the final step of a cascading delete.

use std::num::NonZeroU32;
use std::time::Duration;

/// How often, and how patiently, a transient failure is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: NonZeroU32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Attempts made when no policy is configured.
    pub const DEFAULT_MAX_ATTEMPTS: NonZeroU32 = NonZeroU32::MIN.saturating_add(2);

    /// Pause between attempts when no policy is configured.
    pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(50);

    /// Creates a policy that makes at most `max_attempts` attempts, sleeping
    /// `backoff` between consecutive attempts.
    #[must_use]
    pub const fn new(max_attempts: NonZeroU32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Creates a policy that never retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self::new(NonZeroU32::MIN, Duration::ZERO)
    }

    /// Returns the maximum number of attempts, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> NonZeroU32 {
        self.max_attempts
    }

    /// Returns the pause between attempts.
    #[must_use]
    pub const fn backoff(&self) -> Duration {
        self.backoff
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_BACKOFF)
    }
}
