use std::time::Duration;

/// Bounded retry policy applied uniformly to transient ledger failures.
///
/// `max_attempts` counts the initial try, so `max_attempts = 3` means at most
/// two retries, each after a fixed `delay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Number of retries after the initial attempt.
    pub fn retries(&self) -> usize {
        self.max_attempts - 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}
