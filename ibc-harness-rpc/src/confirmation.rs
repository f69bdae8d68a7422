use std::time::Duration;

/// How long to wait for a submitted transaction to be mined.
///
/// The receipt is polled up to `max_attempts` times, `poll_interval` apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl ConfirmationPolicy {
    pub fn new(poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            poll_interval,
            max_attempts,
        }
    }

    /// Upper bound on the time spent waiting for one transaction.
    pub fn max_wait(&self) -> Duration {
        self.poll_interval.saturating_mul(self.max_attempts)
    }
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            max_attempts: 120,
        }
    }
}
