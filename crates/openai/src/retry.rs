//! Retry policy for synthesis calls: bounded attempts, linear backoff,
//! and a hard per-attempt deadline.

use std::time::Duration;

/// Tunable parameters for the synthesis retry strategy.
///
/// One policy instance is built from configuration at startup and injected
/// into the client; the near-duplicate per-call timeout knobs this
/// replaces all collapse into these three values.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first (not "retries after").
    pub max_attempts: u32,
    /// Base delay for linear backoff: attempt `n` waits `n * backoff_base`
    /// before running.
    pub backoff_base: Duration,
    /// Hard deadline for each generation attempt. On expiry the in-flight
    /// request future is dropped, cancelling the network call.
    pub request_deadline: Duration,
    /// Timeout for fetching image bytes when the provider answers with a
    /// URL instead of inline data.
    pub fetch_timeout: Duration,
}

impl RetryPolicy {
    /// Backoff delay before the given attempt (1-based; attempt 1 has no
    /// delay).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt.saturating_sub(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff_base: Duration::from_secs(2),
            request_deadline: Duration::from_secs(45),
            fetch_timeout: Duration::from_secs(20),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_has_no_delay() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::ZERO);
    }

    #[test]
    fn backoff_grows_linearly() {
        let policy = RetryPolicy {
            backoff_base: Duration::from_secs(2),
            ..Default::default()
        };
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(4));
        assert_eq!(policy.backoff_delay(4), Duration::from_secs(6));
    }
}
