use std::time::Duration;

use crate::ClientOptions;

/// Classification of an HTTP status code for the retry loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusClass {
    /// 200..=226
    Success,
    /// 500..=511
    Retryable,
    /// Everything else.
    Terminal,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        match status {
            200..=226 => Self::Success,
            500..=511 => Self::Retryable,
            _ => Self::Terminal,
        }
    }
}

/// Attempt budget, inter-attempt delay and per-attempt timeout shared by
/// every request of one client.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    max_attempts: usize,
    delay: Duration,
    timeout: Option<Duration>,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay: Duration, timeout: Option<Duration>) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            timeout: timeout.filter(|timeout| !timeout.is_zero()),
        }
    }

    /// Total attempts, first one included.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Timeout applied afresh to every attempt; `None` means unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Delay to wait after the 1-based `attempt` failed with a retryable
    /// status, or `None` when it was the last allowed attempt.
    pub fn delay_after(&self, attempt: usize) -> Option<Duration> {
        (attempt < self.max_attempts).then_some(self.delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ClientOptions::default())
    }
}

impl From<&ClientOptions> for RetryPolicy {
    fn from(options: &ClientOptions) -> Self {
        Self::new(
            options.retry_max_attempts,
            Duration::from_millis(options.retry_delay_ms),
            Some(Duration::from_millis(options.timeout_ms)),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{RetryPolicy, StatusClass};
    use crate::ClientOptions;

    #[test]
    fn classifies_inclusive_ranges() {
        assert_eq!(StatusClass::of(199), StatusClass::Terminal);
        assert_eq!(StatusClass::of(200), StatusClass::Success);
        assert_eq!(StatusClass::of(226), StatusClass::Success);
        assert_eq!(StatusClass::of(227), StatusClass::Terminal);
        assert_eq!(StatusClass::of(302), StatusClass::Terminal);
        assert_eq!(StatusClass::of(400), StatusClass::Terminal);
        assert_eq!(StatusClass::of(499), StatusClass::Terminal);
        assert_eq!(StatusClass::of(500), StatusClass::Retryable);
        assert_eq!(StatusClass::of(511), StatusClass::Retryable);
        assert_eq!(StatusClass::of(512), StatusClass::Terminal);
    }

    #[test]
    fn no_delay_after_final_attempt() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2), None);
        assert_eq!(policy.delay_after(1), Some(Duration::from_secs(2)));
        assert_eq!(policy.delay_after(2), Some(Duration::from_secs(2)));
        assert_eq!(policy.delay_after(3), None);
    }

    #[test]
    fn single_attempt_never_waits() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.delay_after(1), None);
    }

    #[test]
    fn zero_attempts_clamp_to_one() {
        let policy = RetryPolicy::new(0, Duration::ZERO, None);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let policy = RetryPolicy::from(&ClientOptions::default());
        assert_eq!(policy.timeout(), None);
        assert_eq!(policy.delay(), Duration::from_secs(2));

        let policy = RetryPolicy::from(&ClientOptions {
            timeout_ms: 5_000,
            ..ClientOptions::default()
        });
        assert_eq!(policy.timeout(), Some(Duration::from_secs(5)));
    }
}
