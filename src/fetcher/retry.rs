//! Bounded retry with linear backoff

use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Retry policy for outbound requests
///
/// After failed attempt `n` (1-based) the caller waits `n * base_delay`
/// before trying again, so the default policy waits 1s, then 2s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; zero behaves as one
    pub max_attempts: u32,

    /// Backoff unit
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Same backoff, different attempt budget
    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }

    /// Number of attempts that will actually be made
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after the given failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Longest time a request can spend failing under this policy
    ///
    /// Every attempt runs for the full `per_attempt` timeout and every
    /// backoff between attempts is slept out.
    pub fn worst_case(&self, per_attempt: Duration) -> Duration {
        let attempts = self.attempts();
        let backoff_units = attempts * (attempts - 1) / 2;

        per_attempt
            .saturating_mul(attempts)
            .saturating_add(self.base_delay.saturating_mul(backoff_units))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Runs `operation` until it succeeds or the policy's attempts are used up
///
/// The operation receives the 1-based attempt number. Every failure except
/// the last is logged and followed by a backoff sleep; the last failure is
/// returned to the caller unchanged.
///
/// # Arguments
///
/// * `policy` - Attempt budget and backoff unit
/// * `label` - What is being attempted, for log lines (usually the URL)
/// * `operation` - Produces one attempt's future
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!("{} succeeded on attempt {}/{}", label, attempt, attempts);
                }
                return Ok(value);
            }
            Err(e) if attempt < attempts => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                    attempt,
                    attempts,
                    label,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
