//! Bounded retry loop shared by every polling component

use crate::errors::{SharedError, SharedResult};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Interval and attempt budget for [`wait_for`]
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Interval multiplier applied after each failed attempt; 1 keeps it fixed
    pub backoff_factor: u32,
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 60,
            backoff_factor: 1,
            max_interval: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn fixed(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            backoff_factor: 1,
            max_interval: interval,
        }
    }

    pub fn exponential(interval: Duration, max_attempts: u32, max_interval: Duration) -> Self {
        Self {
            interval,
            max_attempts,
            backoff_factor: 2,
            max_interval,
        }
    }

    /// Delay to sleep after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        if self.backoff_factor <= 1 {
            return self.interval;
        }
        let multiplier = self
            .backoff_factor
            .checked_pow(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.interval
            .checked_mul(multiplier)
            .map_or(self.max_interval, |delay| delay.min(self.max_interval))
    }
}

/// Run `check` until it reports success or the policy's attempt budget is used
///
/// `check` receives the 1-based attempt number. Returns the number of attempts
/// it took to succeed. No delay is inserted after the final failed attempt.
pub async fn wait_for<F, Fut>(policy: &RetryPolicy, mut check: F) -> SharedResult<u32>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = bool>,
{
    let started = Instant::now();
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        if check(attempt).await {
            return Ok(attempt);
        }
        if attempt < max_attempts {
            sleep(policy.delay_after(attempt)).await;
        }
    }

    Err(SharedError::RetryExhausted {
        attempts: max_attempts,
        elapsed: started.elapsed(),
    })
}
