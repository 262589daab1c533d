//! Retry policy and circuit breaker for flaky remote calls
//!
//! Backoff is exponential with a small random jitter, capped at `max_delay`.
//! The circuit breaker stops calling a collaborator that keeps failing, so a
//! dead translation service costs `threshold` timeouts instead of one per row.

use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use super::config::TranslationConfig;

/// Classifies an error as worth retrying
pub trait RetryableError {
    fn is_recoverable(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.retry_base_delay_ms),
            Duration::from_millis(config.retry_max_delay_ms),
        )
    }

    /// Delay before retry number `attempt` (1-based): base * 2^(attempt-1) + jitter
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let exponential = self.base_delay.saturating_mul(1u32 << exponent);
        let jitter_ceiling = (self.base_delay.as_millis() as u64 / 4).max(1);
        let jitter = Duration::from_millis(fastrand::u64(0..jitter_ceiling));
        exponential.saturating_add(jitter).min(self.max_delay)
    }

    /// Run `operation`, retrying recoverable errors up to `max_retries` times
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        E: RetryableError + std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_recoverable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.backoff(attempt);
                    debug!("Retry {}/{} in {:?} after: {}", attempt, self.max_retries, delay, e);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&TranslationConfig::default())
    }
}

/// Opens after `threshold` consecutive failures and stays open for the run
#[derive(Debug)]
pub struct CircuitBreaker {
    threshold: u32,
    consecutive_failures: AtomicU32,
}

impl CircuitBreaker {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            consecutive_failures: AtomicU32::new(0),
        }
    }

    /// A threshold of 0 disables the breaker
    pub fn is_open(&self) -> bool {
        self.threshold > 0 && self.consecutive_failures() >= self.threshold
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    pub fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        if self.threshold > 0 && failures == self.threshold {
            warn!("Circuit opened after {} consecutive failures", failures);
        }
    }
}
