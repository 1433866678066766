//! Bounded retry with exponential backoff.
//!
//! Used around single vendor calls that can fail transiently. Errors the
//! caller classifies as permanent are returned on the first attempt.

use std::thread;
use std::time::Duration;
use tracing::warn;

/// Retry settings for transfer operations.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrySettings {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Initial backoff delay in milliseconds.
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Backoff multiplier (exponential backoff).
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetrySettings {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(63) as i32;
        let ms = self.initial_backoff_ms as f64 * self.backoff_multiplier.max(1.0).powi(exp);
        let capped = ms.min(self.max_backoff_ms as f64).max(0.0);
        Duration::from_millis(capped as u64)
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or
/// `max_attempts` is used up. The last error is returned.
pub fn retry_with_backoff<T, E, F, R>(settings: &RetrySettings, is_retryable: R, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Result<T, E>,
    R: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let max = settings.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max && is_retryable(&e) => {
                let delay = settings.backoff_for(attempt);
                warn!(attempt, max_attempts = max, delay_ms = delay.as_millis() as u64, error = %e, "Retrying after transient failure");
                thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
