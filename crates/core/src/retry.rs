//! Retry logic with exponential backoff
//!
//! Used for remote sample acquisition, where a transient connect failure or a
//! 5xx response should not abort the whole run.
//!
//! # Example
//!
//! ```rust,no_run
//! use codecbench_core::retry::{retry_async, RetryConfig};
//!
//! # async fn demo() {
//! let result = retry_async(
//!     &RetryConfig::default(),
//!     |_err: &std::io::Error| true,
//!     || async { Ok::<_, std::io::Error>("payload") },
//! )
//! .await;
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add random jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Default backoff with a specific attempt budget
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Create a config with no retries
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// Calculate delay for a given attempt
    #[allow(clippy::cast_possible_wrap)]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_delay =
            self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(attempt as i32 - 1);

        let delay_secs = base_delay.min(self.max_delay.as_secs_f64());

        let final_delay = if self.jitter {
            // Up to 25% extra
            let jitter_factor = 1.0 + (rand_simple() * 0.25);
            delay_secs * jitter_factor
        } else {
            delay_secs
        };

        Duration::from_secs_f64(final_delay)
    }
}

/// Simple pseudo-random number generator (0.0 to 1.0)
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn rand_simple() -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let state = RandomState::new();
    let mut hasher = state.build_hasher();
    hasher.write_u64(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64,
    );
    (hasher.finish() % 1000) as f64 / 1000.0
}

/// Retry result with attempt information
#[derive(Debug)]
pub struct RetryResult<T> {
    /// The successful result
    pub value: T,
    /// Number of attempts made
    pub attempts: u32,
    /// Total time spent, including backoff
    pub total_duration: Duration,
}

/// Final failure after the attempt budget ran out or a permanent error occurred
#[derive(Debug)]
pub struct RetryFailure<E> {
    /// The last error observed
    pub error: E,
    /// Number of attempts made
    pub attempts: u32,
}

/// Run an async operation, retrying errors that `is_retryable` accepts.
///
/// Errors rejected by `is_retryable` are returned immediately.
pub async fn retry_async<F, Fut, T, E>(
    config: &RetryConfig,
    is_retryable: impl Fn(&E) -> bool,
    mut operation: F,
) -> Result<RetryResult<T>, RetryFailure<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let start = Instant::now();
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            tokio::time::sleep(config.delay_for_attempt(attempt)).await;
        }
        attempt += 1;

        match operation().await {
            Ok(value) => {
                return Ok(RetryResult {
                    value,
                    attempts: attempt,
                    total_duration: start.elapsed(),
                });
            }
            Err(error) => {
                if attempt >= max_attempts || !is_retryable(&error) {
                    return Err(RetryFailure {
                        error,
                        attempts: attempt,
                    });
                }
                tracing::debug!(attempt, max_attempts, error = %error, "Retrying after failure");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            jitter: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_retry_success_first_attempt() {
        let result = retry_async(&RetryConfig::default(), |_: &String| true, || async {
            Ok::<_, String>("success")
        })
        .await
        .unwrap();

        assert_eq!(result.value, "success");
        assert_eq!(result.attempts, 1);
    }

    #[tokio::test]
    async fn test_retry_success_after_failures() {
        let calls = Cell::new(0);
        let result = retry_async(&fast(), |_: &String| true, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 3 {
                    Err("not yet".to_string())
                } else {
                    Ok("success")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result.value, "success");
        assert_eq!(result.attempts, 3);
    }

    #[tokio::test]
    async fn test_retry_all_failures() {
        let failure = retry_async(&fast(), |_: &String| true, || async {
            Err::<(), _>("always fails".to_string())
        })
        .await
        .unwrap_err();

        assert_eq!(failure.attempts, 3);
        assert_eq!(failure.error, "always fails");
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let calls = Cell::new(0);
        let failure = retry_async(&fast(), |_: &String| false, || {
            calls.set(calls.get() + 1);
            async { Err::<(), _>("bad request".to_string()) }
        })
        .await
        .unwrap_err();

        assert_eq!(failure.attempts, 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_delay_calculation() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: false,
            ..Default::default()
        };

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(400));
    }

    #[test]
    fn test_delay_capped() {
        let config = RetryConfig {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(2),
            jitter: false,
            ..Default::default()
        };
        assert_eq!(config.delay_for_attempt(5), Duration::from_secs(2));
    }
}
