//! Retry assertions with polling.
//!
//! Auto-retrying checks for eventually-consistent UI state. Every
//! verification and every action of the page object goes through here, so
//! nothing in the suite sleeps for a fixed time.

use super::AssertionCheckResult;
use crate::config::E2eConfig;
use crate::result::{TodoError, TodoResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total timeout duration
    pub timeout: Duration,
    /// Interval between retry attempts
    pub poll_interval: Duration,
    /// Maximum number of attempts (0 = unlimited within timeout)
    pub max_retries: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from_config(&E2eConfig::default())
    }
}

impl RetryConfig {
    /// Create a new retry config with timeout
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(100),
            max_retries: 0,
        }
    }

    /// Expectation timing of a suite configuration
    #[must_use]
    pub const fn from_config(config: &E2eConfig) -> Self {
        Self {
            timeout: config.expect_timeout(),
            poll_interval: config.poll_interval(),
            max_retries: 0,
        }
    }

    /// Set the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set maximum attempts
    #[must_use]
    pub const fn with_max_retries(mut self, max: usize) -> Self {
        self.max_retries = max;
        self
    }

    /// Create a fast config (short timeout, fast polling)
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            timeout: Duration::from_millis(500),
            poll_interval: Duration::from_millis(20),
            max_retries: 0,
        }
    }

    fn exhausted(&self, attempts: usize, start: Instant) -> bool {
        start.elapsed() >= self.timeout || (self.max_retries > 0 && attempts >= self.max_retries)
    }
}

/// Result of a successful retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryResult {
    /// Number of attempts before success
    pub attempts: usize,
    /// Total duration of all attempts
    pub duration: Duration,
}

enum LastFailure {
    Mismatch { expected: String, actual: String },
    Error(TodoError),
}

/// Re-run `check` until it passes.
///
/// Retryable errors (see [`TodoError::is_retryable`]) count as a failed
/// attempt; any other error aborts at once. When time runs out the last
/// mismatch becomes `AssertionFailed`, or the last error is returned as is.
///
/// # Errors
///
/// Returns the final failure once the config is exhausted
pub async fn poll_until<F, Fut>(
    config: &RetryConfig,
    description: &str,
    mut check: F,
) -> TodoResult<RetryResult>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TodoResult<AssertionCheckResult>>,
{
    let start = Instant::now();
    let mut attempts = 0;
    loop {
        attempts += 1;
        let failure = match check().await {
            Ok(AssertionCheckResult::Pass) => {
                return Ok(RetryResult {
                    attempts,
                    duration: start.elapsed(),
                })
            }
            Ok(AssertionCheckResult::Fail { expected, actual }) => {
                LastFailure::Mismatch { expected, actual }
            }
            Err(e) if e.is_retryable() => LastFailure::Error(e),
            Err(e) => return Err(e),
        };

        if config.exhausted(attempts, start) {
            return Err(match failure {
                LastFailure::Mismatch { expected, actual } => TodoError::AssertionFailed {
                    description: description.to_string(),
                    expected,
                    actual,
                    attempts,
                    elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                },
                LastFailure::Error(e) => e,
            });
        }

        trace!(description, attempts, "check not satisfied yet");
        tokio::time::sleep(config.poll_interval).await;
    }
}

/// Re-run an action until it stops failing with a retryable error.
///
/// This is the auto-wait in front of every click, fill and key press: the
/// target may not be attached or visible yet.
///
/// # Errors
///
/// Returns the last error once the config is exhausted, or the first
/// non-retryable error
pub async fn poll_action<T, F, Fut>(config: &RetryConfig, mut action: F) -> TodoResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TodoResult<T>>,
{
    let start = Instant::now();
    let mut attempts = 0;
    loop {
        attempts += 1;
        match action().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && !config.exhausted(attempts, start) => {
                trace!(error = %e, attempts, "action not possible yet");
                tokio::time::sleep(config.poll_interval).await;
            }
            Err(e) => return Err(e),
        }
    }
}
