//! Bounded retry for transient transport failures
//!
//! The transport retries an operation a fixed number of total attempts with
//! a fixed inter-attempt delay. Whether an error is worth retrying is the
//! caller's decision, passed in as a predicate; deterministic failures
//! (build, validation, decoding) short-circuit immediately.

use std::time::Duration;
use tokio::time::sleep;

/// Retry configuration for transient failures
///
/// # Default Values
///
/// - `max_attempts`: 3 (total attempts, including the first)
/// - `delay`: 200ms (fixed between attempts)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy {
    /// Create a policy with the default attempt bound and delay
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(200),
        }
    }

    /// Set the total attempt bound
    ///
    /// A bound of zero is treated as one: the operation always runs at
    /// least once.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the fixed inter-attempt delay
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Retry an async operation under a policy
///
/// Runs `operation` up to `policy.max_attempts` times, sleeping
/// `policy.delay` between attempts. The first success is returned; a
/// failure for which `is_retryable` returns `false` is returned
/// immediately; once the attempt bound is reached the last error is
/// surfaced.
///
/// # Errors
///
/// Returns the operation's error when it is not retryable or when the
/// attempt bound is exhausted.
///
/// # Example
///
/// ```rust
/// use roster_transport::retry::{RetryPolicy, retry_with_policy};
///
/// # async fn example() -> Result<(), String> {
/// let policy = RetryPolicy::default();
///
/// let value = retry_with_policy(
///     &policy,
///     || async { Ok::<_, String>(42) },
///     |err: &String| err.contains("transient"),
/// )
/// .await?;
///
/// assert_eq!(value, 42);
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_policy<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    mut operation: F,
    is_retryable: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempt, "operation succeeded after retry");
                }
                return Ok(result);
            },
            Err(err) => {
                if !is_retryable(&err) {
                    tracing::warn!(
                        error = %err,
                        "error is not retryable, failing immediately"
                    );
                    return Err(err);
                }

                if attempt >= max_attempts {
                    tracing::error!(
                        attempt,
                        error = %err,
                        "operation failed after max attempts"
                    );
                    return Err(err);
                }

                tracing::warn!(
                    attempt,
                    delay_ms = policy.delay.as_millis(),
                    error = %err,
                    "operation failed, retrying"
                );

                sleep(policy.delay).await;
                attempt += 1;
            },
        }
    }
}
