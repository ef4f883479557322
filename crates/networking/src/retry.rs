//! Retry with exponential backoff and jitter
//!
//! Only transient failures (see [`NetworkError::is_retryable`]) are retried.
//! Each delay is randomized by the jitter factor so that clients that failed
//! together do not retry together.

use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use std::future::Future;
use std::time::Duration;

use crate::{NetworkError, Result};

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt
    pub max_retries: usize,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Backoff multiplier (e.g., 2.0 for exponential backoff)
    pub multiplier: f64,
    /// Randomization factor in `[0, 1]`; a delay `d` becomes `d * (1 ± jitter)`
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
            jitter: 0.5,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given retry budget
    pub fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Never retry
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Set the initial delay
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the jitter factor (clamped to `[0, 1]`)
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_delay)
            .with_max_interval(self.max_delay)
            .with_multiplier(self.multiplier)
            .with_randomization_factor(self.jitter)
            .with_max_elapsed_time(None)
            .build()
    }

    /// Run `operation`, retrying transient failures within the budget
    ///
    /// # Examples
    /// ```
    /// use networking::{NetworkError, RetryPolicy};
    ///
    /// async fn example() -> Result<u16, NetworkError> {
    ///     RetryPolicy::new(2)
    ///         .run(|| async {
    ///             // Your network operation here
    ///             Ok(200)
    ///         })
    ///         .await
    /// }
    /// ```
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_retries = self.max_retries;
        let mut attempt = 0usize;

        backoff::future::retry(self.backoff(), || {
            attempt += 1;
            let current = attempt;
            let fut = operation();
            async move {
                fut.await.map_err(|err| classify(err, current, max_retries))
            }
        })
        .await
    }
}

fn classify(err: NetworkError, attempt: usize, max_retries: usize) -> backoff::Error<NetworkError> {
    if err.is_retryable() && attempt <= max_retries {
        tracing::warn!(attempt, max_retries, error = %err, "Request failed, retrying");
        backoff::Error::transient(err)
    } else {
        backoff::Error::permanent(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast(max_retries: usize) -> RetryPolicy {
        RetryPolicy::new(max_retries).with_initial_delay(Duration::from_millis(10))
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.initial_delay, Duration::from_millis(250));
        assert!(policy.jitter > 0.0);
    }

    #[test]
    fn test_jitter_is_clamped() {
        assert_eq!(RetryPolicy::new(1).with_jitter(3.0).jitter, 1.0);
        assert_eq!(RetryPolicy::new(1).with_jitter(-1.0).jitter, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_attempt() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();

        let result = fast(3)
            .run(|| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok("success")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "success");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_transient_failure() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();

        let result = fast(2)
            .run(|| {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(NetworkError::Timeout)
                    } else {
                        Ok("success")
                    }
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_not_retried() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();

        let result: Result<()> = fast(3)
            .run(|| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(NetworkError::Status {
                        status: 400,
                        body: "bad request".to_string(),
                    })
                }
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(400));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_exhausted() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();

        let result: Result<()> = fast(2)
            .run(|| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(NetworkError::Status {
                        status: 503,
                        body: String::new(),
                    })
                }
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(503));
        assert_eq!(counter.load(Ordering::SeqCst), 3); // Initial + 2 retries
    }

    #[tokio::test(start_paused = true)]
    async fn test_none_policy_single_attempt() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();

        let result: Result<()> = RetryPolicy::none()
            .run(|| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(NetworkError::Timeout)
                }
            })
            .await;

        assert!(matches!(result, Err(NetworkError::Timeout)));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
