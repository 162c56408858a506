use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::domain::errors::ServiceError;

/// Retry schedule for store operations
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following attempt number `attempt` (1-based)
    fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32);
        let multiplier = self.backoff_multiplier.powi(exponent as i32);
        self.initial_delay.mul_f64(multiplier).min(self.max_delay)
    }
}

/// Executes a unit of work under a retry policy, invoking a supplied
/// callback before every retry attempt.
///
/// Retries happen only when the work is idempotent and the error is
/// classified retryable; the terminal error is returned unchanged. The
/// callback is observational and never alters the retry decision.
#[derive(Debug, Clone, Default)]
pub struct RetryInvoker {
    policy: RetryPolicy,
}

impl RetryInvoker {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `work`, retrying per policy.
    ///
    /// `on_retry` is invoked exactly once per retry attempt, before the
    /// backoff sleep, with the triggering error and the 1-based number of
    /// the attempt that just failed.
    pub async fn execute<T, F, Fut>(
        &self,
        operation: &str,
        idempotent: bool,
        on_retry: impl Fn(&ServiceError, u32),
        mut work: F,
    ) -> Result<T, ServiceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let mut attempt: u32 = 1;
        loop {
            match work().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !idempotent || !error.is_retryable() || attempt >= self.policy.max_attempts {
                        return Err(error);
                    }
                    debug!(operation, attempt, error = %error, "retrying operation");
                    on_retry(&error, attempt);
                    tokio::time::sleep(self.policy.delay_for(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            backoff_multiplier: 2.0,
        }
    }

    fn transient() -> ServiceError {
        ServiceError::Timeout
    }

    fn terminal() -> ServiceError {
        ServiceError::AccessDenied {
            key: crate::domain::value_objects::ObjectKey::new("k"),
        }
    }

    #[tokio::test]
    async fn test_success_first_try_no_callback() {
        let invoker = RetryInvoker::new(quick_policy(3));
        let callbacks = AtomicU32::new(0);
        let result = invoker
            .execute(
                "op",
                true,
                |_, _| {
                    callbacks.fetch_add(1, Ordering::SeqCst);
                },
                || async { Ok::<_, ServiceError>(42) },
            )
            .await
            .unwrap();
        assert_eq!(result, 42);
        assert_eq!(callbacks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let invoker = RetryInvoker::new(quick_policy(5));
        let calls = AtomicU32::new(0);
        let callbacks = AtomicU32::new(0);
        let calls_ref = &calls;
        let result = invoker
            .execute(
                "op",
                true,
                |_, _| {
                    callbacks.fetch_add(1, Ordering::SeqCst);
                },
                move || async move {
                    if calls_ref.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(transient())
                    } else {
                        Ok("done")
                    }
                },
            )
            .await
            .unwrap();
        assert_eq!(result, "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // one classification per retry attempt
        assert_eq!(callbacks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_immediately() {
        let invoker = RetryInvoker::new(quick_policy(5));
        let calls = AtomicU32::new(0);
        let calls_ref = &calls;
        let result: Result<(), _> = invoker
            .execute(
                "op",
                true,
                |_, _| panic!("no retries expected"),
                move || async move {
                    calls_ref.fetch_add(1, Ordering::SeqCst);
                    Err(terminal())
                },
            )
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_idempotent_work_never_retried() {
        let invoker = RetryInvoker::new(quick_policy(5));
        let calls = AtomicU32::new(0);
        let calls_ref = &calls;
        let result: Result<(), _> = invoker
            .execute(
                "op",
                false,
                |_, _| panic!("no retries expected"),
                move || async move {
                    calls_ref.fetch_add(1, Ordering::SeqCst);
                    Err(transient())
                },
            )
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_terminal_error() {
        let invoker = RetryInvoker::new(quick_policy(3));
        let calls = AtomicU32::new(0);
        let calls_ref = &calls;
        let result: Result<(), _> = invoker
            .execute(
                "op",
                true,
                |_, _| {},
                move || async move {
                    calls_ref.fetch_add(1, Ordering::SeqCst);
                    Err(transient())
                },
            )
            .await;
        match result {
            Err(ServiceError::Timeout) => {}
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_backoff_growth_and_cap() {
        let policy = RetryPolicy {
            max_attempts: 10,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(4), Duration::from_millis(500));
        assert_eq!(policy.delay_for(9), Duration::from_millis(500));
    }
}
