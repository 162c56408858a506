use async_trait::async_trait;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::ports::limits::RateLimiter;

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Token-bucket rate limiter.
///
/// Tokens refill continuously at the configured rate and accumulate up to
/// the burst capacity. Acquisition always succeeds immediately in
/// bookkeeping terms; when the bucket is overdrawn the caller sleeps until
/// the balance would be non-negative again, so a large request delays
/// later callers rather than deadlocking.
pub struct TokenBucketLimiter {
    state: Mutex<BucketState>,
    refill_per_second: f64,
    burst: f64,
}

impl TokenBucketLimiter {
    /// Create a limiter with `rate_per_second` sustained capacity and an
    /// equal burst
    pub fn new(rate_per_second: u32) -> Self {
        Self::with_burst(rate_per_second, rate_per_second)
    }

    pub fn with_burst(rate_per_second: u32, burst: u32) -> Self {
        let rate = f64::from(rate_per_second.max(1));
        Self {
            state: Mutex::new(BucketState {
                tokens: f64::from(burst),
                last_refill: Instant::now(),
            }),
            refill_per_second: rate,
            burst: f64::from(burst),
        }
    }
}

#[async_trait]
impl RateLimiter for TokenBucketLimiter {
    async fn acquire(&self, units: u32) -> Duration {
        if units == 0 {
            return Duration::ZERO;
        }

        let wait = {
            let mut state = self.state.lock().unwrap();
            let now = Instant::now();
            let elapsed = now.duration_since(state.last_refill);
            state.tokens =
                (state.tokens + elapsed.as_secs_f64() * self.refill_per_second).min(self.burst);
            state.last_refill = now;
            state.tokens -= f64::from(units);
            if state.tokens >= 0.0 {
                Duration::ZERO
            } else {
                Duration::from_secs_f64(-state.tokens / self.refill_per_second)
            }
        };

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        wait
    }
}

/// Rate limiter that never blocks, for configurations without throughput
/// bounds
pub struct UnlimitedLimiter;

#[async_trait]
impl RateLimiter for UnlimitedLimiter {
    async fn acquire(&self, _units: u32) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_acquire_within_burst_is_immediate() {
        let limiter = TokenBucketLimiter::new(1000);
        assert_eq!(limiter.acquire(100).await, Duration::ZERO);
        assert_eq!(limiter.acquire(900).await, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_overdraw_waits_for_refill() {
        let limiter = TokenBucketLimiter::new(1000);
        limiter.acquire(1000).await;

        let started = Instant::now();
        let wait = limiter.acquire(20).await;
        assert!(wait > Duration::ZERO);
        // 20 tokens at 1000/s is ~20ms
        assert!(started.elapsed() >= Duration::from_millis(15));
    }

    #[tokio::test]
    async fn test_zero_units_never_waits() {
        let limiter = TokenBucketLimiter::new(1);
        assert_eq!(limiter.acquire(0).await, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_unlimited_limiter() {
        let limiter = UnlimitedLimiter;
        for _ in 0..100 {
            assert_eq!(limiter.acquire(1_000_000).await, Duration::ZERO);
        }
    }
}
