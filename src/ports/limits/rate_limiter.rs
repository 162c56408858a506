use async_trait::async_trait;
use std::time::Duration;

/// Port for token-bucket capacity acquisition.
///
/// Implementations are externally synchronized and shared by many
/// concurrent callers; `acquire` may suspend the caller until capacity is
/// available and returns the time spent waiting.
#[async_trait]
pub trait RateLimiter: Send + Sync + 'static {
    /// Acquire `units` of capacity, blocking until available
    async fn acquire(&self, units: u32) -> Duration;
}
