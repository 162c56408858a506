use std::time::Duration;

/// Metrics tracked by the delete facade, each with a stable symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Single-object delete requests issued
    ObjectDeleteRequest,
    /// Bulk delete requests issued
    ObjectBulkDeleteRequest,
    /// Objects submitted for deletion, across both paths
    ObjectDeleteObjects,
    /// Time spent waiting on rate-limit capacity
    StoreIoRateLimited,
    /// Retries of operations for reasons other than throttling
    StoreIoRetry,
    /// Throttled operations
    StoreIoThrottled,
    /// Sampled throttle rate
    StoreIoThrottleRate,
    /// Errors swallowed by the retry machinery
    IgnoredErrors,
}

impl Statistic {
    /// Stable symbol used as the metric key
    pub fn symbol(&self) -> &'static str {
        match self {
            Statistic::ObjectDeleteRequest => "object_delete_request",
            Statistic::ObjectBulkDeleteRequest => "object_bulk_delete_request",
            Statistic::ObjectDeleteObjects => "object_delete_objects",
            Statistic::StoreIoRateLimited => "store_io_rate_limited",
            Statistic::StoreIoRetry => "store_io_retry",
            Statistic::StoreIoThrottled => "store_io_throttled",
            Statistic::StoreIoThrottleRate => "store_io_throttle_rate",
            Statistic::IgnoredErrors => "ignored_errors",
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Port for the statistics/instrumentation backend.
///
/// All methods are synchronous fire-and-forget; implementations are
/// externally synchronized process-lifetime singletons.
pub trait StatisticsSink: Send + Sync + 'static {
    /// Increment a counter by `count`
    fn increment_counter(&self, statistic: Statistic, count: u64);

    /// Record the duration of an operation, flagged when the time was
    /// spent waiting on a rate limiter rather than on the store
    fn record_duration(&self, statistic: Statistic, rate_limited: bool, duration: Duration);

    /// Add one sample to a quantile-tracked metric
    fn add_quantile_sample(&self, statistic: Statistic, value: u64);
}
