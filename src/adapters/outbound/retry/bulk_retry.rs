use std::sync::Arc;
use tracing::debug;

use crate::{
    domain::{errors::ServiceError, models::BulkDeleteRequest},
    ports::{
        retry::BulkDeleteRetryHandler,
        telemetry::{Statistic, StatisticsSink},
    },
};

/// Default handler for retried bulk deletes.
///
/// A throttled bulk call was rejected for its aggregate size, so the
/// throttle counter advances by the key count rather than by one; other
/// errors are counted like any retried operation.
pub struct DefaultBulkRetryHandler {
    stats: Arc<dyn StatisticsSink>,
}

impl DefaultBulkRetryHandler {
    pub fn new(stats: Arc<dyn StatisticsSink>) -> Self {
        Self { stats }
    }
}

impl BulkDeleteRetryHandler for DefaultBulkRetryHandler {
    fn bulk_delete_retried(&self, request: &BulkDeleteRequest, error: &ServiceError) {
        let key_count = request.len() as u64;
        if error.is_throttle() {
            debug!(keys = key_count, "bulk delete throttled");
            self.stats
                .increment_counter(Statistic::StoreIoThrottled, key_count);
            self.stats
                .add_quantile_sample(Statistic::StoreIoThrottleRate, 1);
        } else {
            debug!(keys = key_count, error = %error, "bulk delete retried");
            self.stats.increment_counter(Statistic::StoreIoRetry, 1);
            self.stats.increment_counter(Statistic::IgnoredErrors, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::telemetry::InMemoryStatisticsSink;

    #[test]
    fn test_throttle_counted_per_key() {
        let stats = Arc::new(InMemoryStatisticsSink::new());
        let handler = DefaultBulkRetryHandler::new(stats.clone());
        let request = BulkDeleteRequest::from_keys(["a", "b", "c", "d"]);

        handler.bulk_delete_retried(
            &request,
            &ServiceError::Throttled {
                message: "slow down".to_string(),
            },
        );

        assert_eq!(stats.counter(Statistic::StoreIoThrottled), 4);
        assert_eq!(stats.samples(Statistic::StoreIoThrottleRate).len(), 1);
        assert_eq!(stats.counter(Statistic::StoreIoRetry), 0);
        assert_eq!(stats.counter(Statistic::IgnoredErrors), 0);
    }

    #[test]
    fn test_other_errors_counted_once() {
        let stats = Arc::new(InMemoryStatisticsSink::new());
        let handler = DefaultBulkRetryHandler::new(stats.clone());
        let request = BulkDeleteRequest::from_keys(["a", "b"]);

        handler.bulk_delete_retried(&request, &ServiceError::Timeout);

        assert_eq!(stats.counter(Statistic::StoreIoThrottled), 0);
        assert_eq!(stats.counter(Statistic::StoreIoRetry), 1);
        assert_eq!(stats.counter(Statistic::IgnoredErrors), 1);
    }
}
