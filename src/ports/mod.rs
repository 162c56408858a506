pub mod limits;
pub mod retry;
pub mod services;
pub mod storage;
pub mod telemetry;

// Re-export all port traits for convenience
pub use limits::RateLimiter;
pub use retry::BulkDeleteRetryHandler;
pub use services::DeleteService;
pub use storage::ObjectStoreClient;
pub use telemetry::{AuditSpan, AuditSpanSource, Statistic, StatisticsSink};
