mod bulk_retry;

pub use bulk_retry::DefaultBulkRetryHandler;
