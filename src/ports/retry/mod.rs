mod bulk_retry_handler;

pub use bulk_retry_handler::BulkDeleteRetryHandler;
