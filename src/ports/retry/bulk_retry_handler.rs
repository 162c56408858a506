use crate::domain::{errors::ServiceError, models::BulkDeleteRequest};

/// Port invoked on every retry of a bulk delete call.
///
/// A bulk delete can partially complete before failing; deciding how to
/// treat that state on retry takes store-specific knowledge, so the whole
/// decision is delegated here. The facade only guarantees the handler sees
/// the original request and the triggering error once per retry attempt.
pub trait BulkDeleteRetryHandler: Send + Sync + 'static {
    /// Called before each retry of a bulk delete
    fn bulk_delete_retried(&self, request: &BulkDeleteRequest, error: &ServiceError);
}
