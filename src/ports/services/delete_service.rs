use async_trait::async_trait;
use std::time::Duration;

use crate::{
    domain::{
        errors::StoreResult,
        models::{BulkDeleteOutcome, BulkDeleteRequest, DeleteOutcome, DeleteRequest, TimedResult},
    },
    ports::telemetry::AuditSpan,
};

/// Port for the delete surface of the store facade.
///
/// Both operations are re-entrant; any number of tasks may call them
/// concurrently. Rate-limit acquisition always precedes the network call
/// within one operation.
#[async_trait]
pub trait DeleteService: Send + Sync + 'static {
    /// Delete one object.
    ///
    /// Deleting an absent object succeeds with [`DeleteOutcome::NotFound`];
    /// only unrecognized service errors fail the call.
    async fn delete_object(&self, request: DeleteRequest)
        -> StoreResult<TimedResult<DeleteOutcome>>;

    /// Delete a batch of objects in one store call, best effort.
    ///
    /// Per-object failures are reported inside the outcome, not raised.
    async fn delete_objects(
        &self,
        request: BulkDeleteRequest,
    ) -> StoreResult<TimedResult<BulkDeleteOutcome>>;

    /// Acquire read capacity, returning the time spent waiting
    async fn acquire_read_capacity(&self, units: u32) -> Duration;

    /// Acquire write capacity, returning the time spent waiting
    async fn acquire_write_capacity(&self, units: u32) -> Duration;

    /// Start an audit span for an operation (pass-through to the span source)
    fn create_span(
        &self,
        operation: &str,
        path1: Option<&str>,
        path2: Option<&str>,
    ) -> StoreResult<Box<dyn AuditSpan>>;
}
