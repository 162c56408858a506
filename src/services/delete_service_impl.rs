use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::{
    domain::{
        errors::{ServiceError, StoreError, StoreResult},
        models::{
            BulkDeleteOutcome, BulkDeleteRequest, BulkDeleteResponse, DeleteOutcome, DeleteRequest,
            TimedResult,
        },
        value_objects::{BucketName, ObjectKey},
    },
    ports::{
        limits::RateLimiter,
        retry::BulkDeleteRetryHandler,
        services::DeleteService,
        storage::ObjectStoreClient,
        telemetry::{AuditSpan, AuditSpanSource, Statistic, StatisticsSink},
    },
    retry::RetryInvoker,
};

/// Repeating a delete of an already-deleted object is a no-op, so the
/// store calls issued here are safe to retry.
const DELETE_IDEMPOTENT: bool = true;

/// Implementation of DeleteService sequencing validation, rate limiting,
/// retried store invocation, and result interpretation.
///
/// Holds only immutable configuration and references to externally
/// synchronized collaborators; safe to share across tasks.
#[derive(Clone)]
pub struct DeleteServiceImpl {
    client: Arc<dyn ObjectStoreClient>,
    read_limiter: Arc<dyn RateLimiter>,
    write_limiter: Arc<dyn RateLimiter>,
    stats: Arc<dyn StatisticsSink>,
    audit: Arc<dyn AuditSpanSource>,
    bulk_retry_handler: Arc<dyn BulkDeleteRetryHandler>,
    invoker: RetryInvoker,
    bucket: BucketName,
}

impl DeleteServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client: Arc<dyn ObjectStoreClient>,
        read_limiter: Arc<dyn RateLimiter>,
        write_limiter: Arc<dyn RateLimiter>,
        stats: Arc<dyn StatisticsSink>,
        audit: Arc<dyn AuditSpanSource>,
        bulk_retry_handler: Arc<dyn BulkDeleteRetryHandler>,
        invoker: RetryInvoker,
        bucket: BucketName,
    ) -> Self {
        Self {
            client,
            read_limiter,
            write_limiter,
            stats,
            audit,
            bulk_retry_handler,
            invoker,
            bucket,
        }
    }

    /// The bucket this facade operates on
    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    /// Reject any request to delete an object where the key denotes the
    /// bucket root. Runs before any rate-limit or network activity.
    fn block_root_delete(&self, key: &ObjectKey) -> StoreResult<()> {
        if key.is_root_marker() {
            return Err(StoreError::root_delete_rejected(&self.bucket));
        }
        Ok(())
    }

    /// Classify a retried operation for the statistics sink.
    ///
    /// Throttling is counted separately from other retried errors; the
    /// classification never changes whether the operation is retried.
    fn operation_retried(&self, error: &ServiceError) {
        if error.is_throttle() {
            debug!("request throttled");
            self.stats.increment_counter(Statistic::StoreIoThrottled, 1);
            self.stats
                .add_quantile_sample(Statistic::StoreIoThrottleRate, 1);
        } else {
            self.stats.increment_counter(Statistic::StoreIoRetry, 1);
            self.stats.increment_counter(Statistic::IgnoredErrors, 1);
        }
    }
}

#[async_trait]
impl DeleteService for DeleteServiceImpl {
    async fn delete_object(
        &self,
        request: DeleteRequest,
    ) -> StoreResult<TimedResult<DeleteOutcome>> {
        self.block_root_delete(&request.key)?;

        let wait = self.write_limiter.acquire(1).await;
        self.stats
            .record_duration(Statistic::StoreIoRateLimited, true, wait);
        self.stats
            .increment_counter(Statistic::ObjectDeleteObjects, 1);
        self.stats
            .increment_counter(Statistic::ObjectDeleteRequest, 1);

        debug!(bucket = %self.bucket, key = %request.key, "deleting object");
        let operation = format!("delete {}:/{}", self.bucket, request.key);
        let client = &self.client;
        let key = &request.key;
        let version_id = request.version_id.as_ref();

        let started = Instant::now();
        let result = self
            .invoker
            .execute(
                &operation,
                DELETE_IDEMPOTENT,
                |error, _attempt| self.operation_retried(error),
                move || async move { client.delete_object(key, version_id).await },
            )
            .await;
        let elapsed = started.elapsed();
        self.stats
            .record_duration(Statistic::ObjectDeleteRequest, false, elapsed);

        match result {
            Ok(response) => Ok(TimedResult::new(elapsed, DeleteOutcome::Deleted(response))),
            Err(error) if error.is_not_found() => {
                // Third-party stores can report 404 here where others report
                // silent success; deleting an absent object is a no-op.
                debug!(key = %request.key, "object already absent");
                Ok(TimedResult::new(elapsed, DeleteOutcome::NotFound))
            }
            Err(error) => Err(StoreError::from(error)),
        }
    }

    async fn delete_objects(
        &self,
        request: BulkDeleteRequest,
    ) -> StoreResult<TimedResult<BulkDeleteOutcome>> {
        // Fail the whole call before any side effect if a single key is
        // invalid.
        for entry in request.iter() {
            self.block_root_delete(&entry.key)?;
        }

        let key_count = request.len();
        debug!(bucket = %self.bucket, keys = key_count, "initiating bulk delete");

        if request.is_empty() {
            return Ok(TimedResult::new(
                Duration::ZERO,
                BulkDeleteOutcome::new(BulkDeleteResponse::default()),
            ));
        }

        let wait = self.write_limiter.acquire(key_count as u32).await;
        self.stats
            .record_duration(Statistic::StoreIoRateLimited, true, wait);
        self.stats
            .increment_counter(Statistic::ObjectDeleteObjects, key_count as u64);
        self.stats
            .increment_counter(Statistic::ObjectBulkDeleteRequest, 1);

        let operation = format!("bulk delete {} keys from {}", key_count, self.bucket);
        let client = &self.client;
        let handler = &self.bulk_retry_handler;
        let request_ref = &request;

        let started = Instant::now();
        let result = self
            .invoker
            .execute(
                &operation,
                DELETE_IDEMPOTENT,
                move |error, _attempt| handler.bulk_delete_retried(request_ref, error),
                move || async move { client.delete_objects(request_ref).await },
            )
            .await;
        let elapsed = started.elapsed();
        self.stats
            .record_duration(Statistic::ObjectBulkDeleteRequest, false, elapsed);

        match result {
            Ok(response) => {
                if !response.errors.is_empty() {
                    debug!(
                        errors = response.errors.len(),
                        "partial failure of bulk delete"
                    );
                    for error in &response.errors {
                        debug!(key = %error.key, code = %error.code, "{}", error.message);
                    }
                }
                Ok(TimedResult::new(elapsed, BulkDeleteOutcome::new(response)))
            }
            Err(error) => Err(StoreError::from(error)),
        }
    }

    async fn acquire_read_capacity(&self, units: u32) -> Duration {
        self.read_limiter.acquire(units).await
    }

    async fn acquire_write_capacity(&self, units: u32) -> Duration {
        self.write_limiter.acquire(units).await
    }

    fn create_span(
        &self,
        operation: &str,
        path1: Option<&str>,
        path2: Option<&str>,
    ) -> StoreResult<Box<dyn AuditSpan>> {
        self.audit.create_span(operation, path1, path2)
    }
}

/// Builder for DeleteServiceImpl
pub struct DeleteServiceBuilder {
    client: Option<Arc<dyn ObjectStoreClient>>,
    read_limiter: Option<Arc<dyn RateLimiter>>,
    write_limiter: Option<Arc<dyn RateLimiter>>,
    stats: Option<Arc<dyn StatisticsSink>>,
    audit: Option<Arc<dyn AuditSpanSource>>,
    bulk_retry_handler: Option<Arc<dyn BulkDeleteRetryHandler>>,
    invoker: RetryInvoker,
    bucket: Option<BucketName>,
}

impl DeleteServiceBuilder {
    pub fn new() -> Self {
        Self {
            client: None,
            read_limiter: None,
            write_limiter: None,
            stats: None,
            audit: None,
            bulk_retry_handler: None,
            invoker: RetryInvoker::default(),
            bucket: None,
        }
    }

    pub fn client(mut self, client: Arc<dyn ObjectStoreClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn read_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.read_limiter = Some(limiter);
        self
    }

    pub fn write_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.write_limiter = Some(limiter);
        self
    }

    pub fn statistics(mut self, stats: Arc<dyn StatisticsSink>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn audit(mut self, audit: Arc<dyn AuditSpanSource>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn bulk_retry_handler(mut self, handler: Arc<dyn BulkDeleteRetryHandler>) -> Self {
        self.bulk_retry_handler = Some(handler);
        self
    }

    pub fn invoker(mut self, invoker: RetryInvoker) -> Self {
        self.invoker = invoker;
        self
    }

    pub fn bucket(mut self, bucket: BucketName) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn build(self) -> Result<DeleteServiceImpl, &'static str> {
        Ok(DeleteServiceImpl::new(
            self.client.ok_or("Store client is required")?,
            self.read_limiter.ok_or("Read rate limiter is required")?,
            self.write_limiter.ok_or("Write rate limiter is required")?,
            self.stats.ok_or("Statistics sink is required")?,
            self.audit.ok_or("Audit span source is required")?,
            self.bulk_retry_handler
                .ok_or("Bulk retry handler is required")?,
            self.invoker,
            self.bucket.ok_or("Bucket name is required")?,
        ))
    }
}

impl Default for DeleteServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
