pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod retry;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BucketName,
    BulkDeleteError,
    BulkDeleteOutcome,
    BulkDeleteRequest,
    BulkDeleteResponse,
    DeleteObjectResponse,
    DeleteOutcome,
    // Requests and outcomes
    DeleteRequest,
    DeletedObject,
    DomainValidationError,
    // Value objects
    ObjectKey,
    // Errors
    ServiceError,
    StoreError,
    StoreResult,
    TimedResult,
    VersionId,
};

// Port types - interfaces for external systems
pub use ports::{
    AuditSpan,
    AuditSpanSource,
    BulkDeleteRetryHandler,
    // Service ports
    DeleteService,
    // Storage ports
    ObjectStoreClient,
    // Capability ports
    RateLimiter,
    Statistic,
    StatisticsSink,
};

// Retry machinery
pub use retry::{RetryInvoker, RetryPolicy};

// Service implementations - business logic
pub use services::{DeleteServiceBuilder, DeleteServiceImpl};

// Application factory and configuration
pub use app::{
    create_in_memory_store, create_minio_store, create_s3_store, create_store_from_env, AppError,
    RateLimitConfig, StorageBackend, StoreBuilder, StoreConfig, StoreServices,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    limits::{TokenBucketLimiter, UnlimitedLimiter},
    retry::DefaultBulkRetryHandler,
    storage::ApacheStoreClientAdapter,
    telemetry::{InMemoryStatisticsSink, NoopAuditSpanSource, TracingAuditSpanSource},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_store, create_minio_store, create_s3_store, ApacheStoreClientAdapter,
        BucketName, BulkDeleteRequest, DeleteOutcome, DeleteRequest, DeleteService,
        DeleteServiceBuilder, DeleteServiceImpl, ObjectKey, RateLimiter, RetryPolicy, Statistic,
        StatisticsSink, StoreBuilder, StoreServices, TokenBucketLimiter, VersionId,
    };
}
