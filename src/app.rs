use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::ObjectStore as ApacheObjectStore;
use std::sync::Arc;

use crate::{
    adapters::outbound::{
        limits::{TokenBucketLimiter, UnlimitedLimiter},
        retry::DefaultBulkRetryHandler,
        storage::ApacheStoreClientAdapter,
        telemetry::{InMemoryStatisticsSink, TracingAuditSpanSource},
    },
    domain::value_objects::BucketName,
    ports::limits::RateLimiter,
    retry::{RetryInvoker, RetryPolicy},
    services::DeleteServiceImpl,
};

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory {
        bucket: String,
    },
    S3 {
        bucket: String,
        region: String,
        access_key: Option<String>,
        secret_key: Option<String>,
    },
    MinIO {
        endpoint: String,
        bucket: String,
        access_key: String,
        secret_key: String,
        use_ssl: bool,
    },
}

impl StorageBackend {
    fn bucket(&self) -> &str {
        match self {
            StorageBackend::InMemory { bucket } => bucket,
            StorageBackend::S3 { bucket, .. } => bucket,
            StorageBackend::MinIO { bucket, .. } => bucket,
        }
    }
}

/// Read/write throughput bounds; None leaves a direction unlimited
#[derive(Debug, Clone, Default)]
pub struct RateLimitConfig {
    pub read_per_second: Option<u32>,
    pub write_per_second: Option<u32>,
}

/// Configuration for the store facade
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub storage_backend: StorageBackend,
    pub rate_limits: RateLimitConfig,
    pub retry_policy: RetryPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory {
                bucket: "in-memory".to_string(),
            },
            rate_limits: RateLimitConfig::default(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

/// Wired facade plus the shared statistics backend
pub struct StoreServices {
    pub delete_service: DeleteServiceImpl,
    pub statistics: Arc<InMemoryStatisticsSink>,
}

/// Builder wiring the facade together from configuration
pub struct StoreBuilder {
    config: StoreConfig,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    pub fn with_rate_limits(mut self, limits: RateLimitConfig) -> Self {
        self.config.rate_limits = limits;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry_policy = policy;
        self
    }

    /// Build the facade and its collaborators
    pub fn build(self) -> Result<StoreServices, AppError> {
        let bucket = BucketName::new(self.config.storage_backend.bucket().to_string()).map_err(
            |e| AppError::Configuration {
                message: format!("invalid bucket name: {}", e),
            },
        )?;

        let raw_store = self.create_raw_store()?;
        let client = Arc::new(ApacheStoreClientAdapter::new(raw_store));

        let read_limiter = Self::create_limiter(self.config.rate_limits.read_per_second);
        let write_limiter = Self::create_limiter(self.config.rate_limits.write_per_second);

        let statistics = Arc::new(InMemoryStatisticsSink::new());
        let bulk_retry_handler = Arc::new(DefaultBulkRetryHandler::new(statistics.clone()));

        let delete_service = DeleteServiceImpl::new(
            client,
            read_limiter,
            write_limiter,
            statistics.clone(),
            Arc::new(TracingAuditSpanSource),
            bulk_retry_handler,
            RetryInvoker::new(self.config.retry_policy),
            bucket,
        );

        Ok(StoreServices {
            delete_service,
            statistics,
        })
    }

    fn create_limiter(rate_per_second: Option<u32>) -> Arc<dyn RateLimiter> {
        match rate_per_second {
            Some(rate) => Arc::new(TokenBucketLimiter::new(rate)),
            None => Arc::new(UnlimitedLimiter),
        }
    }

    fn create_raw_store(&self) -> Result<Arc<dyn ApacheObjectStore>, AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory { .. } => Ok(Arc::new(InMemory::new())),
            StorageBackend::S3 {
                bucket,
                region,
                access_key,
                secret_key,
            } => {
                let mut builder = AmazonS3Builder::new()
                    .with_bucket_name(bucket)
                    .with_region(region);

                if let Some(access_key) = access_key {
                    builder = builder.with_access_key_id(access_key);
                }
                if let Some(secret_key) = secret_key {
                    builder = builder.with_secret_access_key(secret_key);
                }

                let store = builder.build().map_err(|e| AppError::StorageInit {
                    message: format!("failed to build S3 store: {}", e),
                })?;
                Ok(Arc::new(store))
            }
            StorageBackend::MinIO {
                endpoint,
                bucket,
                access_key,
                secret_key,
                use_ssl,
            } => {
                let store = AmazonS3Builder::new()
                    .with_bucket_name(bucket)
                    .with_region("us-east-1")
                    .with_endpoint(endpoint)
                    .with_access_key_id(access_key)
                    .with_secret_access_key(secret_key)
                    .with_allow_http(!use_ssl)
                    .build()
                    .map_err(|e| AppError::StorageInit {
                        message: format!("failed to build MinIO store: {}", e),
                    })?;
                Ok(Arc::new(store))
            }
        }
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Create an in-memory-backed facade for testing and development
pub fn create_in_memory_store(bucket: &str) -> Result<StoreServices, AppError> {
    StoreBuilder::new()
        .with_storage_backend(StorageBackend::InMemory {
            bucket: bucket.to_string(),
        })
        .build()
}

/// Create an S3-backed facade
pub fn create_s3_store(
    bucket: String,
    region: String,
    access_key: Option<String>,
    secret_key: Option<String>,
) -> Result<StoreServices, AppError> {
    StoreBuilder::new()
        .with_storage_backend(StorageBackend::S3 {
            bucket,
            region,
            access_key,
            secret_key,
        })
        .build()
}

/// Create a MinIO-backed facade
pub fn create_minio_store(
    endpoint: String,
    bucket: String,
    access_key: String,
    secret_key: String,
    use_ssl: bool,
) -> Result<StoreServices, AppError> {
    StoreBuilder::new()
        .with_storage_backend(StorageBackend::MinIO {
            endpoint,
            bucket,
            access_key,
            secret_key,
            use_ssl,
        })
        .build()
}

/// Create a facade from environment variables
pub fn create_store_from_env() -> Result<StoreServices, AppError> {
    let storage_backend = match std::env::var("STORE_BACKEND").as_deref() {
        Ok("s3") => {
            let bucket = std::env::var("S3_BUCKET").map_err(|_| AppError::Configuration {
                message: "S3_BUCKET environment variable required".to_string(),
            })?;
            let region = std::env::var("S3_REGION").map_err(|_| AppError::Configuration {
                message: "S3_REGION environment variable required".to_string(),
            })?;
            let access_key = std::env::var("AWS_ACCESS_KEY_ID").ok();
            let secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok();

            StorageBackend::S3 {
                bucket,
                region,
                access_key,
                secret_key,
            }
        }
        Ok("minio") => {
            let endpoint =
                std::env::var("MINIO_ENDPOINT").map_err(|_| AppError::Configuration {
                    message: "MINIO_ENDPOINT environment variable required".to_string(),
                })?;
            let bucket = std::env::var("MINIO_BUCKET").map_err(|_| AppError::Configuration {
                message: "MINIO_BUCKET environment variable required".to_string(),
            })?;
            let access_key =
                std::env::var("MINIO_ACCESS_KEY").map_err(|_| AppError::Configuration {
                    message: "MINIO_ACCESS_KEY environment variable required".to_string(),
                })?;
            let secret_key =
                std::env::var("MINIO_SECRET_KEY").map_err(|_| AppError::Configuration {
                    message: "MINIO_SECRET_KEY environment variable required".to_string(),
                })?;
            let use_ssl = std::env::var("MINIO_USE_SSL")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false);

            StorageBackend::MinIO {
                endpoint,
                bucket,
                access_key,
                secret_key,
                use_ssl,
            }
        }
        _ => StorageBackend::InMemory {
            bucket: std::env::var("STORE_BUCKET").unwrap_or_else(|_| "in-memory".to_string()),
        },
    };

    let rate_limits = RateLimitConfig {
        read_per_second: std::env::var("STORE_READ_RATE")
            .ok()
            .and_then(|v| v.parse().ok()),
        write_per_second: std::env::var("STORE_WRITE_RATE")
            .ok()
            .and_then(|v| v.parse().ok()),
    };

    StoreBuilder::new()
        .with_storage_backend(storage_backend)
        .with_rate_limits(rate_limits)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_build() {
        let services = create_in_memory_store("test-bucket").unwrap();
        assert_eq!(services.delete_service.bucket().as_str(), "test-bucket");
    }

    #[test]
    fn test_invalid_bucket_rejected() {
        let result = create_in_memory_store("NOT-valid");
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[test]
    fn test_rate_limit_config_selects_limiter() {
        let services = StoreBuilder::new()
            .with_storage_backend(StorageBackend::InMemory {
                bucket: "limited".to_string(),
            })
            .with_rate_limits(RateLimitConfig {
                read_per_second: Some(100),
                write_per_second: Some(50),
            })
            .build()
            .unwrap();
        assert_eq!(services.delete_service.bucket().as_str(), "limited");
    }
}
