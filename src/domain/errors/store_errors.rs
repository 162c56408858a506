use thiserror::Error;

use crate::domain::value_objects::{BucketName, ObjectKey};

/// Error raised by the underlying object store service or its transport.
///
/// This type flows through the retry machinery and the client port; it is
/// converted into [`StoreError`] at the facade boundary and never surfaces
/// to callers except as a preserved cause.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("object not found: {key}")]
    NotFound { key: ObjectKey },

    #[error("request throttled: {message}")]
    Throttled { message: String },

    #[error("request timeout")]
    Timeout,

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("access denied: {key}")]
    AccessDenied { key: ObjectKey },

    #[error("service error {code} (status {status}): {message}")]
    Remote {
        code: String,
        message: String,
        status: u16,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error codes that third-party S3-compatible stores use for a missing
/// object. Some of them return 404 where S3 itself reports silent success.
const NOT_FOUND_CODES: &[&str] = &["NoSuchKey", "NotFound", "404"];

/// Error codes that signal service-side throttling.
const THROTTLE_CODES: &[&str] = &[
    "SlowDown",
    "Throttling",
    "ThrottlingException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "RequestLimitExceeded",
    "EC2ThrottledException",
];

impl ServiceError {
    /// Check whether this error reports a missing object.
    ///
    /// Applied uniformly regardless of which store variant raised it.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Remote { code, status, .. } => {
                *status == 404 || NOT_FOUND_CODES.contains(&code.as_str())
            }
            _ => false,
        }
    }

    /// Check whether this error is a service-signaled throttle condition,
    /// counted separately from other transient errors.
    #[must_use]
    pub fn is_throttle(&self) -> bool {
        match self {
            Self::Throttled { .. } => true,
            Self::Remote { code, status, .. } => {
                *status == 503 || THROTTLE_CODES.contains(&code.as_str())
            }
            _ => false,
        }
    }

    /// Check whether a retry may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::ConnectionFailed(_) | Self::Io(_) => true,
            Self::Remote { status, .. } => (500..600).contains(status),
            _ => self.is_throttle(),
        }
    }
}

/// Public failure type of the delete facade
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller programming error; never retried, never rate-limited
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Terminal service failure with the original error preserved as cause
    #[error("store operation failed: {source}")]
    Service {
        #[from]
        source: ServiceError,
    },
}

impl StoreError {
    /// Build the rejection for an attempt to delete the bucket root
    pub(crate) fn root_delete_rejected(bucket: &BucketName) -> Self {
        Self::InvalidArgument {
            message: format!("bucket {} cannot be deleted", bucket),
        }
    }
}

/// Result type for facade operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(code: &str, status: u16) -> ServiceError {
        ServiceError::Remote {
            code: code.to_string(),
            message: "test".to_string(),
            status,
        }
    }

    #[test]
    fn test_not_found_classification() {
        assert!(ServiceError::NotFound {
            key: ObjectKey::new("a")
        }
        .is_not_found());
        assert!(remote("NoSuchKey", 200).is_not_found());
        assert!(remote("Whatever", 404).is_not_found());
        assert!(!remote("AccessDenied", 403).is_not_found());
    }

    #[test]
    fn test_throttle_classification() {
        assert!(remote("SlowDown", 503).is_throttle());
        assert!(remote("Throttling", 400).is_throttle());
        assert!(ServiceError::Throttled {
            message: "slow down".to_string()
        }
        .is_throttle());
        assert!(!ServiceError::Timeout.is_throttle());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ServiceError::Timeout.is_retryable());
        assert!(ServiceError::ConnectionFailed("reset".to_string()).is_retryable());
        assert!(remote("InternalError", 500).is_retryable());
        assert!(remote("SlowDown", 503).is_retryable());
        // 4xx other than throttle codes is terminal
        assert!(!remote("AccessDenied", 403).is_retryable());
        assert!(!ServiceError::NotFound {
            key: ObjectKey::new("a")
        }
        .is_retryable());
    }

    #[test]
    fn test_service_error_preserved_as_cause() {
        let err = StoreError::from(remote("InternalError", 500));
        match &err {
            StoreError::Service { source } => assert!(source.is_retryable()),
            other => panic!("unexpected error: {other:?}"),
        }
        // std::error::Error chain keeps the original
        assert!(std::error::Error::source(&err).is_some());
    }
}
