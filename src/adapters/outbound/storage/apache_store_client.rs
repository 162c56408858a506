use async_trait::async_trait;
use futures::StreamExt;
use object_store::{path::Path as ObjectPath, ObjectStore as ApacheObjectStore};
use std::sync::Arc;
use tracing::debug;

use crate::{
    domain::{
        errors::ServiceError,
        models::{
            BulkDeleteError, BulkDeleteRequest, BulkDeleteResponse, DeleteObjectResponse,
            DeletedObject,
        },
        value_objects::{ObjectKey, VersionId},
    },
    ports::storage::ObjectStoreClient,
};

/// How many per-key deletes of one bulk request are in flight at a time
const BULK_DELETE_CONCURRENCY: usize = 8;

/// Adapter that implements our ObjectStoreClient trait using Apache
/// object_store.
///
/// The backend has no native multi-object delete call, so a bulk request
/// fans out into per-key deletes whose individual failures are folded into
/// the response, preserving the best-effort bulk contract.
pub struct ApacheStoreClientAdapter {
    inner: Arc<dyn ApacheObjectStore>,
}

impl ApacheStoreClientAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self { inner: store }
    }

    /// Error code reported for a failed per-key delete inside a bulk
    /// response
    fn error_code(error: &object_store::Error) -> &'static str {
        match error {
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => "AccessDenied",
            object_store::Error::Precondition { .. } => "PreconditionFailed",
            _ => "InternalError",
        }
    }

    fn convert_error(key: &ObjectKey, error: object_store::Error) -> ServiceError {
        match error {
            object_store::Error::NotFound { .. } => ServiceError::NotFound { key: key.clone() },
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => {
                ServiceError::AccessDenied { key: key.clone() }
            }
            object_store::Error::Generic { source, .. } => ServiceError::Remote {
                code: "InternalError".to_string(),
                message: source.to_string(),
                status: 500,
            },
            other => ServiceError::Remote {
                code: "InvalidRequest".to_string(),
                message: other.to_string(),
                status: 400,
            },
        }
    }
}

#[async_trait]
impl ObjectStoreClient for ApacheStoreClientAdapter {
    async fn delete_object(
        &self,
        key: &ObjectKey,
        version_id: Option<&VersionId>,
    ) -> Result<DeleteObjectResponse, ServiceError> {
        if let Some(version) = version_id {
            // the backend deletes the current version only
            debug!(key = %key, version = %version, "version id ignored by this backend");
        }

        let path = ObjectPath::from(key.as_str());
        self.inner
            .delete(&path)
            .await
            .map_err(|e| Self::convert_error(key, e))?;

        Ok(DeleteObjectResponse::default())
    }

    async fn delete_objects(
        &self,
        request: &BulkDeleteRequest,
    ) -> Result<BulkDeleteResponse, ServiceError> {
        let results = futures::stream::iter(request.iter().cloned())
            .map(|entry| {
                let store = Arc::clone(&self.inner);
                async move {
                    let path = ObjectPath::from(entry.key.as_str());
                    let result = store.delete(&path).await;
                    (entry, result)
                }
            })
            .buffered(BULK_DELETE_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        let mut response = BulkDeleteResponse::default();
        for (entry, result) in results {
            match result {
                // a missing key counts as deleted in a bulk call
                Ok(()) | Err(object_store::Error::NotFound { .. }) => {
                    response.deleted.push(DeletedObject {
                        key: entry.key.clone(),
                        version_id: entry.version_id.clone(),
                    });
                }
                Err(error) => {
                    response.errors.push(BulkDeleteError {
                        key: entry.key.clone(),
                        code: Self::error_code(&error).to_string(),
                        message: error.to_string(),
                    });
                }
            }
        }

        Ok(response)
    }
}
