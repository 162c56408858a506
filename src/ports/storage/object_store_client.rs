use async_trait::async_trait;

use crate::domain::{
    errors::ServiceError,
    models::{BulkDeleteRequest, BulkDeleteResponse, DeleteObjectResponse},
    value_objects::{ObjectKey, VersionId},
};

/// Port for the underlying object-store network client.
///
/// Implementations own connection pooling and request construction; the
/// facade only sequences calls and interprets errors.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync + 'static {
    /// Issue a single-object delete call
    async fn delete_object(
        &self,
        key: &ObjectKey,
        version_id: Option<&VersionId>,
    ) -> Result<DeleteObjectResponse, ServiceError>;

    /// Issue one bulk delete call for all entries in the request.
    ///
    /// The call succeeds as long as the request itself was served; failures
    /// of individual objects are reported inside the response.
    async fn delete_objects(
        &self,
        request: &BulkDeleteRequest,
    ) -> Result<BulkDeleteResponse, ServiceError>;
}
