use crate::domain::value_objects::{ObjectKey, VersionId};

/// Request to delete a single object, constructed by the caller
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub key: ObjectKey,
    pub version_id: Option<VersionId>,
}

impl DeleteRequest {
    /// Create a request for the latest version of an object
    pub fn new(key: impl Into<ObjectKey>) -> Self {
        Self {
            key: key.into(),
            version_id: None,
        }
    }

    /// Create a request targeting a specific version
    pub fn versioned(key: impl Into<ObjectKey>, version_id: VersionId) -> Self {
        Self {
            key: key.into(),
            version_id: Some(version_id),
        }
    }
}

/// Request to delete an ordered sequence of objects in one store call
#[derive(Debug, Clone, Default)]
pub struct BulkDeleteRequest {
    entries: Vec<DeleteRequest>,
}

impl BulkDeleteRequest {
    /// Create a bulk request from individual delete entries
    pub fn new(entries: Vec<DeleteRequest>) -> Self {
        Self { entries }
    }

    /// Build a bulk request from plain keys, latest version each
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ObjectKey>,
    {
        Self {
            entries: keys.into_iter().map(DeleteRequest::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeleteRequest> {
        self.entries.iter()
    }
}

/// What the store reported for one successfully deleted object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteObjectResponse {
    pub version_id: Option<VersionId>,
    pub delete_marker: bool,
}

/// Terminal state of a single delete.
///
/// Deleting an absent object is a no-op success, so both variants are
/// success states; only an unrecognized service error fails the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(DeleteObjectResponse),
    NotFound,
}

impl DeleteOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// One object the store confirmed as deleted in a bulk call
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedObject {
    pub key: ObjectKey,
    pub version_id: Option<VersionId>,
}

/// Per-object failure reported inside an otherwise successful bulk response
#[derive(Debug, Clone, PartialEq)]
pub struct BulkDeleteError {
    pub key: ObjectKey,
    pub code: String,
    pub message: String,
}

/// Full response of a bulk delete call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkDeleteResponse {
    pub deleted: Vec<DeletedObject>,
    pub errors: Vec<BulkDeleteError>,
}

/// Outcome of a bulk delete: the full store response plus the derived set
/// of per-key errors.
///
/// Bulk delete is best effort; a non-empty error list is surfaced as data
/// for the caller to act on, never raised as a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkDeleteOutcome {
    response: BulkDeleteResponse,
}

impl BulkDeleteOutcome {
    pub fn new(response: BulkDeleteResponse) -> Self {
        Self { response }
    }

    /// The full underlying store response
    pub fn response(&self) -> &BulkDeleteResponse {
        &self.response
    }

    /// Per-key errors derived from the response (possibly empty)
    pub fn errors(&self) -> &[BulkDeleteError] {
        &self.response.errors
    }

    pub fn is_fully_deleted(&self) -> bool {
        self.response.errors.is_empty()
    }
}
