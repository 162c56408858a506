use async_trait::async_trait;
use object_store::{memory::InMemory, path::Path as ObjectPath, ObjectStore, PutPayload};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use object_store_facade::{
    create_in_memory_store, ApacheStoreClientAdapter, BucketName, BulkDeleteError,
    BulkDeleteRequest, BulkDeleteResponse, DeleteObjectResponse, DeleteOutcome, DeleteRequest,
    DeleteService, DeleteServiceBuilder, DeleteServiceImpl, DeletedObject, InMemoryStatisticsSink,
    NoopAuditSpanSource, ObjectKey, ObjectStoreClient, RateLimiter, ServiceError, Statistic,
    StoreError, UnlimitedLimiter, VersionId,
};

async fn seeded_store(keys: &[&str]) -> Arc<InMemory> {
    let store = Arc::new(InMemory::new());
    for key in keys {
        store
            .put(&ObjectPath::from(*key), PutPayload::from_static(b"data"))
            .await
            .unwrap();
    }
    store
}

struct Harness {
    service: DeleteServiceImpl,
    stats: Arc<InMemoryStatisticsSink>,
    write_limiter: Arc<RecordingLimiter>,
}

/// Limiter recording every acquisition, never waiting
#[derive(Default)]
struct RecordingLimiter {
    acquisitions: Mutex<Vec<u32>>,
}

#[async_trait]
impl RateLimiter for RecordingLimiter {
    async fn acquire(&self, units: u32) -> Duration {
        self.acquisitions.lock().unwrap().push(units);
        Duration::ZERO
    }
}

fn harness(client: Arc<dyn ObjectStoreClient>) -> Harness {
    let stats = Arc::new(InMemoryStatisticsSink::new());
    let write_limiter = Arc::new(RecordingLimiter::default());
    let service = DeleteServiceBuilder::new()
        .client(client)
        .read_limiter(Arc::new(UnlimitedLimiter))
        .write_limiter(write_limiter.clone())
        .statistics(stats.clone())
        .audit(Arc::new(NoopAuditSpanSource))
        .bulk_retry_handler(Arc::new(object_store_facade::DefaultBulkRetryHandler::new(
            stats.clone(),
        )))
        .bucket(BucketName::new("it-bucket".to_string()).unwrap())
        .build()
        .unwrap();
    Harness {
        service,
        stats,
        write_limiter,
    }
}

#[tokio::test]
async fn delete_existing_object_end_to_end() {
    let raw = seeded_store(&["docs/report.txt"]).await;
    let h = harness(Arc::new(ApacheStoreClientAdapter::new(raw.clone())));

    let timed = h
        .service
        .delete_object(DeleteRequest::new("docs/report.txt"))
        .await
        .unwrap();

    assert!(matches!(timed.value(), DeleteOutcome::Deleted(_)));
    assert!(raw.head(&ObjectPath::from("docs/report.txt")).await.is_err());
    assert_eq!(h.stats.counter(Statistic::ObjectDeleteObjects), 1);
    assert_eq!(h.write_limiter.acquisitions.lock().unwrap().clone(), vec![1]);
}

#[tokio::test]
async fn repeated_delete_of_missing_object_succeeds() {
    // the in-memory backend mirrors S3: deleting an absent key is a
    // silent success
    let services = create_in_memory_store("it-bucket").unwrap();

    let first = services
        .delete_service
        .delete_object(DeleteRequest::new("never/existed.txt"))
        .await
        .unwrap();
    let second = services
        .delete_service
        .delete_object(DeleteRequest::new("never/existed.txt"))
        .await
        .unwrap();

    assert_eq!(first.value(), second.value());
}

#[tokio::test]
async fn not_found_from_the_store_becomes_a_success_outcome() {
    // the local filesystem backend reports a missing key as an error, the
    // way some third-party stores return 404; the facade swallows it
    let dir = tempfile::tempdir().unwrap();
    let store = object_store::local::LocalFileSystem::new_with_prefix(dir.path()).unwrap();
    let h = harness(Arc::new(ApacheStoreClientAdapter::new(Arc::new(store))));

    let first = h
        .service
        .delete_object(DeleteRequest::new("never/existed.txt"))
        .await
        .unwrap();
    let second = h
        .service
        .delete_object(DeleteRequest::new("never/existed.txt"))
        .await
        .unwrap();

    assert_eq!(first.value(), &DeleteOutcome::NotFound);
    assert_eq!(second.value(), &DeleteOutcome::NotFound);
}

#[tokio::test]
async fn root_keys_rejected_before_any_work() {
    let services = create_in_memory_store("it-bucket").unwrap();

    for root in ["", "/"] {
        let result = services
            .delete_service
            .delete_object(DeleteRequest::new(root))
            .await;
        match result {
            Err(StoreError::InvalidArgument { message }) => {
                assert!(message.contains("it-bucket"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
    // nothing was counted as attempted
    assert_eq!(
        services.statistics.counter(Statistic::ObjectDeleteObjects),
        0
    );
}

#[tokio::test]
async fn bulk_delete_of_present_and_absent_keys_succeeds() {
    let raw = seeded_store(&["a", "c"]).await;
    let h = harness(Arc::new(ApacheStoreClientAdapter::new(raw)));

    let timed = h
        .service
        .delete_objects(BulkDeleteRequest::from_keys(["a", "b", "c"]))
        .await
        .unwrap();

    let outcome = timed.value();
    assert!(outcome.is_fully_deleted());
    assert_eq!(outcome.response().deleted.len(), 3);
    assert_eq!(h.write_limiter.acquisitions.lock().unwrap().clone(), vec![3]);
    assert_eq!(h.stats.counter(Statistic::ObjectDeleteObjects), 3);
    assert_eq!(h.stats.counter(Statistic::ObjectBulkDeleteRequest), 1);
}

/// Client returning a fixed bulk response, for partial-failure shapes the
/// in-memory backend cannot produce
struct PartialFailureClient {
    response: BulkDeleteResponse,
}

#[async_trait]
impl ObjectStoreClient for PartialFailureClient {
    async fn delete_object(
        &self,
        _key: &ObjectKey,
        _version_id: Option<&VersionId>,
    ) -> Result<DeleteObjectResponse, ServiceError> {
        Ok(DeleteObjectResponse::default())
    }

    async fn delete_objects(
        &self,
        _request: &BulkDeleteRequest,
    ) -> Result<BulkDeleteResponse, ServiceError> {
        Ok(self.response.clone())
    }
}

#[tokio::test]
async fn bulk_partial_failure_is_reported_not_raised() {
    // store succeeds for a and c, denies b
    let client = PartialFailureClient {
        response: BulkDeleteResponse {
            deleted: vec![
                DeletedObject {
                    key: ObjectKey::new("a"),
                    version_id: None,
                },
                DeletedObject {
                    key: ObjectKey::new("c"),
                    version_id: None,
                },
            ],
            errors: vec![BulkDeleteError {
                key: ObjectKey::new("b"),
                code: "AccessDenied".to_string(),
                message: "access denied".to_string(),
            }],
        },
    };
    let h = harness(Arc::new(client));

    let timed = h
        .service
        .delete_objects(BulkDeleteRequest::from_keys(["a", "b", "c"]))
        .await
        .unwrap();

    let outcome = timed.value();
    let expected = vec![BulkDeleteError {
        key: ObjectKey::new("b"),
        code: "AccessDenied".to_string(),
        message: "access denied".to_string(),
    }];
    assert_eq!(outcome.errors(), expected.as_slice());
    assert_eq!(h.write_limiter.acquisitions.lock().unwrap().clone(), vec![3]);
    assert_eq!(h.stats.counter(Statistic::ObjectDeleteObjects), 3);
}

#[tokio::test]
async fn bulk_delete_with_invalid_key_fails_whole_call() {
    let raw = seeded_store(&["a"]).await;
    let h = harness(Arc::new(ApacheStoreClientAdapter::new(raw.clone())));

    let result = h
        .service
        .delete_objects(BulkDeleteRequest::from_keys(["a", "/"]))
        .await;

    assert!(matches!(result, Err(StoreError::InvalidArgument { .. })));
    assert!(h.write_limiter.acquisitions.lock().unwrap().is_empty());
    // the valid key was not deleted either
    assert!(raw.head(&ObjectPath::from("a")).await.is_ok());
}
