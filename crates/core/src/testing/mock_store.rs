//! Mock blob store for testing.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::store::{BlobEntry, BlobStore, StoreError};

/// The kinds of store operation, used to target failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    CreateContainer,
    PutBlob,
    ListBlobs,
    GetBlob,
    DeleteContainer,
}

/// A recorded store operation for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedOp {
    CreateContainer { container: String },
    PutBlob { container: String, blob: String, overwrite: bool },
    ListBlobs { container: String },
    GetBlob { container: String, blob: String },
    DeleteContainer { container: String },
}

impl RecordedOp {
    /// The kind of this recorded operation.
    pub fn kind(&self) -> StoreOp {
        match self {
            RecordedOp::CreateContainer { .. } => StoreOp::CreateContainer,
            RecordedOp::PutBlob { .. } => StoreOp::PutBlob,
            RecordedOp::ListBlobs { .. } => StoreOp::ListBlobs,
            RecordedOp::GetBlob { .. } => StoreOp::GetBlob,
            RecordedOp::DeleteContainer { .. } => StoreOp::DeleteContainer,
        }
    }
}

/// Mock implementation of the [`BlobStore`] trait.
///
/// Provides controllable behavior for testing:
/// - Track every operation for assertions
/// - Inspect container and blob state
/// - Simulate failures, one-shot or per operation kind
#[derive(Debug, Default)]
pub struct MockBlobStore {
    /// Containers and their blobs. BTreeMaps keep listings sorted.
    containers: Arc<RwLock<BTreeMap<String, BTreeMap<String, Vec<u8>>>>>,
    /// Every operation performed, in order.
    recorded: Arc<RwLock<Vec<RecordedOp>>>,
    /// If set, the next operation of any kind fails with this error.
    next_error: Arc<RwLock<Option<StoreError>>>,
    /// Persistent failures per operation kind.
    failures: Arc<RwLock<HashMap<StoreOp, StoreError>>>,
}

impl MockBlobStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded operations in order.
    pub async fn recorded_ops(&self) -> Vec<RecordedOp> {
        self.recorded.read().await.clone()
    }

    /// Number of recorded operations of the given kind.
    pub async fn op_count(&self, kind: StoreOp) -> usize {
        self.recorded
            .read()
            .await
            .iter()
            .filter(|op| op.kind() == kind)
            .count()
    }

    /// Configure the next operation (of any kind) to fail with the given
    /// error. Consumed by the first operation that trips it.
    pub async fn set_next_error(&self, error: StoreError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every operation of the given kind fail until cleared.
    pub async fn set_failure(&self, op: StoreOp, error: StoreError) {
        self.failures.write().await.insert(op, error);
    }

    /// Clear a per-kind failure.
    pub async fn clear_failure(&self, op: StoreOp) {
        self.failures.write().await.remove(&op);
    }

    /// Pre-populate a container (for testing "already exists" handling).
    pub async fn add_container(&self, container: &str) {
        self.containers
            .write()
            .await
            .entry(container.to_string())
            .or_default();
    }

    /// Whether a container currently exists.
    pub async fn container_exists(&self, container: &str) -> bool {
        self.containers.read().await.contains_key(container)
    }

    /// Current content of a blob, if present.
    pub async fn blob_content(&self, container: &str, blob: &str) -> Option<Vec<u8>> {
        self.containers
            .read()
            .await
            .get(container)
            .and_then(|blobs| blobs.get(blob))
            .cloned()
    }

    /// Number of blobs in a container (0 when absent).
    pub async fn blob_count(&self, container: &str) -> usize {
        self.containers
            .read()
            .await
            .get(container)
            .map_or(0, BTreeMap::len)
    }

    async fn check_error(&self, op: StoreOp) -> Result<(), StoreError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        if let Some(err) = self.failures.read().await.get(&op) {
            return Err(err.clone());
        }
        Ok(())
    }

    async fn record(&self, op: RecordedOp) {
        self.recorded.write().await.push(op);
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn create_container(&self, container: &str) -> Result<(), StoreError> {
        self.record(RecordedOp::CreateContainer {
            container: container.to_string(),
        })
        .await;
        self.check_error(StoreOp::CreateContainer).await?;

        let mut containers = self.containers.write().await;
        if containers.contains_key(container) {
            return Err(StoreError::ContainerAlreadyExists(container.to_string()));
        }
        containers.insert(container.to_string(), BTreeMap::new());
        Ok(())
    }

    async fn put_blob(
        &self,
        container: &str,
        blob: &str,
        data: Vec<u8>,
        overwrite: bool,
    ) -> Result<(), StoreError> {
        self.record(RecordedOp::PutBlob {
            container: container.to_string(),
            blob: blob.to_string(),
            overwrite,
        })
        .await;
        self.check_error(StoreOp::PutBlob).await?;

        let mut containers = self.containers.write().await;
        let blobs = containers
            .get_mut(container)
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))?;

        if !overwrite && blobs.contains_key(blob) {
            return Err(StoreError::BlobAlreadyExists(blob.to_string()));
        }
        blobs.insert(blob.to_string(), data);
        Ok(())
    }

    async fn list_blobs(&self, container: &str) -> Result<Vec<BlobEntry>, StoreError> {
        self.record(RecordedOp::ListBlobs {
            container: container.to_string(),
        })
        .await;
        self.check_error(StoreOp::ListBlobs).await?;

        let containers = self.containers.read().await;
        let blobs = containers
            .get(container)
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))?;

        Ok(blobs
            .iter()
            .map(|(name, data)| BlobEntry {
                name: name.clone(),
                content_length: data.len() as u64,
            })
            .collect())
    }

    async fn get_blob(&self, container: &str, blob: &str) -> Result<Vec<u8>, StoreError> {
        self.record(RecordedOp::GetBlob {
            container: container.to_string(),
            blob: blob.to_string(),
        })
        .await;
        self.check_error(StoreOp::GetBlob).await?;

        let containers = self.containers.read().await;
        let blobs = containers
            .get(container)
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))?;

        blobs
            .get(blob)
            .cloned()
            .ok_or_else(|| StoreError::BlobNotFound(blob.to_string()))
    }

    async fn delete_container(&self, container: &str) -> Result<(), StoreError> {
        self.record(RecordedOp::DeleteContainer {
            container: container.to_string(),
        })
        .await;
        self.check_error(StoreOp::DeleteContainer).await?;

        if self.containers.write().await.remove(container).is_some() {
            Ok(())
        } else {
            Err(StoreError::ContainerNotFound(container.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_put_get_round_trip() {
        let store = MockBlobStore::new();

        store.create_container("c1").await.unwrap();
        store
            .put_blob("c1", "a.txt", b"hello".to_vec(), true)
            .await
            .unwrap();

        let content = store.get_blob("c1", "a.txt").await.unwrap();
        assert_eq!(content, b"hello");
    }

    #[tokio::test]
    async fn test_create_existing_container_fails() {
        let store = MockBlobStore::new();

        store.create_container("c1").await.unwrap();
        let err = store.create_container("c1").await.unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn test_put_without_overwrite_conflicts() {
        let store = MockBlobStore::new();
        store.create_container("c1").await.unwrap();

        store
            .put_blob("c1", "a.txt", b"first".to_vec(), false)
            .await
            .unwrap();
        let err = store
            .put_blob("c1", "a.txt", b"second".to_vec(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::BlobAlreadyExists(_)));

        // Overwrite replaces and leaves a single blob behind.
        store
            .put_blob("c1", "a.txt", b"second".to_vec(), true)
            .await
            .unwrap();
        assert_eq!(store.blob_count("c1").await, 1);
        assert_eq!(store.blob_content("c1", "a.txt").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let store = MockBlobStore::new();
        store.create_container("c1").await.unwrap();

        for name in ["b.txt", "a.txt", "c.txt"] {
            store
                .put_blob("c1", name, b"x".to_vec(), true)
                .await
                .unwrap();
        }

        let entries = store.list_blobs("c1").await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn test_operations_against_missing_container_fail() {
        let store = MockBlobStore::new();

        assert!(store
            .put_blob("ghost", "a.txt", vec![], true)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store.list_blobs("ghost").await.unwrap_err().is_not_found());
        assert!(store
            .get_blob("ghost", "a.txt")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store
            .delete_container("ghost")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_next_error_is_consumed() {
        let store = MockBlobStore::new();
        store
            .set_next_error(StoreError::Api("injected".to_string()))
            .await;

        assert!(store.create_container("c1").await.is_err());
        assert!(store.create_container("c1").await.is_ok());
    }

    #[tokio::test]
    async fn test_per_kind_failure_persists_until_cleared() {
        let store = MockBlobStore::new();
        store.create_container("c1").await.unwrap();
        store
            .set_failure(StoreOp::ListBlobs, StoreError::Api("down".to_string()))
            .await;

        assert!(store.list_blobs("c1").await.is_err());
        assert!(store.list_blobs("c1").await.is_err());

        // Other kinds are unaffected.
        store
            .put_blob("c1", "a.txt", b"x".to_vec(), true)
            .await
            .unwrap();

        store.clear_failure(StoreOp::ListBlobs).await;
        assert_eq!(store.list_blobs("c1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recorded_ops() {
        let store = MockBlobStore::new();

        store.create_container("c1").await.unwrap();
        store
            .put_blob("c1", "a.txt", b"x".to_vec(), true)
            .await
            .unwrap();
        store.delete_container("c1").await.unwrap();

        let ops = store.recorded_ops().await;
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].kind(), StoreOp::CreateContainer);
        assert_eq!(
            ops[1],
            RecordedOp::PutBlob {
                container: "c1".to_string(),
                blob: "a.txt".to_string(),
                overwrite: true,
            }
        );
        assert_eq!(store.op_count(StoreOp::DeleteContainer).await, 1);
    }
}
