//! Types for blob store operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during blob store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Invalid account URL: {0}")]
    InvalidAccountUrl(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Container already exists: {0}")]
    ContainerAlreadyExists(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    #[error("Blob already exists: {0}")]
    BlobAlreadyExists(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("API error: {0}")]
    Api(String),
}

impl StoreError {
    /// Whether the operation failed because the target already exists.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            StoreError::ContainerAlreadyExists(_) | StoreError::BlobAlreadyExists(_)
        )
    }

    /// Whether the operation failed because the target does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::ContainerNotFound(_) | StoreError::BlobNotFound(_)
        )
    }
}

/// A blob as reported by the container listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobEntry {
    /// Blob name.
    pub name: String,
    /// Content length in bytes.
    pub content_length: u64,
}

/// Trait for blob store backends.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Create a container. Fails with `ContainerAlreadyExists` if present.
    async fn create_container(&self, container: &str) -> Result<(), StoreError>;

    /// Upload a blob. With `overwrite` set, an existing blob of the same name
    /// is replaced; without it, the upload fails with `BlobAlreadyExists`.
    async fn put_blob(
        &self,
        container: &str,
        blob: &str,
        data: Vec<u8>,
        overwrite: bool,
    ) -> Result<(), StoreError>;

    /// List all blobs in a container, sorted by name.
    async fn list_blobs(&self, container: &str) -> Result<Vec<BlobEntry>, StoreError>;

    /// Fetch a blob's full content.
    async fn get_blob(&self, container: &str, blob: &str) -> Result<Vec<u8>, StoreError>;

    /// Delete a container and every blob within it.
    async fn delete_container(&self, container: &str) -> Result<(), StoreError>;
}
