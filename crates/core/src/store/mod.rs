//! Blob storage client seam.
//!
//! The workflow talks to storage exclusively through the [`BlobStore`] trait;
//! [`AzureBlobStore`] is the production backend.

mod azure;
mod types;

pub use azure::AzureBlobStore;
pub use types::{BlobEntry, BlobStore, StoreError};
