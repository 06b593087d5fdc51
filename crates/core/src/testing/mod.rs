//! Testing utilities and mock implementations.
//!
//! Provides an in-memory [`MockBlobStore`] so the workflow can be driven end
//! to end without real storage infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use blobrun_core::testing::MockBlobStore;
//!
//! let store = Arc::new(MockBlobStore::new());
//! let runner = WorkflowRunner::new(config, store.clone());
//! let summary = runner.run().await?;
//!
//! assert_eq!(store.recorded_ops().await.len(), 7);
//! ```

mod mock_store;

pub use mock_store::{MockBlobStore, RecordedOp, StoreOp};
