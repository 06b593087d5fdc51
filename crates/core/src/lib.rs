pub mod config;
pub mod samples;
pub mod store;
pub mod testing;
pub mod workflow;

pub use config::{
    load_config, load_config_from_str, validate_config, AuthMethod, AzureConfig, Config,
    ConfigError, StorageBackend, StorageConfig, WorkflowConfig,
};
pub use samples::{ensure_sample_files, expected_local_files, SampleError, SampleWriter};
pub use store::{AzureBlobStore, BlobEntry, BlobStore, StoreError};
pub use workflow::{
    verify_local_files, ErrorPolicy, FileCheck, RunSummary, Step, WorkflowError, WorkflowRunner,
};
