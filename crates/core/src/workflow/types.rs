//! Types for the workflow orchestrator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a run.
///
/// This is the fatal tier of the error taxonomy: anything here is raised
/// before the first storage call, and `run` returns no summary. Recoverable
/// failures never surface as a `WorkflowError`; they are logged and encoded
/// as absence from the summary's success lists.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Invalid or placeholder configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// The eight workflow steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Create missing sample files locally.
    Samples,
    /// Validate the storage configuration.
    Connect,
    /// Create the container, tolerating "already exists".
    EnsureContainer,
    /// Upload each configured local file.
    Upload,
    /// List all blobs in the container.
    List,
    /// Download every successfully uploaded blob.
    Download,
    /// Delete the container and everything in it.
    DeleteContainer,
    /// Report which expected local files exist.
    Verify,
}

/// What a failure in a step does to the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the run; no summary is produced.
    Fatal,
    /// Log and continue with the next item or step.
    Recoverable,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: [Step; 8] = [
        Step::Samples,
        Step::Connect,
        Step::EnsureContainer,
        Step::Upload,
        Step::List,
        Step::Download,
        Step::DeleteContainer,
        Step::Verify,
    ];

    /// Returns the string representation used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Samples => "samples",
            Step::Connect => "connect",
            Step::EnsureContainer => "ensure_container",
            Step::Upload => "upload",
            Step::List => "list",
            Step::Download => "download",
            Step::DeleteContainer => "delete_container",
            Step::Verify => "verify",
        }
    }

    /// The failure policy table. Connect is the only fatal step; every other
    /// failure is logged and the run continues.
    pub fn policy(&self) -> ErrorPolicy {
        match self {
            Step::Connect => ErrorPolicy::Fatal,
            _ => ErrorPolicy::Recoverable,
        }
    }
}

/// Result of one workflow run. Built incrementally across the steps and
/// returned by value; nothing outlives the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Local file names that were uploaded successfully.
    pub successful_uploads: Vec<String>,
    /// Blob names reported by the container listing.
    pub blob_names: Vec<String>,
    /// Local file names written by the download step.
    pub downloaded_files: Vec<String>,
    /// Whether the container deletion succeeded.
    pub container_deleted: bool,
}

/// Outcome of checking one expected local file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCheck {
    /// File name relative to the work directory.
    pub name: String,
    /// Whether the file exists.
    pub found: bool,
}
