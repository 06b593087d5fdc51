//! Workflow runner implementation.
//!
//! One storage operation is in flight at any time; every call is awaited
//! before the next starts, and no handle crosses a step boundary.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{validate_config, Config};
use crate::samples::{ensure_sample_files, expected_local_files, SampleWriter};
use crate::store::BlobStore;

use super::types::{ErrorPolicy, FileCheck, RunSummary, Step, WorkflowError};

/// Drives one blob storage round trip against a [`BlobStore`].
pub struct WorkflowRunner {
    config: Config,
    store: Arc<dyn BlobStore>,
    writer: SampleWriter,
}

impl WorkflowRunner {
    /// Create a runner. The sample writer is picked once here and reused by
    /// the sample and verification steps.
    pub fn new(config: Config, store: Arc<dyn BlobStore>) -> Self {
        Self {
            config,
            store,
            writer: SampleWriter::detect(),
        }
    }

    /// Run the workflow.
    ///
    /// Returns `Err` only for the fatal tier (invalid or placeholder
    /// configuration), raised before the first storage call. Every other
    /// failure is recoverable: logged with its source and reflected in the
    /// summary as absence from the success lists.
    pub async fn run(&self) -> Result<RunSummary, WorkflowError> {
        let run_id = Uuid::new_v4();
        let started = Utc::now();
        let container = self.config.workflow.container.as_str();
        let work_dir = self.config.workflow.work_dir.as_path();

        info!(run_id = %run_id, container = %container, "Starting blob workflow run");

        // Step 1: ensure the sample files exist locally.
        match ensure_sample_files(work_dir, self.writer).await {
            Ok(names) => debug!(step = Step::Samples.as_str(), files = names.len(), "Sample files ready"),
            Err(e) => self.recoverable(Step::Samples, &e),
        }

        // Step 2: validate the connection configuration. The only fatal step:
        // a placeholder account URL must never reach the storage service.
        info!(step = Step::Connect.as_str(), "Validating storage configuration");
        validate_config(&self.config)?;
        info!(store = self.store.name(), "Using blob store backend");

        let mut summary = RunSummary::default();

        // Step 3: ensure the container exists.
        info!(step = Step::EnsureContainer.as_str(), container = %container, "Creating container");
        match self.store.create_container(container).await {
            Ok(()) => info!(container = %container, "Container created"),
            Err(e) if e.is_already_exists() => {
                debug!(container = %container, "Container already exists")
            }
            Err(e) => self.recoverable(Step::EnsureContainer, &e),
        }

        // Step 4: upload each configured file that exists locally.
        let upload_files = &self.config.workflow.upload_files;
        info!(step = Step::Upload.as_str(), count = upload_files.len(), "Starting upload");
        for name in upload_files {
            let path = work_dir.join(name);
            if !path.exists() {
                warn!(file = %name, "Local file not found, skipping upload");
                continue;
            }

            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(file = %name, error = %e, "Failed to read local file");
                    continue;
                }
            };

            match self.store.put_blob(container, name, bytes, true).await {
                Ok(()) => {
                    info!(file = %name, "Uploaded");
                    summary.successful_uploads.push(name.clone());
                }
                Err(e) => warn!(file = %name, error = %e, "Upload failed"),
            }
        }

        // Step 5: list all blobs in the container. A listing failure leaves
        // the name list empty and the run moves on.
        info!(step = Step::List.as_str(), container = %container, "Listing blobs");
        match self.store.list_blobs(container).await {
            Ok(entries) => {
                for entry in &entries {
                    info!(blob = %entry.name, size = entry.content_length, "Found blob");
                }
                if entries.is_empty() {
                    info!("No blobs found in container");
                }
                summary.blob_names = entries.into_iter().map(|entry| entry.name).collect();
            }
            Err(e) => self.recoverable(Step::List, &e),
        }

        // Step 6: download only what step 4 actually uploaded, never the full
        // requested list.
        info!(step = Step::Download.as_str(), count = summary.successful_uploads.len(), "Starting download");
        for name in summary.successful_uploads.clone() {
            let target_name = format!("{}{}", self.config.workflow.download_prefix, name);

            let bytes = match self.store.get_blob(container, &name).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(blob = %name, error = %e, "Download failed");
                    continue;
                }
            };

            match tokio::fs::write(work_dir.join(&target_name), bytes).await {
                Ok(()) => {
                    info!(blob = %name, file = %target_name, "Downloaded");
                    summary.downloaded_files.push(target_name);
                }
                Err(e) => {
                    warn!(file = %target_name, error = %e, "Failed to write downloaded file")
                }
            }
        }

        // Step 7: delete the container and everything in it.
        info!(step = Step::DeleteContainer.as_str(), container = %container, "Deleting container");
        match self.store.delete_container(container).await {
            Ok(()) => {
                info!(container = %container, "Container deleted");
                summary.container_deleted = true;
            }
            Err(e) => self.recoverable(Step::DeleteContainer, &e),
        }

        // Step 8: report which expected local files exist. Informational only.
        let expected = expected_local_files(self.writer, &self.config.workflow.download_prefix);
        for check in verify_local_files(work_dir, &expected) {
            if check.found {
                info!(step = Step::Verify.as_str(), file = %check.name, "[FOUND]");
            } else {
                info!(step = Step::Verify.as_str(), file = %check.name, "[MISSING]");
            }
        }

        let elapsed = Utc::now() - started;
        info!(
            run_id = %run_id,
            uploads = summary.successful_uploads.len(),
            blobs = summary.blob_names.len(),
            downloads = summary.downloaded_files.len(),
            container_deleted = summary.container_deleted,
            elapsed_ms = elapsed.num_milliseconds(),
            "Workflow run complete"
        );

        Ok(summary)
    }

    fn recoverable(&self, step: Step, err: &dyn std::fmt::Display) {
        debug_assert_eq!(step.policy(), ErrorPolicy::Recoverable);
        warn!(step = step.as_str(), error = %err, "Step failed, continuing");
    }
}

/// Check which of the expected files exist in `dir`.
pub fn verify_local_files(dir: &Path, expected: &[String]) -> Vec<FileCheck> {
    expected
        .iter()
        .map(|name| FileCheck {
            name: name.clone(),
            found: dir.join(name).exists(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_verify_local_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("present.txt"), "x").unwrap();

        let expected = vec!["present.txt".to_string(), "absent.txt".to_string()];
        let checks = verify_local_files(dir.path(), &expected);

        assert_eq!(checks.len(), 2);
        assert!(checks[0].found);
        assert!(!checks[1].found);
    }

    #[test]
    fn test_verify_with_empty_expectations() {
        let dir = TempDir::new().unwrap();
        assert!(verify_local_files(dir.path(), &[]).is_empty());
    }
}
