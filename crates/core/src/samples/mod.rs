//! Sample files used to exercise the workflow.
//!
//! A run operates on two well-known local files: a plain text file and a rich
//! document. The document is produced by whichever [`SampleWriter`] this build
//! carries; see [`SampleWriter::detect`].

mod writer;

pub use writer::SampleWriter;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while preparing sample files.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Failed to write sample file {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to assemble sample document: {0}")]
    Document(String),
}

/// Name of the plain text sample.
pub const SAMPLE_TEXT_NAME: &str = "sample1.txt";

const SAMPLE_TEXT_CONTENT: &str = "This is a sample text file for blob storage testing.";

/// Create the sample files in `dir` if they are missing. Existing files are
/// never touched. Returns the sample file names in creation order.
pub async fn ensure_sample_files(
    dir: &Path,
    writer: SampleWriter,
) -> Result<Vec<String>, SampleError> {
    let text_path = dir.join(SAMPLE_TEXT_NAME);
    if text_path.exists() {
        debug!(file = SAMPLE_TEXT_NAME, "Sample file already present");
    } else {
        tokio::fs::write(&text_path, SAMPLE_TEXT_CONTENT)
            .await
            .map_err(|source| SampleError::Write {
                name: SAMPLE_TEXT_NAME.to_string(),
                source,
            })?;
        info!(file = SAMPLE_TEXT_NAME, "Created sample file");
    }

    let doc_name = writer.document_name();
    let doc_path = dir.join(doc_name);
    if doc_path.exists() {
        debug!(file = doc_name, "Sample file already present");
    } else {
        let bytes = writer.document_bytes()?;
        tokio::fs::write(&doc_path, bytes)
            .await
            .map_err(|source| SampleError::Write {
                name: doc_name.to_string(),
                source,
            })?;
        info!(file = doc_name, writer = writer.as_str(), "Created sample file");
    }

    Ok(vec![SAMPLE_TEXT_NAME.to_string(), doc_name.to_string()])
}

/// The fixed set of local files the verification step checks: the two sample
/// names and the two corresponding prefixed download names.
pub fn expected_local_files(writer: SampleWriter, download_prefix: &str) -> Vec<String> {
    let samples = [SAMPLE_TEXT_NAME, writer.document_name()];

    samples
        .iter()
        .map(|name| name.to_string())
        .chain(samples.iter().map(|name| format!("{download_prefix}{name}")))
        .collect()
}
