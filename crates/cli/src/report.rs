//! Final console report for a workflow run.

use std::fmt::Write;

use blobrun_core::RunSummary;

/// Render the run summary as a human-readable report.
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "Workflow summary");
    let _ = writeln!(
        out,
        "  Uploaded files:    {}",
        summary.successful_uploads.len()
    );
    for name in &summary.successful_uploads {
        let _ = writeln!(out, "    - {name}");
    }
    let _ = writeln!(out, "  Blobs listed:      {}", summary.blob_names.len());
    for name in &summary.blob_names {
        let _ = writeln!(out, "    - {name}");
    }
    let _ = writeln!(
        out,
        "  Downloaded files:  {}",
        summary.downloaded_files.len()
    );
    for name in &summary.downloaded_files {
        let _ = writeln!(out, "    - {name}");
    }
    let _ = writeln!(
        out,
        "  Container deleted: {}",
        if summary.container_deleted { "yes" } else { "no" }
    );

    out
}
