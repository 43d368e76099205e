//! Text export artifact.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name of the exported summary.
pub const SUMMARY_FILENAME: &str = "mis-assessment-summary.txt";

/// MIME type of the exported summary.
pub const SUMMARY_MIME_TYPE: &str = "text/plain;charset=utf-8";

/// Write the summary text into `dir` as [`SUMMARY_FILENAME`].
///
/// Creates `dir` if needed and overwrites an existing summary.
pub fn write_summary(dir: &Path, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(SUMMARY_FILENAME);
    std::fs::write(&path, content)
        .with_context(|| format!("failed to write summary to {}", path.display()))?;
    tracing::info!(mime = SUMMARY_MIME_TYPE, "summary written to {}", path.display());
    Ok(path)
}
