//! Output-directory setup and source-document discovery.

use crate::error::BatchError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub async fn ensure_output_dir(dir: &Path) -> Result<(), BatchError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| BatchError::OutputDirCreateFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
    debug!("Output directory ready: {}", dir.display());
    Ok(())
}

/// List every non-directory entry of `dir` whose file name ends with `extension`.
///
/// Only the top level of `dir` is inspected. Results are sorted by file name.
pub async fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, BatchError> {
    let unreadable = |e: std::io::Error| BatchError::InputDirUnreadable {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(unreadable)?;
    let mut sources = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
        let name = entry.file_name();
        if !name.to_string_lossy().ends_with(extension) {
            continue;
        }
        // A directory named `foo.tex` is not a source document.
        match entry.file_type().await {
            Ok(ft) if ft.is_dir() => continue,
            _ => {}
        }
        sources.push(entry.path());
    }

    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Discovered {} source files in {}", sources.len(), dir.display());
    Ok(sources)
}
