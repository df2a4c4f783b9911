//! Best-effort removal of intermediate compiler output.
//!
//! Only file names are inspected. A file that is locked, already gone, or
//! otherwise refuses deletion is skipped silently so the rest still go.

use std::path::Path;
use tracing::debug;

/// Remove every file directly inside `dir` whose name ends with one of `suffixes`.
///
/// Returns the number of files removed. Never fails.
pub async fn remove_intermediates(dir: &Path, suffixes: &[String]) -> usize {
    let mut removed = 0;

    for suffix in suffixes {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cleanup: cannot list {}: {}", dir.display(), e);
                return removed;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    debug!("Cleanup: listing {} failed: {}", dir.display(), e);
                    break;
                }
            };
            if !entry.file_name().to_string_lossy().ends_with(suffix.as_str()) {
                continue;
            }

            let path = entry.path();
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    debug!("Removed {}", path.display());
                    removed += 1;
                }
                Err(e) => debug!("Cleanup: could not remove {}: {}", path.display(), e),
            }
        }
    }

    removed
}
