//! Progress-callback trait for per-document batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::BatchConfigBuilder::progress_callback`] to receive
//! events as the batch runs. Documents are compiled one at a time, so events
//! arrive strictly in order: `on_document_start` for a file is always
//! followed by its `on_document_complete` before the next file starts.
//!
//! # Example
//!
//! ```rust
//! use tex2pdf_batch::{BatchConfig, BatchProgressCallback, DocumentResult};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl BatchProgressCallback for Printer {
//!     fn on_document_start(&self, _index: usize, _total: usize, source: &Path) {
//!         println!("Converting: {}...", source.display());
//!     }
//!
//!     fn on_document_complete(&self, _index: usize, _total: usize, result: &DocumentResult) {
//!         println!("  {:?}", result.outcome);
//!     }
//! }
//!
//! let config = BatchConfig::builder()
//!     .progress_callback(Arc::new(Printer) as Arc<dyn BatchProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::{BatchReport, DocumentResult};
use std::path::Path;
use std::sync::Arc;

/// Called by the batch runner as it processes each document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. `index` is 1-based.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once after discovery, before any compiler runs.
    fn on_batch_start(&self, total: usize) {
        let _ = total;
    }

    /// Called just before the compiler is spawned for `source`.
    fn on_document_start(&self, index: usize, total: usize, source: &Path) {
        let _ = (index, total, source);
    }

    /// Called as soon as the compiler for a document finishes, fails or times out.
    fn on_document_complete(&self, index: usize, total: usize, result: &DocumentResult) {
        let _ = (index, total, result);
    }

    /// Called before intermediate files are removed.
    fn on_cleanup_start(&self) {}

    /// Called after the cleanup pass with the number of files removed.
    fn on_cleanup_complete(&self, removed: usize) {
        let _ = removed;
    }

    /// Called once at the very end of the batch.
    fn on_batch_complete(&self, report: &BatchReport) {
        let _ = report;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BatchConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
