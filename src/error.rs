//! Error types for the tex2pdf-batch library.
//!
//! Two layers mirror two failure modes:
//!
//! * [`BatchError`] is **fatal**: the batch cannot start at all (input
//!   directory unreadable, output directory cannot be created, bad config).
//!   Returned as `Err(BatchError)` from [`crate::convert::run_batch`].
//!
//! * [`crate::output::ConversionOutcome`] is **per document**: a compile
//!   error, a timeout, or a missing compiler. Stored in each
//!   [`crate::output::DocumentResult`] so one broken resume never hides the
//!   results of the others.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the tex2pdf-batch library.
#[derive(Debug, Error)]
pub enum BatchError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input directory is missing or cannot be listed.
    #[error("Cannot read input directory '{path}': {source}\nRun from the project root or pass --input-dir.")]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The output directory (or one of its parents) could not be created.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_dir_display_mentions_path() {
        let e = BatchError::InputDirUnreadable {
            path: PathBuf::from("examples"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let msg = e.to_string();
        assert!(msg.contains("'examples'"), "got: {msg}");
        assert!(msg.contains("--input-dir"), "got: {msg}");
    }

    #[test]
    fn output_dir_error_keeps_source() {
        use std::error::Error as _;
        let e = BatchError::OutputDirCreateFailed {
            path: PathBuf::from("/readonly/pdf"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(e.to_string().contains("/readonly/pdf"));
        assert!(e.source().is_some());
    }

    #[test]
    fn invalid_config_display() {
        let e = BatchError::InvalidConfig("compiler must not be empty".into());
        assert_eq!(
            e.to_string(),
            "Invalid configuration: compiler must not be empty"
        );
    }
}
