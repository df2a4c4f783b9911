//! Result types produced by a batch run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of compiling one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    /// The compiler exited with status 0.
    Success {
        /// Where the compiler was asked to write the PDF.
        pdf_path: PathBuf,
    },
    /// The compiler ran but exited non-zero.
    CompilerError {
        /// `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
        /// Trailing non-empty output lines, verbatim.
        diagnostics: Vec<String>,
    },
    /// The compiler exceeded the per-document timeout and was killed.
    Timeout { secs: u64 },
    /// The compiler executable could not be found. Aborts the batch.
    ToolMissing { compiler: String },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success { .. })
    }

    /// True for outcomes that stop the remaining documents from being attempted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConversionOutcome::ToolMissing { .. })
    }
}

/// One attempted document and what happened to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Path of the `.tex` file as discovered in the input directory.
    pub source: PathBuf,
    pub outcome: ConversionOutcome,
    /// Wall-clock time spent on this document.
    pub duration_ms: u64,
}

impl DocumentResult {
    /// The source file name, for display.
    pub fn file_name(&self) -> String {
        display_name(&self.source)
    }
}

/// Aggregate counts for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Source documents discovered in the input directory.
    pub discovered: usize,
    /// Documents the compiler was actually run for (or attempted to be).
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub timed_out: usize,
    /// Intermediate files deleted by the cleanup pass.
    pub intermediates_removed: usize,
    pub total_duration_ms: u64,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub documents: Vec<DocumentResult>,
    /// Set when the batch stopped early because the compiler is missing.
    pub aborted: bool,
    pub stats: BatchStats,
}

impl BatchReport {
    /// Documents whose outcome is not a success.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents.iter().filter(|d| !d.outcome.is_success())
    }
}

/// File-name component of `path` for display, or the whole path if it has none.
pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serialises_with_status_tag() {
        let o = ConversionOutcome::Timeout { secs: 60 };
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["status"], "timeout");
        assert_eq!(json["secs"], 60);

        let o = ConversionOutcome::CompilerError {
            exit_code: Some(1),
            diagnostics: vec!["! Undefined control sequence.".into()],
        };
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["status"], "compiler_error");
        assert_eq!(json["diagnostics"][0], "! Undefined control sequence.");
    }

    #[test]
    fn only_tool_missing_is_fatal() {
        assert!(ConversionOutcome::ToolMissing {
            compiler: "pdflatex".into()
        }
        .is_fatal());
        assert!(!ConversionOutcome::Timeout { secs: 1 }.is_fatal());
        assert!(!ConversionOutcome::CompilerError {
            exit_code: None,
            diagnostics: vec![]
        }
        .is_fatal());
    }

    #[test]
    fn failures_skips_successes() {
        let report = BatchReport {
            output_dir: PathBuf::from("examples/pdf"),
            documents: vec![
                DocumentResult {
                    source: PathBuf::from("examples/a.tex"),
                    outcome: ConversionOutcome::Success {
                        pdf_path: PathBuf::from("examples/pdf/a.pdf"),
                    },
                    duration_ms: 10,
                },
                DocumentResult {
                    source: PathBuf::from("examples/b.tex"),
                    outcome: ConversionOutcome::Timeout { secs: 60 },
                    duration_ms: 60_000,
                },
            ],
            aborted: false,
            stats: BatchStats::default(),
        };
        let names: Vec<String> = report.failures().map(|d| d.file_name()).collect();
        assert_eq!(names, vec!["b.tex"]);
    }

    #[test]
    fn display_name_is_last_component() {
        use std::path::Path;
        assert_eq!(display_name(Path::new("examples/pdf/a.pdf")), "a.pdf");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
