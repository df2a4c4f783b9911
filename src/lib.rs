//! # tex2pdf-batch
//!
//! Batch-convert LaTeX documents (resumes, mostly) to PDF by running an
//! external compiler such as `pdflatex` once per file.
//!
//! ## Pipeline Overview
//!
//! ```text
//! examples/*.tex
//!  │
//!  ├─ 1. Prepare   create examples/pdf/ (and parents)
//!  ├─ 2. Discover  list *.tex in the input directory
//!  ├─ 3. Compile   pdflatex -interaction=nonstopmode -output-directory=… file.tex
//!  │               one at a time, 60s timeout each
//!  ├─ 4. Cleanup   remove *.aux, *.log, *.out from the output directory
//!  └─ 5. Report    per-document outcome + counts
//! ```
//!
//! A compile error or timeout only affects its own document. A missing
//! compiler stops the batch after the first attempt, since every other
//! document would fail the same way.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tex2pdf_batch::{run_batch, BatchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig::default();
//!     let report = run_batch(&config).await?;
//!     for doc in report.failures() {
//!         eprintln!("{}: {:?}", doc.file_name(), doc.outcome);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `tex2pdf` binary (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{BatchConfig, BatchConfigBuilder};
pub use convert::{convert_document, run_batch, run_batch_sync};
pub use error::BatchError;
pub use output::{display_name, BatchReport, BatchStats, ConversionOutcome, DocumentResult};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
