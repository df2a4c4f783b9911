//! Batch entry points.
//!
//! [`run_batch`] drives the three pipeline stages in order: prepare the
//! output directory, compile each discovered document one at a time, then
//! clean up intermediates. Per-document failures end up in the returned
//! [`BatchReport`]; only setup failures return `Err`.

use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::output::{BatchReport, BatchStats, ConversionOutcome, DocumentResult};
use crate::pipeline::{cleanup, compile, discover};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Convert every source document in `config.input_dir` to PDF.
///
/// # Errors
/// Returns `Err(BatchError)` only when the batch cannot start:
/// - the output directory cannot be created
/// - the input directory cannot be listed
///
/// A missing compiler is not an error here: the batch stops at the first
/// document, records a `ToolMissing` outcome, sets `report.aborted`, and
/// still runs cleanup.
pub async fn run_batch(config: &BatchConfig) -> Result<BatchReport, BatchError> {
    let total_start = Instant::now();
    info!(
        "Starting batch: {} -> {}",
        config.input_dir.display(),
        config.output_dir.display()
    );

    // ── Step 1: Output directory ─────────────────────────────────────────
    discover::ensure_output_dir(&config.output_dir).await?;

    // ── Step 2: Discover sources ─────────────────────────────────────────
    let sources =
        discover::discover_sources(&config.input_dir, &config.source_extension).await?;
    let total = sources.len();
    info!("Found {} source documents", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    // ── Step 3: Compile sequentially ─────────────────────────────────────
    let mut documents: Vec<DocumentResult> = Vec::with_capacity(total);
    let mut aborted = false;

    for (i, source) in sources.iter().enumerate() {
        let result = convert_document(source, i + 1, total, config).await;
        let fatal = result.outcome.is_fatal();
        documents.push(result);
        if fatal {
            warn!(
                "Compiler '{}' missing; skipping remaining {} documents",
                config.compiler,
                total - i - 1
            );
            aborted = true;
            break;
        }
    }

    // ── Step 4: Cleanup ──────────────────────────────────────────────────
    let removed = if config.cleanup {
        if let Some(ref cb) = config.progress_callback {
            cb.on_cleanup_start();
        }
        let removed =
            cleanup::remove_intermediates(&config.output_dir, &config.intermediate_suffixes)
                .await;
        if let Some(ref cb) = config.progress_callback {
            cb.on_cleanup_complete(removed);
        }
        removed
    } else {
        0
    };

    // ── Step 5: Stats ────────────────────────────────────────────────────
    let stats = compute_stats(&documents, total, removed, total_start);
    info!(
        "Batch complete: {}/{} succeeded, {} failed, {} timed out, {}ms",
        stats.succeeded, stats.discovered, stats.failed, stats.timed_out, stats.total_duration_ms
    );

    let report = BatchReport {
        output_dir: config.output_dir.clone(),
        documents,
        aborted,
        stats,
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(&report);
    }

    Ok(report)
}

/// Synchronous wrapper around [`run_batch`].
///
/// Creates a temporary tokio runtime internally.
///
/// # Panics
///
/// Panics when called from inside a tokio runtime, since the temporary
/// runtime cannot block a thread that is already driving async tasks.
pub fn run_batch_sync(config: &BatchConfig) -> Result<BatchReport, BatchError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BatchError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(run_batch(config))
}

/// Compile a single document, firing progress events around it.
///
/// `index` is 1-based. Does not create the output directory or clean up.
pub async fn convert_document(
    source: &Path,
    index: usize,
    total: usize,
    config: &BatchConfig,
) -> DocumentResult {
    if let Some(ref cb) = config.progress_callback {
        cb.on_document_start(index, total, source);
    }
    let result = compile::compile_document(source, config).await;
    if let Some(ref cb) = config.progress_callback {
        cb.on_document_complete(index, total, &result);
    }
    result
}

fn compute_stats(
    documents: &[DocumentResult],
    discovered: usize,
    removed: usize,
    start: Instant,
) -> BatchStats {
    let mut stats = BatchStats {
        discovered,
        attempted: documents.len(),
        intermediates_removed: removed,
        ..BatchStats::default()
    };
    for doc in documents {
        match doc.outcome {
            ConversionOutcome::Success { .. } => stats.succeeded += 1,
            ConversionOutcome::CompilerError { .. } => stats.failed += 1,
            ConversionOutcome::Timeout { .. } => stats.timed_out += 1,
            ConversionOutcome::ToolMissing { .. } => {}
        }
    }
    stats.total_duration_ms = start.elapsed().as_millis() as u64;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc(outcome: ConversionOutcome) -> DocumentResult {
        DocumentResult {
            source: PathBuf::from("x.tex"),
            outcome,
            duration_ms: 1,
        }
    }

    #[test]
    fn stats_count_each_outcome() {
        let docs = vec![
            doc(ConversionOutcome::Success {
                pdf_path: PathBuf::from("x.pdf"),
            }),
            doc(ConversionOutcome::CompilerError {
                exit_code: Some(1),
                diagnostics: vec![],
            }),
            doc(ConversionOutcome::Timeout { secs: 60 }),
            doc(ConversionOutcome::ToolMissing {
                compiler: "pdflatex".into(),
            }),
        ];
        let stats = compute_stats(&docs, 6, 2, Instant::now());
        assert_eq!(stats.discovered, 6);
        assert_eq!(stats.attempted, 4);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.timed_out, 1);
        assert_eq!(stats.intermediates_removed, 2);
    }

    #[test]
    fn sync_wrapper_runs_empty_batch() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = BatchConfig::builder()
            .input_dir(dir.path())
            .build()
            .unwrap();

        let report = run_batch_sync(&config).unwrap();
        assert!(report.documents.is_empty());
        assert!(!report.aborted);
        assert_eq!(report.stats.discovered, 0);
        assert!(dir.path().join("pdf").is_dir());
    }
}
