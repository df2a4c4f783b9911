//! CLI binary for tex2pdf-batch.
//!
//! A thin shim over the library crate that maps CLI flags to `BatchConfig`
//! and prints per-document progress. With no arguments it converts
//! `examples/*.tex` into `examples/pdf/` using `pdflatex`.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tex2pdf_batch::{
    display_name, run_batch, BatchConfig, BatchProgressCallback, ConversionOutcome,
    DocumentResult, ProgressCallback,
};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(&self, code: &str, s: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }
    fn green(&self, s: &str) -> String {
        self.paint("32", s)
    }
    fn red(&self, s: &str) -> String {
        self.paint("31", s)
    }
    fn yellow(&self, s: &str) -> String {
        self.paint("33", s)
    }
    fn dim(&self, s: &str) -> String {
        self.paint("2", s)
    }
}

// ── CLI progress callback ────────────────────────────────────────────────────

/// Prints one line before and one result block after each document on
/// stdout, and shows a spinner on stderr while the compiler runs.
struct CliProgressCallback {
    extension: String,
    compiler: String,
    palette: Palette,
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgressCallback {
    fn new(config: &BatchConfig) -> Arc<Self> {
        Arc::new(Self {
            extension: config.source_extension.clone(),
            compiler: config.compiler.clone(),
            palette: Palette {
                enabled: io::stdout().is_terminal(),
            },
            spinner: Mutex::new(None),
        })
    }

    fn start_spinner(&self, name: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}  {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_message(format!("{} {name}", self.compiler));
        bar.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(bar);
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total: usize) {
        println!("Found {total} {} files to convert.\n", self.extension);
    }

    fn on_document_start(&self, _index: usize, _total: usize, source: &Path) {
        let name = display_name(source);
        println!("Converting: {name}...");
        self.start_spinner(&name);
    }

    fn on_document_complete(&self, _index: usize, _total: usize, result: &DocumentResult) {
        self.stop_spinner();
        for line in outcome_lines(result, &self.palette) {
            println!("{line}");
        }
    }

    fn on_cleanup_start(&self) {
        println!("\nCleaning up temporary files...");
    }
}

/// The result block printed after a document finishes.
fn outcome_lines(result: &DocumentResult, p: &Palette) -> Vec<String> {
    let name = result.file_name();
    match &result.outcome {
        ConversionOutcome::Success { pdf_path } => vec![format!(
            "  {} Success: {}  {}",
            p.green("[OK]"),
            display_name(pdf_path),
            p.dim(&format!("{:.1}s", result.duration_ms as f64 / 1000.0)),
        )],
        ConversionOutcome::CompilerError { diagnostics, .. } => {
            let mut lines = vec![format!("  {} Error compiling {name}", p.red("[ERROR]"))];
            lines.extend(diagnostics.iter().map(|l| format!("    {l}")));
            lines
        }
        ConversionOutcome::Timeout { .. } => vec![format!("  {} {name}", p.yellow("[TIMEOUT]"))],
        ConversionOutcome::ToolMissing { compiler } => vec![format!(
            "  {} {compiler} not found. Please install MiKTeX or TeX Live.",
            p.red("[ERROR]")
        )],
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert examples/*.tex into examples/pdf/ (run from the project root)
  tex2pdf

  # Another folder of resumes, longer timeout
  tex2pdf --input-dir resumes --timeout 120

  # Keep .aux/.log/.out files for debugging a broken template
  tex2pdf --keep-intermediates

  # Machine-readable report
  tex2pdf --json > report.json

ENVIRONMENT VARIABLES:
  TEX2PDF_INPUT_DIR       Directory containing .tex files
  TEX2PDF_OUTPUT_DIR      Directory receiving PDFs
  TEX2PDF_COMPILER        Compiler executable (default: pdflatex)
  TEX2PDF_TIMEOUT         Per-document timeout in seconds
  RUST_LOG                Override log filter (e.g. tex2pdf_batch=debug)

SETUP:
  pdflatex ships with TeX Live (Linux/macOS) and MiKTeX (Windows).
  It must be on PATH, or pass its full path with --compiler.
"#;

/// Batch-convert LaTeX files to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "tex2pdf",
    version,
    about = "Batch-convert LaTeX (.tex) files to PDF with pdflatex",
    long_about = "Compile every .tex file in a directory to PDF, one at a time, with a \
per-file timeout, then remove the intermediate .aux/.log/.out files. Individual \
failures are reported but never change the exit code.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory containing the .tex files.
    #[arg(long, env = "TEX2PDF_INPUT_DIR", default_value = "examples")]
    input_dir: PathBuf,

    /// Directory receiving PDFs. Default: <INPUT_DIR>/pdf.
    #[arg(long, env = "TEX2PDF_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// LaTeX compiler executable.
    #[arg(long, env = "TEX2PDF_COMPILER", default_value = "pdflatex")]
    compiler: String,

    /// Per-document timeout in seconds (1–3600).
    #[arg(long, env = "TEX2PDF_TIMEOUT", default_value_t = 60,
          value_parser = clap::value_parser!(u64).range(1..=3600))]
    timeout: u64,

    /// Do not delete .aux/.log/.out files after the batch.
    #[arg(long, env = "TEX2PDF_KEEP_INTERMEDIATES")]
    keep_intermediates: bool,

    /// Print the batch report as JSON instead of progress lines.
    #[arg(long, env = "TEX2PDF_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TEX2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "TEX2PDF_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Progress lines already say everything per document, so library logs
    // stay at error level unless asked for.
    let show_progress = !cli.quiet && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli, show_progress)?;

    // ── Run batch ────────────────────────────────────────────────────────
    let report = run_batch(&config)
        .await
        .context("Batch conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet {
        println!("\nDone! PDFs are in: {}", report.output_dir.display());
    }

    Ok(())
}

/// Map CLI args to `BatchConfig`.
fn build_config(cli: &Cli, show_progress: bool) -> Result<BatchConfig> {
    let mut builder = BatchConfig::builder()
        .input_dir(&cli.input_dir)
        .compiler(&cli.compiler)
        .timeout_secs(cli.timeout)
        .cleanup(!cli.keep_intermediates);

    if let Some(ref dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }

    let mut config = builder.build().context("Invalid configuration")?;

    if show_progress {
        let cb: ProgressCallback = CliProgressCallback::new(&config);
        config.progress_callback = Some(cb);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_uses_project_defaults() {
        let cli = Cli::try_parse_from(["tex2pdf"]).unwrap();
        let config = build_config(&cli, false).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("examples"));
        assert_eq!(config.output_dir, PathBuf::from("examples").join("pdf"));
        assert_eq!(config.compiler, "pdflatex");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.cleanup);
        assert!(config.progress_callback.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "tex2pdf",
            "--input-dir",
            "cv",
            "--output-dir",
            "out",
            "--compiler",
            "xelatex",
            "--timeout",
            "5",
            "--keep-intermediates",
        ])
        .unwrap();
        let config = build_config(&cli, true).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.compiler, "xelatex");
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.cleanup);
        assert!(config.progress_callback.is_some());
    }

    #[test]
    fn timeout_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["tex2pdf", "--timeout", "0"]).is_err());
    }

    fn result(outcome: ConversionOutcome) -> DocumentResult {
        DocumentResult {
            source: PathBuf::from("examples/resume.tex"),
            outcome,
            duration_ms: 1500,
        }
    }

    const PLAIN: Palette = Palette { enabled: false };

    #[test]
    fn success_line_names_pdf_and_duration() {
        let lines = outcome_lines(
            &result(ConversionOutcome::Success {
                pdf_path: PathBuf::from("examples/pdf/resume.pdf"),
            }),
            &PLAIN,
        );
        assert_eq!(lines, vec!["  [OK] Success: resume.pdf  1.5s"]);
    }

    #[test]
    fn compiler_error_lists_diagnostics() {
        let lines = outcome_lines(
            &result(ConversionOutcome::CompilerError {
                exit_code: Some(1),
                diagnostics: vec![
                    "! Undefined control sequence.".into(),
                    "l.12 \\foo".into(),
                ],
            }),
            &PLAIN,
        );
        assert_eq!(
            lines,
            vec![
                "  [ERROR] Error compiling resume.tex",
                "    ! Undefined control sequence.",
                "    l.12 \\foo",
            ]
        );
    }

    #[test]
    fn timeout_line_names_source() {
        let lines = outcome_lines(&result(ConversionOutcome::Timeout { secs: 60 }), &PLAIN);
        assert_eq!(lines, vec!["  [TIMEOUT] resume.tex"]);
    }

    #[test]
    fn tool_missing_install_hint_printed_once() {
        let lines = outcome_lines(
            &result(ConversionOutcome::ToolMissing {
                compiler: "pdflatex".into(),
            }),
            &PLAIN,
        );
        let hints = lines
            .iter()
            .filter(|l| l.contains("not found. Please install MiKTeX or TeX Live."))
            .count();
        assert_eq!(hints, 1);
        assert_eq!(
            lines,
            vec!["  [ERROR] pdflatex not found. Please install MiKTeX or TeX Live."]
        );
    }
}
