//! Compiler invocation: run the external LaTeX compiler for one document.
//!
//! Every failure mode is folded into a [`ConversionOutcome`] rather than an
//! `Err`, so the batch loop only has to look at
//! [`ConversionOutcome::is_fatal`] to decide whether to keep going.
//!
//! ## Timeout
//!
//! The child is spawned with `kill_on_drop(true)`. `wait_with_output` reads
//! stdout and stderr to EOF, so a grandchild that inherits the pipes keeps
//! the document pending even after the compiler itself exits. The timeout
//! bounds that wait too: when it expires the pending future is dropped
//! together with the child, which kills the process, and the document is
//! reported as timed out.

use crate::config::BatchConfig;
use crate::output::{display_name, ConversionOutcome, DocumentResult};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, warn};

/// Keeps the compiler from stopping at an interactive prompt on errors.
pub const BATCH_MODE_FLAG: &str = "-interaction=nonstopmode";

/// Build the three compiler arguments: batch-mode flag, output directory, source.
pub fn compiler_args(source: &Path, output_dir: &Path) -> Vec<OsString> {
    let mut out_arg = OsString::from("-output-directory=");
    out_arg.push(output_dir);
    vec![
        OsString::from(BATCH_MODE_FLAG),
        out_arg,
        source.as_os_str().to_os_string(),
    ]
}

/// The PDF the compiler writes for `source`: same stem, `.pdf` extension.
pub fn pdf_path_for(source: &Path, output_dir: &Path, source_extension: &str) -> PathBuf {
    let name = display_name(source);
    let stem = name.strip_suffix(source_extension).unwrap_or(&name);
    output_dir.join(format!("{stem}.pdf"))
}

/// Last `n` non-empty lines of `text`, oldest first.
pub fn tail_lines(text: &str, n: usize) -> Vec<String> {
    let mut tail: Vec<String> = text
        .lines()
        .rev()
        .filter(|l| !l.trim().is_empty())
        .take(n)
        .map(str::to_string)
        .collect();
    tail.reverse();
    tail
}

/// Compile one source document into the configured output directory.
///
/// Always returns a `DocumentResult`; never propagates an error upward.
pub async fn compile_document(source: &Path, config: &BatchConfig) -> DocumentResult {
    let start = Instant::now();
    let outcome = run_compiler(source, config).await;
    DocumentResult {
        source: source.to_path_buf(),
        outcome,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

async fn run_compiler(source: &Path, config: &BatchConfig) -> ConversionOutcome {
    let args = compiler_args(source, &config.output_dir);
    debug!("Spawning {} {:?}", config.compiler, args);

    let child = Command::new(&config.compiler)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Compiler '{}' not found", config.compiler);
            return ConversionOutcome::ToolMissing {
                compiler: config.compiler.clone(),
            };
        }
        Err(e) => {
            warn!("Failed to start '{}': {}", config.compiler, e);
            return ConversionOutcome::CompilerError {
                exit_code: None,
                diagnostics: vec![format!("failed to start {}: {e}", config.compiler)],
            };
        }
    };

    let output = match tokio::time::timeout(config.timeout(), child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            warn!("Waiting on '{}' failed: {}", config.compiler, e);
            return ConversionOutcome::CompilerError {
                exit_code: None,
                diagnostics: vec![format!("failed to wait for {}: {e}", config.compiler)],
            };
        }
        Err(_) => {
            warn!("{} timed out after {}s", source.display(), config.timeout_secs);
            return ConversionOutcome::Timeout {
                secs: config.timeout_secs,
            };
        }
    };

    if output.status.success() {
        return ConversionOutcome::Success {
            pdf_path: pdf_path_for(source, &config.output_dir, &config.source_extension),
        };
    }

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.stderr.is_empty() {
        combined.push('\n');
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
    }
    warn!("{} failed with status {}", source.display(), output.status);
    ConversionOutcome::CompilerError {
        exit_code: output.status.code(),
        diagnostics: tail_lines(&combined, config.diagnostic_lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_mode_outdir_source() {
        let args = compiler_args(Path::new("examples/a.tex"), Path::new("examples/pdf"));
        assert_eq!(
            args,
            vec![
                OsString::from("-interaction=nonstopmode"),
                OsString::from("-output-directory=examples/pdf"),
                OsString::from("examples/a.tex"),
            ]
        );
    }

    #[test]
    fn pdf_path_swaps_extension() {
        let out = Path::new("examples/pdf");
        assert_eq!(
            pdf_path_for(Path::new("examples/a.tex"), out, ".tex"),
            out.join("a.pdf")
        );
        assert_eq!(
            pdf_path_for(Path::new("examples/resume.v2.tex"), out, ".tex"),
            out.join("resume.v2.pdf")
        );
    }

    #[test]
    fn tail_keeps_last_non_empty_lines() {
        let text = "one\ntwo\n\nthree\n   \nfour\nfive\nsix\n\n";
        assert_eq!(
            tail_lines(text, 5),
            vec!["two", "three", "four", "five", "six"]
        );
    }

    #[test]
    fn tail_of_short_output() {
        assert_eq!(tail_lines("only\r\n", 5), vec!["only"]);
        assert!(tail_lines("", 5).is_empty());
        assert!(tail_lines("\n\n  \n", 5).is_empty());
    }

    #[tokio::test]
    async fn missing_compiler_is_tool_missing() {
        let config = BatchConfig::builder()
            .compiler("tex2pdf-batch-no-such-compiler")
            .build()
            .unwrap();
        let result = compile_document(Path::new("a.tex"), &config).await;
        assert_eq!(
            result.outcome,
            ConversionOutcome::ToolMissing {
                compiler: "tex2pdf-batch-no-such-compiler".into()
            }
        );
    }
}
