//! Configuration types for a batch conversion run.
//!
//! Every knob lives in [`BatchConfig`], built via [`BatchConfigBuilder`].
//! The defaults reproduce the plain "run it from the project root" workflow:
//! `.tex` files in `examples/`, PDFs in `examples/pdf/`, `pdflatex` on `PATH`,
//! 60 seconds per document.

use crate::error::BatchError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Default input directory, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "examples";

/// Default output subdirectory name inside the input directory.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "pdf";

/// Default LaTeX-to-PDF compiler executable.
pub const DEFAULT_COMPILER: &str = "pdflatex";

/// Default per-document timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for one batch run.
///
/// # Example
/// ```rust
/// use tex2pdf_batch::BatchConfig;
///
/// let config = BatchConfig::builder()
///     .input_dir("resumes")
///     .timeout_secs(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.output_dir, std::path::PathBuf::from("resumes/pdf"));
/// ```
#[derive(Clone)]
pub struct BatchConfig {
    /// Directory scanned for source documents. Default: `examples`.
    pub input_dir: PathBuf,

    /// Directory receiving PDFs and intermediate files. Default: `<input_dir>/pdf`.
    ///
    /// Created (with parents) before any conversion runs.
    pub output_dir: PathBuf,

    /// Compiler executable name or path. Default: `pdflatex`.
    pub compiler: String,

    /// File-name suffix identifying source documents. Default: `.tex`.
    pub source_extension: String,

    /// Wall-clock limit per compiler invocation, in seconds. Range: 1–3600. Default: 60.
    pub timeout_secs: u64,

    /// Number of trailing non-empty output lines kept from a failed compile. Default: 5.
    pub diagnostic_lines: usize,

    /// Suffixes of intermediate files removed after the batch. Default: `.aux`, `.log`, `.out`.
    pub intermediate_suffixes: Vec<String>,

    /// Run the cleanup pass. Default: true.
    pub cleanup: bool,

    /// Receives per-document events as the batch runs.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let input_dir = PathBuf::from(DEFAULT_INPUT_DIR);
        let output_dir = input_dir.join(DEFAULT_OUTPUT_SUBDIR);
        Self {
            input_dir,
            output_dir,
            compiler: DEFAULT_COMPILER.to_string(),
            source_extension: ".tex".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            diagnostic_lines: 5,
            intermediate_suffixes: vec![".aux".into(), ".log".into(), ".out".into()],
            cleanup: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("compiler", &self.compiler)
            .field("source_extension", &self.source_extension)
            .field("timeout_secs", &self.timeout_secs)
            .field("diagnostic_lines", &self.diagnostic_lines)
            .field("intermediate_suffixes", &self.intermediate_suffixes)
            .field("cleanup", &self.cleanup)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl BatchConfig {
    /// Create a new builder for `BatchConfig`.
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder {
            config: Self::default(),
            output_dir_set: false,
        }
    }

    /// The timeout as a [`std::time::Duration`].
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Builder for [`BatchConfig`].
///
/// Unless [`output_dir`](Self::output_dir) is called, the output directory
/// follows the input directory as `<input_dir>/pdf`.
pub struct BatchConfigBuilder {
    config: BatchConfig,
    output_dir_set: bool,
}

impl fmt::Debug for BatchConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfigBuilder")
            .field("config", &self.config)
            .field("output_dir_set", &self.output_dir_set)
            .finish()
    }
}

impl BatchConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self.output_dir_set = true;
        self
    }

    pub fn compiler(mut self, compiler: impl Into<String>) -> Self {
        self.config.compiler = compiler.into();
        self
    }

    pub fn source_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.source_extension = ext.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs.clamp(1, 3600);
        self
    }

    pub fn diagnostic_lines(mut self, n: usize) -> Self {
        self.config.diagnostic_lines = n.max(1);
        self
    }

    pub fn intermediate_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.intermediate_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn cleanup(mut self, v: bool) -> Self {
        self.config.cleanup = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(mut self) -> Result<BatchConfig, BatchError> {
        if !self.output_dir_set {
            self.config.output_dir = self.config.input_dir.join(DEFAULT_OUTPUT_SUBDIR);
        }

        let c = &self.config;
        if c.compiler.trim().is_empty() {
            return Err(BatchError::InvalidConfig(
                "compiler must not be empty".into(),
            ));
        }
        if !is_suffix(&c.source_extension) {
            return Err(BatchError::InvalidConfig(format!(
                "source extension must start with '.', got {:?}",
                c.source_extension
            )));
        }
        for suffix in &c.intermediate_suffixes {
            if !is_suffix(suffix) {
                return Err(BatchError::InvalidConfig(format!(
                    "intermediate suffix must start with '.', got {suffix:?}"
                )));
            }
            if suffix.eq_ignore_ascii_case(".pdf") {
                return Err(BatchError::InvalidConfig(
                    "'.pdf' cannot be an intermediate suffix".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

fn is_suffix(s: &str) -> bool {
    s.len() > 1 && s.starts_with('.')
}
