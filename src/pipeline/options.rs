//! Pipeline options and configuration.

use std::path::PathBuf;

use crate::render::JsonFormat;

/// Default source document.
pub const DEFAULT_INPUT: &str = "data.pdf";
/// Default directory for single-page PDFs.
pub const DEFAULT_PAGES_DIR: &str = "pdf_pages";
/// Default output file.
pub const DEFAULT_OUTPUT: &str = "output.json";

/// Options for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Source PDF
    pub input_path: PathBuf,

    /// Directory of single-page PDFs, cleared at the start of every run
    pub pages_dir: PathBuf,

    /// Where the merged record is written
    pub output_path: PathBuf,

    /// Analyze pages concurrently (results are still merged in page order)
    pub parallel: bool,

    /// Output JSON layout
    pub json_format: JsonFormat,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source PDF.
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Set the pages directory.
    pub fn with_pages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pages_dir = dir.into();
        self
    }

    /// Set the output file.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Enable or disable parallel page analysis.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the output JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            pages_dir: PathBuf::from(DEFAULT_PAGES_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            parallel: false,
            json_format: JsonFormat::Pretty,
        }
    }
}
