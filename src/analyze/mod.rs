//! Page analysis: hand a single-page PDF to a document-analysis service.
//!
//! The [`DocumentAnalyzer`] trait is the seam between the pipeline and the
//! service. [`TextractAnalyzer`] calls AWS Textract; [`ResponseFileAnalyzer`]
//! replays responses saved earlier, which is handy for re-running extraction
//! without paying for another service call.
//!
//! # Example
//!
//! ```no_run
//! use eobscan::analyze::{DocumentAnalyzer, ResponseFileAnalyzer};
//! use std::path::Path;
//!
//! fn main() -> eobscan::Result<()> {
//!     let analyzer = ResponseFileAnalyzer::new("responses");
//!     let response = analyzer.analyze(Path::new("pdf_pages/page_1.pdf"))?;
//!     println!("{} blocks", response.blocks.len());
//!     Ok(())
//! }
//! ```

mod replay;
#[cfg(feature = "textract")]
mod textract;

pub use replay::ResponseFileAnalyzer;
#[cfg(feature = "textract")]
pub use textract::TextractAnalyzer;

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::AnalysisResponse;

/// Feature sets the analysis service can be asked to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisFeature {
    /// Key/value pairs
    Forms,
    /// Tables and cells
    Tables,
}

impl AnalysisFeature {
    /// Features requested for EOB pages.
    pub const DEFAULT: [AnalysisFeature; 2] = [AnalysisFeature::Forms, AnalysisFeature::Tables];

    /// Wire name of the feature.
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisFeature::Forms => "FORMS",
            AnalysisFeature::Tables => "TABLES",
        }
    }
}

/// Trait for document-analysis backends.
///
/// Implementations return the service response verbatim; interpreting it
/// is the extractor's job.
pub trait DocumentAnalyzer: Send + Sync {
    /// Get the name of this analyzer.
    fn name(&self) -> &str;

    /// Analyze a single-page document held in memory.
    fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResponse>;

    /// Analyze a single-page document on disk.
    fn analyze(&self, page: &Path) -> Result<AnalysisResponse> {
        let bytes = fs::read(page)?;
        self.analyze_bytes(&bytes)
    }
}
