//! # eobscan
//!
//! Field extraction from scanned Explanation-of-Benefits (EOB) PDFs.
//!
//! A multi-page EOB is split into single-page PDFs, each page is sent to a
//! document-analysis service (AWS Textract by default), and the returned
//! LINE/WORD/TABLE/CELL blocks are turned into a fixed ten-field record.
//! Page records are merged so that the last page holding a value wins.
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "textract")]
//! fn main() -> eobscan::Result<()> {
//!     use std::sync::Arc;
//!     use eobscan::{Pipeline, PipelineOptions, TextractAnalyzer};
//!
//!     let analyzer = Arc::new(TextractAnalyzer::new()?);
//!     let pipeline = Pipeline::new(analyzer, PipelineOptions::default())?;
//!
//!     // Reads data.pdf, writes output.json
//!     let record = pipeline.run()?;
//!     for (field, value) in record.iter() {
//!         println!("{}: {}", field, value.unwrap_or("-"));
//!     }
//!     Ok(())
//! }
//! # #[cfg(not(feature = "textract"))]
//! # fn main() {}
//! ```
//!
//! ## Stages
//!
//! - [`pages`]: workspace reset and page splitting (lopdf)
//! - [`analyze`]: the [`DocumentAnalyzer`] seam and its backends
//! - [`extract`]: regex and table-coordinate rules
//! - [`merge`]: last-non-null-wins merging
//! - [`pipeline`]: orchestration and output

pub mod analyze;
pub mod detect;
pub mod error;
pub mod extract;
pub mod merge;
pub mod model;
pub mod pages;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
#[cfg(feature = "textract")]
pub use analyze::TextractAnalyzer;
pub use analyze::{AnalysisFeature, DocumentAnalyzer, ResponseFileAnalyzer};
pub use error::{Error, Result};
pub use extract::{FieldExtractor, TableRule, FIELD_PATTERNS, TABLE_RULES};
pub use merge::merge_records;
pub use model::{AnalysisResponse, Block, BlockType, Field, Record};
pub use pages::{reset_workspace, split_pdf};
pub use pipeline::{Pipeline, PipelineEvent, PipelineOptions};
pub use render::JsonFormat;

use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Extract a record from a single analysis response.
///
/// # Example
///
/// ```
/// use eobscan::{extract_response, AnalysisResponse, Block, Field};
///
/// let response = AnalysisResponse::new(vec![Block::line("1", "payment to: Acme Corp")]);
/// let record = extract_response(&response).unwrap();
/// assert_eq!(record.get(Field::PaymentTo), Some("Acme Corp"));
/// ```
pub fn extract_response(response: &AnalysisResponse) -> Result<Record> {
    Ok(FieldExtractor::new()?.extract(response))
}

/// Extract a record from a saved analysis response file (JSON).
///
/// # Example
///
/// ```no_run
/// use eobscan::extract_response_file;
///
/// let record = extract_response_file("responses/page_1.json").unwrap();
/// println!("{} fields found", record.filled_count());
/// ```
pub fn extract_response_file<P: AsRef<Path>>(path: P) -> Result<Record> {
    let json = fs::read_to_string(path)?;
    extract_response(&AnalysisResponse::from_json(&json)?)
}

/// Split, analyze and merge a document without writing an output file.
///
/// Single-page files go to the default pages directory, which is cleared
/// first.
pub fn process_file<P: AsRef<Path>>(
    path: P,
    analyzer: Arc<dyn DocumentAnalyzer>,
) -> Result<Record> {
    let pipeline = Pipeline::new(analyzer, PipelineOptions::default())?;
    pipeline.process(path.as_ref())
}
