//! End-to-end extraction: reset workspace, split, analyze, extract, merge, save.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use eobscan::analyze::ResponseFileAnalyzer;
//! use eobscan::pipeline::{Pipeline, PipelineOptions};
//!
//! fn main() -> eobscan::Result<()> {
//!     let options = PipelineOptions::new()
//!         .with_input("claim.pdf")
//!         .with_output("claim.json");
//!     let pipeline = Pipeline::new(Arc::new(ResponseFileAnalyzer::new("responses")), options)?;
//!     let record = pipeline.run()?;
//!     println!("{} fields found", record.filled_count());
//!     Ok(())
//! }
//! ```

mod options;

pub use options::{PipelineOptions, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_PAGES_DIR};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::analyze::DocumentAnalyzer;
use crate::error::Result;
use crate::extract::FieldExtractor;
use crate::merge::merge_records;
use crate::model::Record;
use crate::pages::{reset_workspace, split_pdf};
use crate::render::write_json;

/// Progress notifications emitted while a pipeline runs.
#[derive(Debug, Clone, Copy)]
pub enum PipelineEvent<'a> {
    /// The pages directory was cleared and recreated
    WorkspaceReset { dir: &'a Path },
    /// The document was split into `pages` single-page files
    Split { pages: usize },
    /// Page `page` (1-based) of `total` was analyzed and extracted
    PageAnalyzed {
        page: usize,
        total: usize,
        record: &'a Record,
    },
    /// Page records were merged
    Merged { record: &'a Record },
    /// The merged record was written
    Saved { path: &'a Path },
}

/// The EOB extraction pipeline.
pub struct Pipeline {
    analyzer: Arc<dyn DocumentAnalyzer>,
    extractor: FieldExtractor,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline using the standard extraction rules.
    pub fn new(analyzer: Arc<dyn DocumentAnalyzer>, options: PipelineOptions) -> Result<Self> {
        Ok(Self {
            analyzer,
            extractor: FieldExtractor::new()?,
            options,
        })
    }

    /// Replace the field extractor.
    pub fn with_extractor(mut self, extractor: FieldExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Get the pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Get the analyzer name.
    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Process the configured input and write the merged record.
    pub fn run(&self) -> Result<Record> {
        self.run_with_progress(|_| {})
    }

    /// Like [`run`](Self::run), reporting progress to `on_event`.
    ///
    /// The output file is only written once every page succeeded.
    pub fn run_with_progress<F>(&self, mut on_event: F) -> Result<Record>
    where
        F: FnMut(PipelineEvent<'_>),
    {
        let record = self.process_inner(&self.options.input_path, &mut on_event)?;

        let output = &self.options.output_path;
        write_json(output, &record, self.options.json_format)?;
        log::info!("Saved record to {}", output.display());
        on_event(PipelineEvent::Saved { path: output });

        Ok(record)
    }

    /// Process `input` into a merged record without writing output.
    pub fn process(&self, input: &Path) -> Result<Record> {
        self.process_inner(input, &mut |_| {})
    }

    /// Reset the workspace and split `input` into it.
    pub fn split(&self, input: &Path) -> Result<Vec<PathBuf>> {
        let dir = &self.options.pages_dir;
        reset_workspace(dir)?;
        split_pdf(input, dir)
    }

    /// Analyze one single-page file and extract its record.
    pub fn analyze_page(&self, page: &Path) -> Result<Record> {
        log::info!("Analyzing {} with {}", page.display(), self.analyzer.name());
        let response = self.analyzer.analyze(page)?;
        Ok(self.extractor.extract(&response))
    }

    fn process_inner(
        &self,
        input: &Path,
        on_event: &mut dyn FnMut(PipelineEvent<'_>),
    ) -> Result<Record> {
        let dir = &self.options.pages_dir;
        reset_workspace(dir)?;
        on_event(PipelineEvent::WorkspaceReset { dir });

        let pages = split_pdf(input, dir)?;
        on_event(PipelineEvent::Split { pages: pages.len() });

        let records = self.analyze_pages(&pages, on_event)?;

        let merged = merge_records(&records)?;
        log::info!(
            "Merged {} pages, {} of {} fields found",
            records.len(),
            merged.filled_count(),
            crate::model::Field::COUNT
        );
        on_event(PipelineEvent::Merged { record: &merged });

        Ok(merged)
    }

    fn analyze_pages(
        &self,
        pages: &[PathBuf],
        on_event: &mut dyn FnMut(PipelineEvent<'_>),
    ) -> Result<Vec<Record>> {
        let total = pages.len();

        if self.options.parallel {
            // collect() keeps page order and stops at the first error
            let records = pages
                .par_iter()
                .map(|page| self.analyze_page(page))
                .collect::<Result<Vec<_>>>()?;
            for (index, record) in records.iter().enumerate() {
                on_event(PipelineEvent::PageAnalyzed {
                    page: index + 1,
                    total,
                    record,
                });
            }
            return Ok(records);
        }

        let mut records = Vec::with_capacity(total);
        for (index, page) in pages.iter().enumerate() {
            let record = self.analyze_page(page)?;
            on_event(PipelineEvent::PageAnalyzed {
                page: index + 1,
                total,
                record: &record,
            });
            records.push(record);
        }
        Ok(records)
    }
}
