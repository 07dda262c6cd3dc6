//! Replay of saved analysis responses.

use std::fs;
use std::path::{Path, PathBuf};

use super::DocumentAnalyzer;
use crate::error::{Error, Result};
use crate::model::AnalysisResponse;

/// Analyzer that reads responses saved as JSON next to each other.
///
/// The response for `pdf_pages/page_3.pdf` is read from
/// `<responses_dir>/page_3.json`.
#[derive(Debug, Clone)]
pub struct ResponseFileAnalyzer {
    responses_dir: PathBuf,
}

impl ResponseFileAnalyzer {
    /// Create an analyzer reading from `responses_dir`.
    pub fn new(responses_dir: impl Into<PathBuf>) -> Self {
        Self {
            responses_dir: responses_dir.into(),
        }
    }

    /// Path of the saved response for a page file.
    pub fn response_path(&self, page: &Path) -> PathBuf {
        let stem = page.file_stem().unwrap_or_default();
        self.responses_dir.join(stem).with_extension("json")
    }
}

impl DocumentAnalyzer for ResponseFileAnalyzer {
    fn name(&self) -> &str {
        "replay"
    }

    fn analyze_bytes(&self, _bytes: &[u8]) -> Result<AnalysisResponse> {
        Err(Error::Analysis(
            "saved responses are looked up by page file name".to_string(),
        ))
    }

    fn analyze(&self, page: &Path) -> Result<AnalysisResponse> {
        let path = self.response_path(page);
        log::debug!("Replaying {} for {}", path.display(), page.display());
        let json = fs::read_to_string(&path)?;
        AnalysisResponse::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_path() {
        let analyzer = ResponseFileAnalyzer::new("responses");
        assert_eq!(
            analyzer.response_path(Path::new("pdf_pages/page_3.pdf")),
            Path::new("responses").join("page_3.json")
        );
    }

    #[test]
    fn test_replays_saved_response() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("page_1.json"),
            r#"{"Blocks": [{"BlockType": "LINE", "Id": "a", "Text": "Payment number: 42"}]}"#,
        )
        .unwrap();

        let analyzer = ResponseFileAnalyzer::new(dir.path());
        let response = analyzer.analyze(Path::new("page_1.pdf")).unwrap();
        assert_eq!(response.line_text(), "Payment number: 42");
    }

    #[test]
    fn test_missing_response_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = ResponseFileAnalyzer::new(dir.path());
        let result = analyzer.analyze(Path::new("page_7.pdf"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_bytes_are_rejected() {
        let analyzer = ResponseFileAnalyzer::new("responses");
        assert!(matches!(
            analyzer.analyze_bytes(b"%PDF-1.7"),
            Err(Error::Analysis(_))
        ));
    }
}
