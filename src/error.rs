//! Error types for eobscan library.

use std::io;
use thiserror::Error;

/// Result type alias for eobscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while splitting, analyzing or extracting.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing or writing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// The document-analysis service call failed.
    #[error("Analysis service error: {0}")]
    Analysis(String),

    /// A saved analysis response could not be decoded.
    #[error("Malformed analysis response: {0}")]
    ResponseFormat(String),

    /// A field pattern failed to compile.
    #[error("Invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Error serializing a record.
    #[error("Rendering error: {0}")]
    Render(String),

    /// There were no page records to merge.
    #[error("No page records to merge")]
    NoPages,
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoPages;
        assert_eq!(err.to_string(), "No page records to merge");

        let err = Error::Analysis("throttled".to_string());
        assert_eq!(err.to_string(), "Analysis service error: throttled");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_regex_error_conversion() {
        let err: Error = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, Error::Pattern(_)));
    }
}
