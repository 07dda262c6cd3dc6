//! JSON rendering for extracted records.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::model::Record;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with four-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a record to JSON.
pub fn to_json(record: &Record, format: JsonFormat) -> Result<String> {
    let bytes = match format {
        JsonFormat::Pretty => to_vec_indented(record),
        JsonFormat::Compact => serde_json::to_vec(record),
    }
    .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| Error::Render(e.to_string()))
}

fn to_vec_indented(record: &Record) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    record.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Write a record as JSON to `path`, replacing any existing file.
pub fn write_json<P: AsRef<Path>>(path: P, record: &Record, format: JsonFormat) -> Result<()> {
    let json = to_json(record, format)?;
    fs::write(path, json)?;
    Ok(())
}
