//! Input sniffing: make sure a source document is a PDF before loading it.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// Header length including a version such as "1.7".
const HEADER_LEN: usize = PDF_MAGIC.len() + 3;

/// Read the header of a file and return its PDF version (e.g. "1.7").
pub fn pdf_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    File::open(path)?
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    pdf_version(&header)
}

/// Return the PDF version declared in the leading bytes of `data`.
///
/// Fails with [`Error::UnknownFormat`] when the magic is missing and with
/// [`Error::UnsupportedVersion`] when the version is not `d.d`.
pub fn pdf_version(data: &[u8]) -> Result<String> {
    if data.len() < HEADER_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = String::from_utf8_lossy(&data[PDF_MAGIC.len()..HEADER_LEN]).to_string();
    let well_formed = matches!(
        version.as_bytes(),
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit()
    );
    if well_formed {
        Ok(version)
    } else {
        Err(Error::UnsupportedVersion(version))
    }
}
