//! The per-run directory of single-page PDFs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Delete the directory at `dir` (if any) and recreate it empty.
///
/// This is destructive: every file under `dir` is removed.
pub fn reset_workspace<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    if dir.exists() {
        log::debug!("Removing existing workspace {}", dir.display());
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// File name of a page artifact, e.g. `page_3.pdf` for page 3 (1-based).
pub fn page_file_name(page: u32) -> String {
    format!("page_{}.pdf", page)
}

/// Full path of a page artifact inside `dir`.
pub fn page_path<P: AsRef<Path>>(dir: P, page: u32) -> PathBuf {
    dir.as_ref().join(page_file_name(page))
}
