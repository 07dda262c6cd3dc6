//! Single-page extraction with lopdf.
//!
//! Each page is produced by copying the source document, deleting every
//! other page and pruning the objects nothing references anymore.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::Document;

use super::workspace::page_path;
use crate::detect::{pdf_version, pdf_version_from_path};
use crate::error::{Error, Result};

/// Split the PDF at `source` into `page_{n}.pdf` files inside `out_dir`.
///
/// `out_dir` is created when missing but never cleared; call
/// [`reset_workspace`](super::reset_workspace) first for a clean run.
/// Returns the produced paths in page order.
pub fn split_pdf<P: AsRef<Path>, Q: AsRef<Path>>(source: P, out_dir: Q) -> Result<Vec<PathBuf>> {
    let source = source.as_ref();
    let out_dir = out_dir.as_ref();

    pdf_version_from_path(source)?;
    let doc = load_checked(Document::load(source))?;
    let page_count = doc.get_pages().len() as u32;
    log::info!("Splitting {} ({} pages)", source.display(), page_count);

    fs::create_dir_all(out_dir)?;

    let mut paths = Vec::with_capacity(page_count as usize);
    for page in 1..=page_count {
        let mut single = extract_page(&doc, page, page_count);
        let path = page_path(out_dir, page);
        single.save(&path)?;
        log::debug!("Wrote {}", path.display());
        paths.push(path);
    }

    Ok(paths)
}

/// Split an in-memory PDF into one serialized PDF per page, in page order.
pub fn split_bytes(data: &[u8]) -> Result<Vec<Vec<u8>>> {
    pdf_version(data)?;
    let doc = load_checked(Document::load_mem(data))?;
    let page_count = doc.get_pages().len() as u32;

    (1..=page_count)
        .map(|page| {
            let mut single = extract_page(&doc, page, page_count);
            let mut buffer = Vec::new();
            single
                .save_to(&mut buffer)
                .map_err(|e| Error::PdfParse(format!("Save failed: {}", e)))?;
            Ok(buffer)
        })
        .collect()
}

/// Load a document, opening owner-password-only files with the empty user
/// password. Anything that still needs a password is [`Error::Encrypted`].
fn load_checked(loaded: lopdf::Result<Document>) -> Result<Document> {
    let mut doc = loaded?;
    if doc.is_encrypted() {
        doc.decrypt("").map_err(|e| {
            log::debug!("Empty user password rejected: {}", e);
            Error::Encrypted
        })?;
        log::info!("Opened encrypted document with the empty user password");
    }
    Ok(doc)
}

/// Copy of `doc` holding only `keep` (1-based).
fn extract_page(doc: &Document, keep: u32, page_count: u32) -> Document {
    let mut single = doc.clone();

    // Delete in reverse order so remaining page numbers stay valid
    for page in (1..=page_count).rev().filter(|&p| p != keep) {
        single.delete_pages(&[page]);
    }

    single.prune_objects();
    single.compress();
    single
}
