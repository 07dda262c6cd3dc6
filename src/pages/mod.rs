//! Page splitting: turn one multi-page PDF into single-page PDF files.

mod splitter;
mod workspace;

pub use splitter::{split_bytes, split_pdf};
pub use workspace::{page_file_name, page_path, reset_workspace};
