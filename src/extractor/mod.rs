// file: src/extractor/mod.rs
// description: page text extraction collaborator and its degrading helpers
// reference: internal module structure

pub mod patterns;
pub mod pdf;

pub use pdf::PdfTextExtractor;

use crate::error::Result;
use std::path::Path;
use tracing::error;

/// Source of page text for a document. Pages are 1-based and ranges inclusive.
pub trait TextExtractor {
    fn page_count(&self, path: &Path) -> Result<u32>;

    /// Text of pages `start..=end` joined by a blank line. Pages past the end
    /// of the document are skipped.
    fn extract_pages(&self, path: &Path, start: u32, end: u32) -> Result<String>;
}

/// Page count, or 0 when the document cannot be read.
pub fn total_pages(extractor: &dyn TextExtractor, path: &Path) -> u32 {
    match extractor.page_count(path) {
        Ok(count) => count,
        Err(e) => {
            error!("Error getting page count for {}: {}", path.display(), e);
            0
        }
    }
}

/// Page range text, or an empty string when extraction fails.
pub fn section_content(extractor: &dyn TextExtractor, path: &Path, start: u32, end: u32) -> String {
    match extractor.extract_pages(path, start, end) {
        Ok(text) => text,
        Err(e) => {
            error!(
                "Error extracting pages {}-{} from {}: {}",
                start,
                end,
                path.display(),
                e
            );
            String::new()
        }
    }
}
