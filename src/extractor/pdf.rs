// file: src/extractor/pdf.rs
// description: lopdf-backed page text extraction with a single-document cache
// reference: https://docs.rs/lopdf

use crate::error::{PipelineError, Result};
use crate::extractor::TextExtractor;
use lopdf::Document;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// Reads page text straight from PDF files.
///
/// Ranking a document touches many page ranges of the same file in a row, so
/// the most recently opened document is kept in memory until another path is
/// requested.
#[derive(Default)]
pub struct PdfTextExtractor {
    last: RefCell<Option<(PathBuf, Rc<Document>)>>,
}

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(&self, path: &Path) -> Result<Rc<Document>> {
        if let Some((cached_path, doc)) = self.last.borrow().as_ref() {
            if cached_path == path {
                return Ok(Rc::clone(doc));
            }
        }

        debug!("Opening PDF: {}", path.display());
        let doc = Document::load(path).map_err(|e| PipelineError::Extraction {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let doc = Rc::new(doc);
        *self.last.borrow_mut() = Some((path.to_path_buf(), Rc::clone(&doc)));
        Ok(doc)
    }
}

impl TextExtractor for PdfTextExtractor {
    fn page_count(&self, path: &Path) -> Result<u32> {
        let doc = self.open(path)?;
        Ok(doc.get_pages().len() as u32)
    }

    fn extract_pages(&self, path: &Path, start: u32, end: u32) -> Result<String> {
        let doc = self.open(path)?;
        let total = doc.get_pages().len() as u32;
        let start = start.max(1);
        let end = end.min(total);

        let mut content = Vec::new();
        for page in start..=end {
            let text = doc
                .extract_text(&[page])
                .map_err(|e| PipelineError::Extraction {
                    path: path.to_path_buf(),
                    message: format!("page {}: {}", page, e),
                })?;
            content.push(text);
        }

        Ok(content.join("\n\n"))
    }
}
