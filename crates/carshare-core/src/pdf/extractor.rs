//! Invoice text from PDF bytes, via lopdf for structure and pdf-extract for text.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Holds a loaded invoice PDF in a form `pdf_extract` can read.
#[derive(Debug, Default)]
pub struct PdfExtractor {
    /// Plain (decrypted when needed) PDF bytes; empty until `load` succeeds.
    readable: Vec<u8>,
    pages: u32,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `data` and return its text.
    pub fn text_from_bytes(data: &[u8]) -> Result<String> {
        let mut extractor = Self::new();
        extractor.load(data)?;
        extractor.extract_text()
    }
}

/// SHARE NOW invoices may carry an owner password with an empty user
/// password; those open with `""` and are re-serialized unencrypted.
fn readable_bytes(document: &mut Document, original: &[u8]) -> Result<Vec<u8>> {
    if !document.is_encrypted() {
        return Ok(original.to_vec());
    }

    document.decrypt("").map_err(|_| PdfError::Encrypted)?;

    let mut plain = Vec::with_capacity(original.len());
    document
        .save_to(&mut plain)
        .map_err(|e| PdfError::Parse(format!("cannot re-serialize decrypted PDF: {e}")))?;
    debug!("Opened encrypted invoice with the empty password");
    Ok(plain)
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let pages = document.get_pages().len() as u32;
        if pages == 0 {
            return Err(PdfError::NoPages);
        }

        self.readable = readable_bytes(&mut document, data)?;
        self.pages = pages;
        debug!("Invoice PDF has {} page(s)", pages);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.pages
    }

    fn extract_text(&self) -> Result<String> {
        if self.readable.is_empty() {
            return Err(PdfError::Parse("nothing loaded".to_string()));
        }

        pdf_extract::extract_text_from_mem(&self.readable)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
