//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor backed by lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn page_texts(&self) -> Result<Vec<String>> {
        let page_count = self.page_count() as usize;
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let full_text = self.extract_text()?;

        // pdf-extract separates pages with form feeds when it can.
        let chunks: Vec<&str> = full_text.split('\u{c}').collect();
        if chunks.len() == page_count {
            return Ok(chunks.into_iter().map(str::to_string).collect());
        }

        // Fallback: distribute lines evenly over the known page count.
        debug!(
            "form-feed split gave {} chunks for {} pages, splitting evenly",
            chunks.len(),
            page_count
        );
        let lines: Vec<&str> = full_text.lines().collect();
        let lines_per_page = (lines.len() / page_count).max(1);

        let mut pages = Vec::with_capacity(page_count);
        for page in 0..page_count {
            let start = (page * lines_per_page).min(lines.len());
            let end = if page == page_count - 1 {
                lines.len()
            } else {
                ((page + 1) * lines_per_page).min(lines.len())
            };
            pages.push(lines[start..end].join("\n"));
        }
        Ok(pages)
    }
}
