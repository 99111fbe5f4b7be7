//! PDF processing module.

mod extractor;
pub mod table;

pub use extractor::PdfExtractor;
pub use table::{detect_tables, Table};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations. Seams the PDF source off
/// the extraction core, which works on page texts only.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text split per page, in page order.
    fn page_texts(&self) -> Result<Vec<String>>;
}
