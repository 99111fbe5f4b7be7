//! Price-list extraction pipeline.
//!
//! Drives page iteration and strategy selection: pages with detected
//! tables go through the row parser with positional classification,
//! pages without fall back to line-by-line text parsing with
//! prefix classification. One run produces one [`DocumentResult`].

pub mod doctype;
mod line;
mod row;
pub mod rules;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::IskontoConfig;
use crate::models::product::{Category, CategoryMap, DocumentResult};
use crate::pdf::table::detect_tables;
use crate::pdf::{PdfExtractor, PdfProcessor};

use doctype::detect_document_type;
use line::parse_line;
use row::{parse_row, RowContext};

/// Per-run duplicate suppression over (code, category) keys.
///
/// Scoped to a single document's processing run; the same code in two
/// different source documents is two genuinely separate records.
#[derive(Debug, Default)]
pub(crate) struct SeenKeys(HashSet<(String, Category)>);

impl SeenKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str, category: Category) -> bool {
        self.0.contains(&(code.to_string(), category))
    }

    pub fn insert(&mut self, code: String, category: Category) {
        self.0.insert((code, category));
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Price-list extractor. Cheap to construct; one instance can process
/// any number of documents, each run getting fresh state.
#[derive(Debug, Clone)]
pub struct PriceListExtractor {
    max_pages: usize,
    type_detection_pages: usize,
    min_line_length: usize,
}

impl PriceListExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            max_pages: 0,
            type_detection_pages: 2,
            min_line_length: 20,
        }
    }

    /// Build an extractor from configuration.
    pub fn from_config(config: &IskontoConfig) -> Self {
        Self {
            max_pages: config.pdf.max_pages,
            type_detection_pages: config.pdf.type_detection_pages,
            min_line_length: config.extraction.min_line_length,
        }
    }

    /// Limit the number of processed pages (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Extract a document from raw PDF bytes.
    pub fn extract(&self, data: &[u8], name: &str) -> Result<DocumentResult> {
        let mut pdf = PdfExtractor::new();
        pdf.load(data)?;
        let pages = pdf.page_texts()?;
        Ok(self.extract_pages(&pages, name))
    }

    /// Extract a document from already-split page texts.
    ///
    /// This is the pure core: page texts in, categorized records out.
    /// Zero extracted records is a valid degenerate result, not an
    /// error.
    pub fn extract_pages(&self, pages: &[String], name: &str) -> DocumentResult {
        let type_pages = self.type_detection_pages.min(pages.len());
        let doc_type = detect_document_type(&pages[..type_pages]);
        info!("processing {} ({} pages, type {:?})", name, pages.len(), doc_type);

        let mut categories = CategoryMap::new();
        let mut seen = SeenKeys::new();

        let page_limit = if self.max_pages == 0 {
            pages.len()
        } else {
            self.max_pages.min(pages.len())
        };

        for (page_idx, text) in pages.iter().take(page_limit).enumerate() {
            let page = page_idx + 1;
            let tables = detect_tables(text);
            if !tables.is_empty() {
                debug!("page {}: {} table(s)", page, tables.len());
                for (table_index, table) in tables.iter().enumerate() {
                    let ctx = RowContext { page, table_index };
                    for table_row in &table.rows {
                        if let Some(record) = parse_row(table_row, ctx, doc_type, &mut seen) {
                            categories.push(record);
                        }
                    }
                }
            } else {
                debug!("page {}: no tables, text fallback", page);
                for text_line in text.lines() {
                    parse_line(
                        text_line,
                        page,
                        doc_type,
                        self.min_line_length,
                        &mut seen,
                        &mut categories,
                    );
                }
            }
        }

        if categories.is_empty() {
            warn!("no products extracted from {}", name);
        } else {
            info!(
                "{}: {} products extracted",
                name,
                categories.total_count()
            );
        }

        DocumentResult {
            name: name.to_string(),
            doc_type,
            categories,
        }
    }
}

impl Default for PriceListExtractor {
    fn default() -> Self {
        Self::new()
    }
}
