//! Multi-document batch processing.
//!
//! Runs the extraction pipeline once per input document, sequentially,
//! keeping each result addressable by document name plus a merged
//! view. A failed document is excluded from both views but never
//! aborts the rest of the batch.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{IskontoError, Result};
use crate::models::config::IskontoConfig;
use crate::models::product::{CategoryMap, DocumentResult};
use crate::pricelist::PriceListExtractor;

/// A document that could not be processed. Kept for reporting; the
/// result views simply omit it.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    documents: Vec<DocumentResult>,
    failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Successfully processed documents, in input order.
    pub fn documents(&self) -> &[DocumentResult] {
        &self.documents
    }

    /// Look up one document's result by name.
    pub fn document(&self, name: &str) -> Option<&DocumentResult> {
        self.documents.iter().find(|d| d.name == name)
    }

    /// Documents excluded from the views.
    pub fn failures(&self) -> &[BatchFailure] {
        &self.failures
    }

    /// Merged view: per category, all documents' records concatenated
    /// in document order. No cross-document dedup - the same code in
    /// two source documents is two genuinely separate price entries.
    pub fn merged(&self) -> CategoryMap {
        let mut merged = CategoryMap::new();
        for document in &self.documents {
            merged.extend_from(&document.categories);
        }
        merged
    }
}

/// Batch processor over a bounded number of documents.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    extractor: PriceListExtractor,
    max_documents: usize,
}

impl BatchProcessor {
    /// Create a processor with default settings.
    pub fn new() -> Self {
        Self {
            extractor: PriceListExtractor::new(),
            max_documents: 3,
        }
    }

    /// Build a processor from configuration.
    pub fn from_config(config: &IskontoConfig) -> Self {
        Self {
            extractor: PriceListExtractor::from_config(config),
            max_documents: config.extraction.max_documents,
        }
    }

    /// Override the document limit.
    pub fn with_max_documents(mut self, max_documents: usize) -> Self {
        self.max_documents = max_documents;
        self
    }

    /// Process the given documents sequentially.
    ///
    /// Exceeding the document limit is the only batch-fatal error;
    /// unreadable or unparsable documents degrade the batch by
    /// omission and the rest continues.
    pub fn process_paths(&self, paths: &[PathBuf]) -> Result<BatchOutcome> {
        self.process_paths_with(paths, |_| {})
    }

    /// Like `process_paths`, invoking `progress` after every document,
    /// processed or excluded. Lets callers drive a progress display
    /// without owning the batch loop.
    pub fn process_paths_with(
        &self,
        paths: &[PathBuf],
        mut progress: impl FnMut(&Path),
    ) -> Result<BatchOutcome> {
        if paths.len() > self.max_documents {
            return Err(IskontoError::TooManyDocuments {
                count: paths.len(),
                max: self.max_documents,
            });
        }

        let mut documents = Vec::new();
        let mut failures = Vec::new();

        for path in paths {
            match self.process_one(path) {
                Ok(result) => documents.push(result),
                Err(e) => {
                    warn!("excluding {}: {}", path.display(), e);
                    failures.push(BatchFailure {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            progress(path);
        }

        info!(
            "batch complete: {} processed, {} excluded",
            documents.len(),
            failures.len()
        );

        Ok(BatchOutcome {
            documents,
            failures,
        })
    }

    fn process_one(&self, path: &Path) -> Result<DocumentResult> {
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        self.extractor.extract(&data, name)
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{Category, DocumentType, ProductRecord};
    use rust_decimal_macros::dec;

    fn document(name: &str, code: &str) -> DocumentResult {
        let mut categories = CategoryMap::new();
        categories.push(ProductRecord {
            code: code.to_string(),
            name: "PİLİÇ".to_string(),
            price_without_vat: dec!(45.20),
            price_with_vat: dec!(45.65),
            category: Category::WholeBird,
        });
        DocumentResult {
            name: name.to_string(),
            doc_type: DocumentType::Normal,
            categories,
        }
    }

    #[test]
    fn test_merged_concatenates_in_document_order() {
        let outcome = BatchOutcome {
            documents: vec![document("a.pdf", "BTN001"), document("b.pdf", "BTN001")],
            failures: Vec::new(),
        };

        let merged = outcome.merged();
        let codes: Vec<&str> = merged
            .get(Category::WholeBird)
            .iter()
            .map(|r| r.code.as_str())
            .collect();
        // Same code from two documents: both retained.
        assert_eq!(codes, ["BTN001", "BTN001"]);
    }

    #[test]
    fn test_document_lookup_by_name() {
        let outcome = BatchOutcome {
            documents: vec![document("a.pdf", "BTN001")],
            failures: Vec::new(),
        };
        assert!(outcome.document("a.pdf").is_some());
        assert!(outcome.document("missing.pdf").is_none());
    }

    #[test]
    fn test_too_many_documents_is_batch_fatal() {
        let processor = BatchProcessor::new().with_max_documents(1);
        let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
        assert!(matches!(
            processor.process_paths(&paths),
            Err(IskontoError::TooManyDocuments { count: 2, max: 1 })
        ));
    }

    #[test]
    fn test_progress_callback_fires_per_document() {
        let processor = BatchProcessor::new();
        let paths = vec![
            PathBuf::from("/nonexistent/a.pdf"),
            PathBuf::from("/nonexistent/b.pdf"),
        ];

        let mut ticks = 0;
        let outcome = processor
            .process_paths_with(&paths, |_| ticks += 1)
            .unwrap();
        // Excluded documents still advance the caller's progress.
        assert_eq!(ticks, 2);
        assert_eq!(outcome.failures().len(), 2);
    }

    #[test]
    fn test_missing_file_degrades_not_fails() {
        let processor = BatchProcessor::new();
        let paths = vec![PathBuf::from("/nonexistent/missing.pdf")];

        let outcome = processor.process_paths(&paths).unwrap();
        assert!(outcome.documents().is_empty());
        assert_eq!(outcome.failures().len(), 1);
    }
}
