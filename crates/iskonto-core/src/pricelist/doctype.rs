//! Document type detection by marker scan.

use crate::models::product::DocumentType;

/// Detect the document type from the first pages' text.
///
/// The caller passes only the pages worth scanning (type is
/// established early in these documents). Markers are checked in
/// priority order: frozen beats weighted. Unreadable input simply
/// yields `Normal` - type only drives name normalization, so a wrong
/// default degrades gracefully.
pub fn detect_document_type(pages: &[String]) -> DocumentType {
    let text: String = pages
        .iter()
        .map(|p| p.to_lowercase())
        .collect::<Vec<_>>()
        .join("\n");

    if text.contains("dondurulmuş") || text.contains("don.") {
        DocumentType::Frozen
    } else if text.contains("gramaj") || text.contains("soslu") {
        DocumentType::Weighted
    } else {
        DocumentType::Normal
    }
}
