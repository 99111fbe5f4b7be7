//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the iskonto pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IskontoConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Pages scanned for document-type markers. Type is established
    /// early in these documents, so two pages is enough.
    pub type_detection_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            type_detection_pages: 2,
        }
    }
}

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum documents per batch run.
    pub max_documents: usize,

    /// Minimum line length for the text fallback path. Shorter lines
    /// cannot hold a code, a name, and two prices.
    pub min_line_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_documents: 3,
            min_line_length: 20,
        }
    }
}

impl IskontoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IskontoConfig::default();
        assert_eq!(config.pdf.max_pages, 0);
        assert_eq!(config.pdf.type_detection_pages, 2);
        assert_eq!(config.extraction.max_documents, 3);
        assert_eq!(config.extraction.min_line_length, 20);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: IskontoConfig =
            serde_json::from_str(r#"{"extraction": {"max_documents": 5}}"#).unwrap();
        assert_eq!(config.extraction.max_documents, 5);
        assert_eq!(config.extraction.min_line_length, 20);
        assert_eq!(config.pdf.type_detection_pages, 2);
    }
}
