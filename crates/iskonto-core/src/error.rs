//! Error types for the iskonto-core library.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::product::Category;

/// Main error type for the iskonto library.
#[derive(Error, Debug)]
pub enum IskontoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Discount pass error.
    #[error("discount error: {0}")]
    Discount(#[from] DiscountError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A batch was given more documents than the configured maximum.
    #[error("too many documents in batch: {count} (maximum {max})")]
    TooManyDocuments { count: usize, max: usize },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to the discount pass.
///
/// A single out-of-range rate refuses the whole pass; partial
/// application is never attempted.
#[derive(Error, Debug)]
pub enum DiscountError {
    /// Discount percentage outside [0, 100].
    #[error("discount rate for {category} out of range: {rate} (expected 0-100)")]
    RateOutOfRange { category: Category, rate: Decimal },
}

/// Result type for the iskonto library.
pub type Result<T> = std::result::Result<T, IskontoError>;
