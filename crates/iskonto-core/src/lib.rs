//! Core library for poultry price-list processing.
//!
//! This crate provides:
//! - PDF text extraction and text-layout table reconstruction
//! - Product code classification (table position + code prefix)
//! - Price extraction and validation with per-run deduplication
//! - Per-category discount calculation with fixed 1% VAT recomputation
//! - Bounded multi-document batch processing

pub mod batch;
pub mod discount;
pub mod error;
pub mod models;
pub mod pdf;
pub mod pricelist;

pub use batch::{BatchFailure, BatchOutcome, BatchProcessor};
pub use discount::{apply_discounts, DiscountRates, DiscountedRecord};
pub use error::{IskontoError, Result};
pub use models::config::IskontoConfig;
pub use models::product::{Category, CategoryMap, DocumentResult, DocumentType, ProductRecord};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pricelist::PriceListExtractor;
