//! Data models for price-list processing.

pub mod config;
pub mod product;

pub use config::IskontoConfig;
pub use product::{Category, CategoryMap, DocumentResult, DocumentType, ProductRecord};
