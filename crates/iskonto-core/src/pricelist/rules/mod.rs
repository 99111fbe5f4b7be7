//! Rule-based extraction building blocks: regex patterns, category
//! resolution, price validation, and name cleaning.

pub mod category;
pub mod names;
pub mod patterns;
pub mod prices;

pub use category::{classify, classify_by_prefix};
pub use names::clean_product_name;
pub use prices::extract_price;
