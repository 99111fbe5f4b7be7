//! Product data models for categorized price-list output.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product category. Every accepted record resolves to exactly one of
/// these six values; a row that cannot be classified is dropped, never
/// emitted with an unknown category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Whole chicken (Bütün Piliç Ürünleri).
    WholeBird,
    /// Wings (Kanat Ürünleri).
    Wing,
    /// Legs (But Ürünleri).
    Leg,
    /// Breast (Göğüs Ürünleri).
    Breast,
    /// Offal (Sakatat Ürünleri).
    Offal,
    /// Side products and other cuts (Yan Ürünler).
    OtherCuts,
}

impl Category {
    /// All categories in document order.
    pub const ALL: [Category; 6] = [
        Category::WholeBird,
        Category::Wing,
        Category::Leg,
        Category::Breast,
        Category::Offal,
        Category::OtherCuts,
    ];

    /// Identifier used in serialized output and CLI arguments.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::WholeBird => "whole-bird",
            Category::Wing => "wing",
            Category::Leg => "leg",
            Category::Breast => "breast",
            Category::Offal => "offal",
            Category::OtherCuts => "other-cuts",
        }
    }

    /// Category heading as printed in the source documents.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::WholeBird => "Bütün Piliç Ürünleri",
            Category::Wing => "Kanat Ürünleri",
            Category::Leg => "But Ürünleri",
            Category::Breast => "Göğüs Ürünleri",
            Category::Offal => "Sakatat Ürünleri",
            Category::OtherCuts => "Yan Ürünler",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.slug() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "unknown category '{}' (expected one of: whole-bird, wing, leg, breast, offal, other-cuts)",
                    s
                )
            })
    }
}

/// Document type, established once per document by keyword scan.
/// Only affects product-name normalization, never classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Regular price list.
    Normal,
    /// Frozen-product price list (dondurulmuş).
    Frozen,
    /// Weighted or sauced product list (gramaj/soslu).
    Weighted,
}

impl Default for DocumentType {
    fn default() -> Self {
        Self::Normal
    }
}

/// A single extracted and validated product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product code as matched by the code grammar.
    pub code: String,

    /// Cleaned product name.
    pub name: String,

    /// Tax-exclusive price, within [5, 2000].
    pub price_without_vat: Decimal,

    /// Tax-inclusive price, >= `price_without_vat` after ordering
    /// correction, within [5, 2000].
    pub price_with_vat: Decimal,

    /// Resolved category.
    pub category: Category,
}

/// Category buckets for one extraction run. Constructed fresh per run;
/// all six buckets are always present, even when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap(BTreeMap<Category, Vec<ProductRecord>>);

impl CategoryMap {
    /// Create a map with all six categories empty.
    pub fn new() -> Self {
        Self(Category::ALL.iter().map(|c| (*c, Vec::new())).collect())
    }

    /// Append a record to its category bucket, preserving document order.
    pub fn push(&mut self, record: ProductRecord) {
        self.0.entry(record.category).or_default().push(record);
    }

    /// Records in one category, in document order.
    pub fn get(&self, category: Category) -> &[ProductRecord] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate buckets in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ProductRecord])> {
        self.0.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// Total number of records across all categories.
    pub fn total_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// True when no category holds any record.
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Append all of `other`'s records after this map's, per category.
    pub fn extend_from(&mut self, other: &CategoryMap) {
        for (category, records) in other.iter() {
            self.0
                .entry(category)
                .or_default()
                .extend(records.iter().cloned());
        }
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting a single document. Never mutated after
/// extraction completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Document name (file name of the source).
    pub name: String,

    /// Detected document type.
    pub doc_type: DocumentType,

    /// Categorized records, insertion order = document order.
    pub categories: CategoryMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(code: &str, category: Category) -> ProductRecord {
        ProductRecord {
            code: code.to_string(),
            name: "PİLİÇ".to_string(),
            price_without_vat: dec!(45.20),
            price_with_vat: dec!(45.65),
            category,
        }
    }

    #[test]
    fn test_new_map_has_all_six_buckets() {
        let map = CategoryMap::new();
        assert_eq!(map.iter().count(), 6);
        assert!(map.is_empty());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut map = CategoryMap::new();
        map.push(record("BTN001", Category::WholeBird));
        map.push(record("BTN002", Category::WholeBird));

        let codes: Vec<&str> = map
            .get(Category::WholeBird)
            .iter()
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(codes, ["BTN001", "BTN002"]);
    }

    #[test]
    fn test_extend_from_concatenates_in_order() {
        let mut a = CategoryMap::new();
        a.push(record("KNT001", Category::Wing));
        let mut b = CategoryMap::new();
        b.push(record("KNT002", Category::Wing));

        a.extend_from(&b);
        let codes: Vec<&str> = a
            .get(Category::Wing)
            .iter()
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(codes, ["KNT001", "KNT002"]);
    }

    #[test]
    fn test_category_slug_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>(), Ok(category));
        }
        assert!("drumstick".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_map_serializes_with_kebab_keys() {
        let mut map = CategoryMap::new();
        map.push(record("BTN001", Category::WholeBird));

        let json = serde_json::to_value(&map).unwrap();
        assert!(json.get("whole-bird").is_some());
        assert!(json.get("other-cuts").is_some());
    }
}
