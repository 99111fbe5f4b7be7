//! Per-category discount pass with fixed-rate tax recomputation.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DiscountError;
use crate::models::product::{Category, CategoryMap};

/// Fixed tax multiplier (1% VAT). The discount pass always recomputes
/// the tax-inclusive price from this rate, deliberately discarding
/// whatever tax ratio the source document implied.
fn vat_multiplier() -> Decimal {
    Decimal::new(101, 2)
}

/// A discounted product, retaining the original pair for reporting.
/// Derived data: recomputed whenever the rates change, never persisted
/// back into the extracted records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountedRecord {
    pub name: String,
    pub price_without_vat: Decimal,
    pub price_with_vat: Decimal,
    pub original_price_without_vat: Decimal,
    pub original_price_with_vat: Decimal,
}

/// Per-category discount percentages. Categories without an entry get
/// a zero rate, which still passes through the tax recomputation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountRates(BTreeMap<Category, Decimal>);

impl DiscountRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rate for one category.
    pub fn set(&mut self, category: Category, rate: Decimal) {
        self.0.insert(category, rate);
    }

    /// Rate for a category, defaulting to zero.
    pub fn get(&self, category: Category) -> Decimal {
        self.0.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Validate that every rate lies in [0, 100]. The first offender
    /// refuses the whole set.
    pub fn validate(&self) -> Result<(), DiscountError> {
        for (category, rate) in &self.0 {
            if *rate < Decimal::ZERO || *rate > Decimal::ONE_HUNDRED {
                return Err(DiscountError::RateOutOfRange {
                    category: *category,
                    rate: *rate,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(Category, Decimal)> for DiscountRates {
    fn from_iter<I: IntoIterator<Item = (Category, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Apply per-category discounts to categorized products.
///
/// The discount applies to the tax-exclusive price; the tax-inclusive
/// price is then recomputed at the fixed 1% rate. Both are rounded to
/// two decimal places. Out-of-range rates refuse the entire pass so
/// valid and invalid category results are never mixed.
pub fn apply_discounts(
    categories: &CategoryMap,
    rates: &DiscountRates,
) -> Result<BTreeMap<Category, Vec<DiscountedRecord>>, DiscountError> {
    rates.validate()?;

    let mut discounted = BTreeMap::new();

    for (category, products) in categories.iter() {
        if products.is_empty() {
            continue;
        }

        let rate = rates.get(category);
        let multiplier = Decimal::ONE - rate / Decimal::ONE_HUNDRED;
        debug!(
            "discounting {} ({} products) at {}%",
            category,
            products.len(),
            rate
        );

        let records: Vec<DiscountedRecord> = products
            .iter()
            .map(|product| {
                let price_without_vat = round_money(product.price_without_vat * multiplier);
                let price_with_vat = round_money(price_without_vat * vat_multiplier());
                DiscountedRecord {
                    name: product.name.clone(),
                    price_without_vat,
                    price_with_vat,
                    original_price_without_vat: product.price_without_vat,
                    original_price_with_vat: product.price_with_vat,
                }
            })
            .collect();

        discounted.insert(category, records);
    }

    Ok(discounted)
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
