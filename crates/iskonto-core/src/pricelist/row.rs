//! Table-row parsing: one structured row in, zero or one product out.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::models::product::{DocumentType, ProductRecord};

use super::rules::patterns::CODE_CELL;
use super::rules::{classify, clean_product_name, extract_price};
use super::SeenKeys;

/// Positional context of a row, used for classification and logging.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowContext {
    /// Page number, 1-indexed.
    pub page: usize,
    /// Table ordinal on the page, 0-indexed.
    pub table_index: usize,
}

/// Parse one table row into a validated product.
///
/// Returns `None` for anything that is not a clean product row: no
/// code in the first three cells, unresolvable category, duplicate
/// key, missing name, or fewer than two valid prices. Dropping
/// silently is preferred over inventing a record.
pub(crate) fn parse_row(
    row: &[String],
    ctx: RowContext,
    doc_type: DocumentType,
    seen: &mut SeenKeys,
) -> Option<ProductRecord> {
    if row.len() < 3 {
        return None;
    }

    // Codes appear in column 0-2 depending on the table variant.
    for i in 0..row.len().min(3) {
        let cell = row[i].trim();
        if cell.is_empty() {
            continue;
        }
        let Some(caps) = CODE_CELL.captures(cell) else {
            continue;
        };
        let code = caps[1].to_string();

        let Some(category) = classify(&code, Some(ctx.table_index)) else {
            debug!(
                "no category for {} (page {}, table {})",
                code, ctx.page, ctx.table_index
            );
            continue;
        };

        if seen.contains(&code, category) {
            debug!("duplicate {} in {}, skipping", code, category);
            continue;
        }

        let Some(name) = product_name(row, i, doc_type) else {
            continue;
        };

        let prices: Vec<Decimal> = row
            .iter()
            .skip(i + 2)
            .filter_map(|cell| extract_price(cell))
            .collect();
        if prices.len() < 2 {
            debug!(
                "{}: {} valid price(s), need two - dropping row",
                code,
                prices.len()
            );
            continue;
        }

        // The layout puts the tax-exclusive/inclusive pair closest to
        // the price columns; earlier numeric noise (discount
        // percentages, per-unit weights) is discarded by taking the
        // last two.
        let mut price_without_vat = prices[prices.len() - 2];
        let mut price_with_vat = prices[prices.len() - 1];
        if price_without_vat > price_with_vat {
            std::mem::swap(&mut price_without_vat, &mut price_with_vat);
        }

        check_implied_tax(&code, price_without_vat, price_with_vat);

        let record = ProductRecord {
            code: code.clone(),
            name: clean_product_name(&name),
            price_without_vat,
            price_with_vat,
            category,
        };

        seen.insert(code, category);
        info!(
            "[{}] {}: {} / {}",
            record.category.display_name(),
            record.name,
            record.price_without_vat,
            record.price_with_vat
        );
        return Some(record);
    }

    None
}

/// Product name is the cell right after the code cell. Frozen lists
/// abbreviate the frozen-product word; expand it here so downstream
/// cleaning sees the full form.
fn product_name(row: &[String], code_index: usize, doc_type: DocumentType) -> Option<String> {
    let cell = row.get(code_index + 1)?.trim();
    if cell.is_empty() {
        return None;
    }
    let name = if doc_type == DocumentType::Frozen {
        cell.replace("DON.", "DONDURULMUŞ")
    } else {
        cell.to_string()
    };
    Some(name)
}

/// The source documents carry a single fixed tax band (1%). A pair
/// implying something else is suspicious but still accepted; the
/// heuristic tolerates it rather than rejecting.
pub(crate) fn check_implied_tax(code: &str, without_vat: Decimal, with_vat: Decimal) {
    let implied = (with_vat / without_vat - Decimal::ONE) * Decimal::ONE_HUNDRED;
    if implied < Decimal::new(5, 1) || implied > Decimal::new(15, 1) {
        warn!(
            "unusual implied tax rate {}% for {}: {} / {}",
            implied.round_dp(2),
            code,
            without_vat,
            with_vat
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Category;
    use rust_decimal_macros::dec;

    fn cells(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| s.to_string()).collect()
    }

    fn ctx(table_index: usize) -> RowContext {
        RowContext {
            page: 1,
            table_index,
        }
    }

    #[test]
    fn test_basic_row() {
        let mut seen = SeenKeys::new();
        let row = cells(&["BTN001", "PİLİÇ BÜTÜN", "45,20", "45,65"]);

        let record = parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).unwrap();
        assert_eq!(record.code, "BTN001");
        assert_eq!(record.category, Category::WholeBird);
        assert_eq!(record.price_without_vat, dec!(45.20));
        assert_eq!(record.price_with_vat, dec!(45.65));
    }

    #[test]
    fn test_code_in_second_column() {
        let mut seen = SeenKeys::new();
        let row = cells(&["", "KNT010", "KANAT TB", "52,10", "52,62"]);

        let record = parse_row(&row, ctx(2), DocumentType::Normal, &mut seen).unwrap();
        assert_eq!(record.code, "KNT010");
        assert_eq!(record.category, Category::Wing);
        assert_eq!(record.name, "KANAT TABAK");
    }

    #[test]
    fn test_inverted_pair_is_swapped() {
        let mut seen = SeenKeys::new();
        let row = cells(&["BTN001", "PİLİÇ", "45,65", "45,20"]);

        let record = parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).unwrap();
        assert!(record.price_with_vat >= record.price_without_vat);
        assert_eq!(record.price_without_vat, dec!(45.20));
    }

    #[test]
    fn test_out_of_band_tax_pair_still_accepted() {
        let mut seen = SeenKeys::new();
        // Implied tax 50%, far outside the expected band: warn-only,
        // the record keeps both prices untouched.
        let row = cells(&["BTN001", "PİLİÇ BÜTÜN", "100,00", "150,00"]);

        let record = parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).unwrap();
        assert_eq!(record.price_without_vat, dec!(100.00));
        assert_eq!(record.price_with_vat, dec!(150.00));
    }

    #[test]
    fn test_percent_cell_not_counted_as_price() {
        let mut seen = SeenKeys::new();
        // Only one valid price after filtering the percent cell.
        let row = cells(&["BTN001", "PİLİÇ", "%5", "45,65"]);
        assert!(parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).is_none());
        assert!(seen.is_empty());
    }

    #[test]
    fn test_noise_prices_discarded_by_last_two() {
        let mut seen = SeenKeys::new();
        // A stray in-band token before the real pair: last two win.
        let row = cells(&["BTN001", "PİLİÇ", "10,00", "45,20", "45,65"]);

        let record = parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).unwrap();
        assert_eq!(record.price_without_vat, dec!(45.20));
        assert_eq!(record.price_with_vat, dec!(45.65));
    }

    #[test]
    fn test_duplicate_row_dropped() {
        let mut seen = SeenKeys::new();
        let row = cells(&["BTN001", "PİLİÇ", "45,20", "45,65"]);

        assert!(parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).is_some());
        assert!(parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).is_none());
    }

    #[test]
    fn test_same_code_other_category_kept() {
        let mut seen = SeenKeys::new();
        let row = cells(&["BTN001", "PİLİÇ", "45,20", "45,65"]);

        assert!(parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).is_some());
        // Same code in a wing-position table: different dedup key.
        let record = parse_row(&row, ctx(2), DocumentType::Normal, &mut seen).unwrap();
        assert_eq!(record.category, Category::Wing);
    }

    #[test]
    fn test_frozen_abbreviation_expanded() {
        let mut seen = SeenKeys::new();
        let row = cells(&["DBTN001", "DON. PİLİÇ", "45,20", "45,65"]);

        let record = parse_row(&row, ctx(0), DocumentType::Frozen, &mut seen).unwrap();
        assert_eq!(record.name, "DONDURULMUŞ PİLİÇ");
    }

    #[test]
    fn test_missing_name_cell_dropped() {
        let mut seen = SeenKeys::new();
        let row = cells(&["BTN001", "", "45,20", "45,65"]);
        assert!(parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).is_none());
    }

    #[test]
    fn test_short_row_dropped() {
        let mut seen = SeenKeys::new();
        let row = cells(&["BTN001", "PİLİÇ"]);
        assert!(parse_row(&row, ctx(0), DocumentType::Normal, &mut seen).is_none());
    }
}
