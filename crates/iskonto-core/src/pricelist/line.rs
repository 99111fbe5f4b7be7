//! Text-line parsing: fallback strategy for pages without tables.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::product::{CategoryMap, DocumentType, ProductRecord};

use super::row::check_implied_tax;
use super::rules::patterns::{CODE_INLINE, PERCENT_FRAGMENT, PRICE_TOKEN};
use super::rules::{classify_by_prefix, clean_product_name, extract_price};
use super::SeenKeys;

/// Text-path price band. Tighter lower bound than the cell extractor:
/// free text has more small-number noise.
fn line_price_min() -> Decimal {
    Decimal::from(10)
}

/// Parse one unstructured text line, appending any products found.
///
/// A wrapped layout can put more than one code on a line; each match
/// is handled independently. Classification is prefix-only here -
/// there is no table position to lean on.
pub(crate) fn parse_line(
    line: &str,
    page: usize,
    doc_type: DocumentType,
    min_line_length: usize,
    seen: &mut SeenKeys,
    out: &mut CategoryMap,
) {
    let line = line.trim();
    // Too short to contain code + name + two prices.
    if line.chars().count() < min_line_length {
        return;
    }

    for m in CODE_INLINE.find_iter(line) {
        let code = m.as_str().to_string();

        let Some(category) = classify_by_prefix(&code) else {
            debug!("no category for {} (page {}, text path)", code, page);
            continue;
        };
        if seen.contains(&code, category) {
            debug!("duplicate {} in {}, skipping", code, category);
            continue;
        }

        let remaining = line[m.end()..].trim();

        let tokens: Vec<&str> = PRICE_TOKEN.find_iter(remaining).map(|t| t.as_str()).collect();
        let prices: Vec<Decimal> = tokens[tokens.len().saturating_sub(2)..]
            .iter()
            .filter_map(|t| extract_price(t))
            .filter(|p| *p >= line_price_min())
            .collect();
        if prices.len() < 2 {
            debug!(
                "{}: {} valid price(s) in text, need two - dropping",
                code,
                prices.len()
            );
            continue;
        }

        let mut price_without_vat = prices[0];
        let mut price_with_vat = prices[1];
        if price_without_vat > price_with_vat {
            std::mem::swap(&mut price_without_vat, &mut price_with_vat);
        }
        check_implied_tax(&code, price_without_vat, price_with_vat);

        // Name = remainder minus percentage-plus-number fragments and
        // every located price substring. Fragments go first so their
        // trailing number does not survive the price removal.
        let mut name = PERCENT_FRAGMENT.replace_all(remaining, "").into_owned();
        for token in &tokens {
            name = name.replace(token, "");
        }
        if doc_type == DocumentType::Frozen {
            name = name.replace("DON.", "DONDURULMUŞ");
        }
        let name = clean_product_name(&name);

        if name.chars().count() <= 3 {
            debug!("{}: name '{}' too short after cleaning, dropping", code, name);
            continue;
        }

        let record = ProductRecord {
            code: code.clone(),
            name,
            price_without_vat,
            price_with_vat,
            category,
        };
        seen.insert(code, category);
        info!(
            "[{}] [{}] {}: {} / {}",
            record.category.display_name(),
            record.code,
            record.name,
            record.price_without_vat,
            record.price_with_vat
        );
        out.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Category;
    use rust_decimal_macros::dec;

    const MIN_LINE: usize = 20;

    fn parse(line: &str) -> CategoryMap {
        let mut seen = SeenKeys::new();
        let mut out = CategoryMap::new();
        parse_line(line, 1, DocumentType::Normal, MIN_LINE, &mut seen, &mut out);
        out
    }

    #[test]
    fn test_single_product_line() {
        let out = parse("BTN001 PİLİÇ BÜTÜN DÖKME 45,20 45,65");
        let records = out.get(Category::WholeBird);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "PİLİÇ BÜTÜN DÖKME");
        assert_eq!(records[0].price_without_vat, dec!(45.20));
        assert_eq!(records[0].price_with_vat, dec!(45.65));
    }

    #[test]
    fn test_short_line_skipped() {
        let out = parse("BTN001 45,20 45,65");
        assert!(out.is_empty());
    }

    #[test]
    fn test_percent_fragment_removed_from_name() {
        let out = parse("KNT005 PİLİÇ KANAT TABAK %5 12,50 52,10 52,62");
        let records = out.get(Category::Wing);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "PİLİÇ KANAT TABAK");
        assert_eq!(records[0].price_without_vat, dec!(52.10));
    }

    #[test]
    fn test_unknown_prefix_dropped() {
        let out = parse("XYZ001 BİLİNMEYEN ÜRÜN UZUN AD 45,20 45,65");
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_price_dropped() {
        let out = parse("BTN001 PİLİÇ BÜTÜN UZUN ADLI ÜRÜN 45,65");
        assert!(out.is_empty());
    }

    #[test]
    fn test_inverted_pair_swapped() {
        let out = parse("GGS003 PİLİÇ GÖĞÜS FİLETO 91,30 90,40");
        let records = out.get(Category::Breast);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price_without_vat, dec!(90.40));
        assert_eq!(records[0].price_with_vat, dec!(91.30));
    }

    #[test]
    fn test_short_name_rejected_without_consuming_dedup_key() {
        let mut seen = SeenKeys::new();
        let mut out = CategoryMap::new();
        // Remainder cleans down to "X": noise, no record.
        let noise = "BTN001 X %  45,20 45,65";
        parse_line(noise, 1, DocumentType::Normal, MIN_LINE, &mut seen, &mut out);
        assert!(out.is_empty());
        assert!(seen.is_empty());

        // The key stays free for a later well-formed occurrence.
        let line = "BTN001 PİLİÇ BÜTÜN DÖKME 45,20 45,65";
        parse_line(line, 2, DocumentType::Normal, MIN_LINE, &mut seen, &mut out);
        assert_eq!(out.total_count(), 1);
    }

    #[test]
    fn test_dedup_across_lines() {
        let mut seen = SeenKeys::new();
        let mut out = CategoryMap::new();
        let line = "BTN001 PİLİÇ BÜTÜN DÖKME 45,20 45,65";
        parse_line(line, 1, DocumentType::Normal, MIN_LINE, &mut seen, &mut out);
        parse_line(line, 2, DocumentType::Normal, MIN_LINE, &mut seen, &mut out);
        assert_eq!(out.total_count(), 1);
    }
}
