//! Price token extraction and validation.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Accepted price band. Values outside it are noise (page numbers,
/// percentages that slipped past the filters), not prices.
pub fn price_band() -> (Decimal, Decimal) {
    (Decimal::from(5), Decimal::from(2000))
}

/// Extract a validated price from a raw cell string.
///
/// Rejects percent/difference-column cells outright, strips everything
/// but digits and separators, normalizes comma to period and parses as
/// a decimal. Malformed input yields `None`, never an error.
pub fn extract_price(text: &str) -> Option<Decimal> {
    let text = text.trim();

    // Difference columns ("Fark", "%5") are never prices.
    if text.contains('%') || text.to_lowercase().contains("fark") {
        return None;
    }

    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    // The cell grammar never combines comma and period; a cell that
    // does fails the parse below and is dropped as noise.
    let normalized = cleaned.replace(',', ".");
    let value = Decimal::from_str(&normalized).ok()?;

    let (min, max) = price_band();
    (min <= value && value <= max).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_comma_decimal_separator() {
        assert_eq!(extract_price("45,20"), Some(dec!(45.20)));
        assert_eq!(extract_price("45.65"), Some(dec!(45.65)));
        assert_eq!(extract_price(" 120,00 TL "), Some(dec!(120.00)));
    }

    #[test]
    fn test_percent_and_fark_cells_rejected() {
        assert_eq!(extract_price("%5"), None);
        assert_eq!(extract_price("45,20%"), None);
        assert_eq!(extract_price("Fark 1,50"), None);
        assert_eq!(extract_price("FARK"), None);
    }

    #[test]
    fn test_out_of_band_rejected() {
        assert_eq!(extract_price("4,99"), None);
        assert_eq!(extract_price("2000,01"), None);
        assert_eq!(extract_price("3"), None);
        // Band edges are inclusive.
        assert_eq!(extract_price("5"), Some(dec!(5)));
        assert_eq!(extract_price("2000,00"), Some(dec!(2000.00)));
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(extract_price(""), None);
        assert_eq!(extract_price("PİLİÇ"), None);
        assert_eq!(extract_price("1.234,56"), None);
        assert_eq!(extract_price(",."), None);
    }
}
