//! Common regex patterns for price-list extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Product code grammar: optional frozen marker, 2-4 uppercase
    // letters, 3 digits, optional .NN / .N sub-suffixes, optional -N
    // variant. Anchored form for whole-cell matching.
    pub static ref CODE_CELL: Regex = Regex::new(
        r"^(D?[A-Z]{2,4}\d{3}(?:\.\d{2})?(?:\.\d{1,2})?(?:-\d)?)$"
    ).unwrap();

    // Unanchored form for the text fallback; wrapped layouts can put
    // more than one code on a line.
    pub static ref CODE_INLINE: Regex = Regex::new(
        r"\b(D?[A-Z]{2,4}\d{3}(?:\.\d{2})?(?:\.\d{1,2})?(?:-\d)?)\b"
    ).unwrap();

    // Price token in free text: 2-3 integer digits, decimal separator,
    // 2 fraction digits.
    pub static ref PRICE_TOKEN: Regex = Regex::new(
        r"\d{2,3}[,.]\d{2}"
    ).unwrap();

    // Residual discount-percentage fragment left in a name after price
    // removal, e.g. "%5 12,50".
    pub static ref PERCENT_FRAGMENT: Regex = Regex::new(
        r"%.*?\d+[,.]\d{2}"
    ).unwrap();

    // Name cleaning: stray marks and column-label leakage.
    pub static ref STRAY_MARKS: Regex = Regex::new(r"[%*]+").unwrap();
    pub static ref TRAILING_FARK: Regex = Regex::new(r"(?i)fark.*").unwrap();
    pub static ref TRAILING_KDV: Regex = Regex::new(r"(?i)kdv.*").unwrap();
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Abbreviation expansion, standalone tokens only.
    pub static ref ABBR_FROZEN: Regex = Regex::new(r"DON\.").unwrap();
    pub static ref ABBR_TRAY: Regex = Regex::new(r"\bTB\b").unwrap();
    pub static ref ABBR_GRAM: Regex = Regex::new(r"\bGR\b").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_cell_matches() {
        for code in ["BTN001", "DKNT123", "GGS045.10", "YAN100.5", "BUT200-1", "SAK300.15.2"] {
            assert!(CODE_CELL.is_match(code), "should match: {}", code);
        }
    }

    #[test]
    fn test_code_cell_rejects() {
        for text in ["BTN01", "btn001", "B001", "BTN001 PİLİÇ", "12345", "BTNX"] {
            assert!(!CODE_CELL.is_match(text), "should not match: {}", text);
        }
    }

    #[test]
    fn test_code_inline_finds_multiple() {
        let line = "BTN001 PİLİÇ 45,20 45,65 KNT002 KANAT 52,10 52,62";
        let codes: Vec<&str> = CODE_INLINE.find_iter(line).map(|m| m.as_str()).collect();
        assert_eq!(codes, ["BTN001", "KNT002"]);
    }

    #[test]
    fn test_price_token() {
        let found: Vec<&str> = PRICE_TOKEN
            .find_iter("PİLİÇ 1200 GR 45,20 45.65")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, ["45,20", "45.65"]);
    }
}
