//! Product name normalization.

use super::patterns::{
    ABBR_FROZEN, ABBR_GRAM, ABBR_TRAY, STRAY_MARKS, TRAILING_FARK, TRAILING_KDV, WHITESPACE,
};

/// Clean an extracted product name.
///
/// Strips stray `%`/`*` marks and any trailing "Fark…"/"Kdv…" column
/// leakage, collapses whitespace, then expands the fixed
/// abbreviations. Expansion runs after suffix stripping so an
/// abbreviation inside a stripped suffix is never half-expanded.
pub fn clean_product_name(name: &str) -> String {
    let name = STRAY_MARKS.replace_all(name, "");
    let name = TRAILING_FARK.replace(&name, "");
    let name = TRAILING_KDV.replace(&name, "");
    let name = WHITESPACE.replace_all(name.trim(), " ").into_owned();

    let name = ABBR_FROZEN.replace_all(&name, "DONDURULMUŞ");
    let name = ABBR_TRAY.replace_all(&name, "TABAK");
    let name = ABBR_GRAM.replace_all(&name, "GRAM");

    name.trim().to_string()
}
