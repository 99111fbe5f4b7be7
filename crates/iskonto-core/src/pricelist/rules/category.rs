//! Category resolution: table position first, code prefix second.

use crate::models::product::Category;

/// Category of each table ordinal on a page. The source layout emits
/// pairs of tables per category (bulk-loose, then packaged) in a fixed
/// repeating order, twelve tables covering the six categories.
///
/// This lookup silently misclassifies if the source layout's table
/// count or order ever changes; that is a known fragility of the
/// position heuristic, not something to generalize.
const TABLE_CATEGORY_ORDER: [Category; 12] = [
    Category::WholeBird,
    Category::WholeBird,
    Category::Wing,
    Category::Wing,
    Category::Leg,
    Category::Leg,
    Category::Breast,
    Category::Breast,
    Category::Offal,
    Category::Offal,
    Category::OtherCuts,
    Category::OtherCuts,
];

/// Code prefixes in match order. Frozen four-letter prefixes come
/// first so a shorter prefix never preempts a longer, more specific
/// one.
const CODE_PREFIXES: [(&str, Category); 12] = [
    ("DBTN", Category::WholeBird),
    ("DKNT", Category::Wing),
    ("DBUT", Category::Leg),
    ("DGGS", Category::Breast),
    ("DSAK", Category::Offal),
    ("DYAN", Category::OtherCuts),
    ("BTN", Category::WholeBird),
    ("KNT", Category::Wing),
    ("BUT", Category::Leg),
    ("GGS", Category::Breast),
    ("SAK", Category::Offal),
    ("YAN", Category::OtherCuts),
];

/// Resolve a category for a recognized code. Position wins when the
/// table ordinal falls inside the expected layout; anything else
/// (text path, extra tables) falls through to the prefix mapping.
pub fn classify(code: &str, table_index: Option<usize>) -> Option<Category> {
    if let Some(idx) = table_index {
        if let Some(category) = TABLE_CATEGORY_ORDER.get(idx) {
            return Some(*category);
        }
    }
    classify_by_prefix(code)
}

/// Prefix-only resolution, used when positional context is unavailable.
pub fn classify_by_prefix(code: &str) -> Option<Category> {
    let upper = code.to_uppercase();
    CODE_PREFIXES
        .iter()
        .find(|(prefix, _)| upper.starts_with(prefix))
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wins_over_prefix() {
        // Wing code sitting in a whole-bird table: position decides.
        assert_eq!(classify("KNT001", Some(0)), Some(Category::WholeBird));
        assert_eq!(classify("KNT001", Some(11)), Some(Category::OtherCuts));
    }

    #[test]
    fn test_out_of_range_table_falls_back_to_prefix() {
        assert_eq!(classify("KNT001", Some(12)), Some(Category::Wing));
        assert_eq!(classify("KNT001", None), Some(Category::Wing));
    }

    #[test]
    fn test_table_pairs_cover_all_categories() {
        for (idx, expected) in Category::ALL.iter().enumerate() {
            assert_eq!(classify("XX000", Some(idx * 2)), Some(*expected));
            assert_eq!(classify("XX000", Some(idx * 2 + 1)), Some(*expected));
        }
    }

    #[test]
    fn test_frozen_prefixes() {
        assert_eq!(classify_by_prefix("DBTN001"), Some(Category::WholeBird));
        assert_eq!(classify_by_prefix("DSAK010"), Some(Category::Offal));
        assert_eq!(classify_by_prefix("dyan002"), Some(Category::OtherCuts));
    }

    #[test]
    fn test_unknown_prefix_is_none() {
        assert_eq!(classify_by_prefix("XYZ001"), None);
        assert_eq!(classify("XYZ001", Some(99)), None);
    }
}
