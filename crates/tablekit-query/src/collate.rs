//! Case-insensitive, accent-folding string collation.

use std::cmp::Ordering;

use deunicode::deunicode;

/// Compares two labels the way a reader would alphabetize them.
///
/// Labels are compared by their lower-cased ASCII transliteration first, so
/// `"Éclair"` sorts with the `e`s, then by their lower-cased original text.
/// Labels that differ only in case compare equal.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    deunicode(&a_lower)
        .cmp(&deunicode(&b_lower))
        .then_with(|| a_lower.cmp(&b_lower))
}
