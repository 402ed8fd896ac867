//! Splitting matched text into highlight runs.

use std::collections::BTreeSet;

use serde::Serialize;

/// A run of characters that share the same match status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSegment {
    /// The characters of this run.
    pub text: String,
    /// Whether these characters were matched.
    pub is_match: bool,
}

impl HighlightSegment {
    fn new(text: String, is_match: bool) -> Self {
        HighlightSegment { text, is_match }
    }
}

/// Partitions `text` into maximal runs of matched and unmatched characters.
///
/// `matched_indices` are character positions, as produced by
/// [`fuzzy_match`](crate::fuzzy_match). With no indices the whole text is a
/// single unmatched segment. Concatenating the segment texts always
/// reproduces `text`.
///
/// ```
/// use tablekit_query::highlight_matches;
///
/// let segments = highlight_matches("Status", &[0, 1]);
/// assert_eq!(segments[0].text, "St");
/// assert!(segments[0].is_match);
/// assert_eq!(segments[1].text, "atus");
/// assert!(!segments[1].is_match);
/// ```
pub fn highlight_matches(text: &str, matched_indices: &[usize]) -> Vec<HighlightSegment> {
    if matched_indices.is_empty() {
        return vec![HighlightSegment::new(text.to_string(), false)];
    }

    let matched: BTreeSet<usize> = matched_indices.iter().copied().collect();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_is_match = matched.contains(&0);

    for (i, c) in text.chars().enumerate() {
        let is_match = matched.contains(&i);
        if is_match != current_is_match && !current.is_empty() {
            segments.push(HighlightSegment::new(std::mem::take(&mut current), current_is_match));
        }
        current_is_match = is_match;
        current.push(c);
    }

    if !current.is_empty() {
        segments.push(HighlightSegment::new(current, current_is_match));
    }

    segments
}
