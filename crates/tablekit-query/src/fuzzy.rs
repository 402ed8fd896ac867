//! Fuzzy matching for column and field pickers.
//!
//! Matching is case-insensitive subsequence matching: every pattern
//! character must appear in the target, in order, not necessarily
//! contiguously. Positions are chosen greedily, leftmost first, and the
//! score rewards contiguous runs, matches at the start of the target and at
//! word boundaries, short targets, and high pattern coverage.
//!
//! Indices are character positions, not byte offsets.

use serde::Serialize;

/// Bonus for a match at the first character of the target.
const START_BONUS: i64 = 10;

/// Bonus for a match right after a space, underscore or hyphen.
const WORD_BOUNDARY_BONUS: i64 = 5;

/// Bonus for an uppercase match right after a non-uppercase character.
const CAMEL_CASE_BONUS: i64 = 3;

/// Targets shorter than this many characters earn the difference.
const SHORT_TARGET_LENGTH: i64 = 20;

/// Scale of the pattern/target coverage bonus.
const COVERAGE_SCALE: i64 = 10;

/// A successful fuzzy match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyMatch {
    /// The target string that was matched.
    pub text: String,
    /// Match score; higher is better.
    pub score: i64,
    /// Strictly increasing character positions of the matched characters.
    pub matched_indices: Vec<usize>,
}

impl FuzzyMatch {
    fn unranked(text: &str) -> Self {
        FuzzyMatch {
            text: text.to_string(),
            score: 0,
            matched_indices: Vec::new(),
        }
    }
}

/// Matches `pattern` against `target`.
///
/// An empty pattern matches everything with score 0 and no indices. Returns
/// `None` when the pattern is not a case-insensitive subsequence of the
/// target.
///
/// ```
/// use tablekit_query::fuzzy_match;
///
/// let m = fuzzy_match("cd", "Created Date").unwrap();
/// assert_eq!(m.matched_indices, vec![0, 6]);
/// assert!(fuzzy_match("xyz", "Created Date").is_none());
/// ```
pub fn fuzzy_match(pattern: &str, target: &str) -> Option<FuzzyMatch> {
    if pattern.is_empty() {
        return Some(FuzzyMatch::unranked(target));
    }

    let pattern_chars: Vec<char> = pattern.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();

    let mut matched_indices = Vec::with_capacity(pattern_chars.len());
    let mut score: i64 = 0;
    // A match at index 0 continues the run from the position before the target.
    let mut last_match: isize = -1;
    let mut run_length: i64 = 0;

    for (i, &current) in target_chars.iter().enumerate() {
        let Some(&wanted) = pattern_chars.get(matched_indices.len()) else {
            break;
        };
        if !eq_ignore_case(current, wanted) {
            continue;
        }

        matched_indices.push(i);
        score += 1;

        if last_match == i as isize - 1 {
            run_length += 1;
            score += run_length * 2;
        } else {
            run_length = 0;
        }

        if i == 0 {
            score += START_BONUS;
        } else {
            let previous = target_chars[i - 1];
            if matches!(previous, ' ' | '_' | '-') {
                score += WORD_BOUNDARY_BONUS;
            } else if current.is_uppercase() && !previous.is_uppercase() {
                score += CAMEL_CASE_BONUS;
            }
        }

        last_match = i as isize;
    }

    if matched_indices.len() != pattern_chars.len() {
        return None;
    }

    let target_len = target_chars.len() as i64;
    let pattern_len = pattern_chars.len() as i64;
    score += (SHORT_TARGET_LENGTH - target_len).max(0);
    score += COVERAGE_SCALE * pattern_len / target_len;

    Some(FuzzyMatch {
        text: target.to_string(),
        score,
        matched_indices,
    })
}

/// Matches `pattern` against every item and ranks the matches.
///
/// With an empty pattern every item is returned unranked, in its original
/// order. Otherwise non-matches are dropped and the rest are sorted by
/// descending score; equal scores keep their original relative order. The
/// result is truncated to `limit` when given.
///
/// ```
/// use tablekit_query::fuzzy_search;
///
/// let items = ["Status", "Created Date", "Description", "User Name", "Priority"];
/// let results = fuzzy_search("st", &items, None);
/// assert_eq!(results[0].text, "Status");
/// assert_eq!(results.len(), 2);
/// ```
pub fn fuzzy_search<S: AsRef<str>>(
    pattern: &str,
    items: &[S],
    limit: Option<usize>,
) -> Vec<FuzzyMatch> {
    let mut results: Vec<FuzzyMatch> = if pattern.is_empty() {
        items
            .iter()
            .map(|item| FuzzyMatch::unranked(item.as_ref()))
            .collect()
    } else {
        let mut matches: Vec<FuzzyMatch> = items
            .iter()
            .filter_map(|item| fuzzy_match(pattern, item.as_ref()))
            .collect();
        // Stable, so ties keep their input order.
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    };

    if let Some(limit) = limit {
        results.truncate(limit);
    }
    results
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
