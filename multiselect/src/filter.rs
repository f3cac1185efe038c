//! Case-insensitive substring filtering using nucleo-matcher.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Result of a filter operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMatch {
    /// Index of the matched item in the original list.
    pub index: usize,
    /// Match score (higher is better). Not used for ordering.
    pub score: u32,
}

/// Keep the haystacks containing `query`, ignoring case.
///
/// Results stay in declaration order. A blank query returns every item with
/// score 0. Whitespace separates terms that must all be present.
///
/// # Example
///
/// ```
/// use multiselect::substring_filter;
///
/// let labels = vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()];
/// let hits: Vec<usize> = substring_filter("AL", &labels).iter().map(|m| m.index).collect();
/// assert_eq!(hits, vec![0]);
/// ```
pub fn substring_filter(query: &str, haystacks: &[String]) -> Vec<FilterMatch> {
    if query.trim().is_empty() {
        return haystacks
            .iter()
            .enumerate()
            .map(|(index, _)| FilterMatch { index, score: 0 })
            .collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Substring,
    );

    let mut buf = Vec::new();
    haystacks
        .iter()
        .enumerate()
        .filter_map(|(index, text)| {
            let haystack = Utf32Str::new(text, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| FilterMatch { index, score })
        })
        .collect()
}
