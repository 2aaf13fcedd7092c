use tracing::{debug, trace};

use super::prefix::{build_prefix_table, PrefixTable};
use crate::errors::{SearchError, SearchResult};
use crate::results::MatchSet;

/// Runs the KMP automaton over `text` with a caller-supplied failure table.
///
/// Offsets are returned in ascending order and include overlapping
/// occurrences. A pattern longer than the text yields no offsets.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPattern`] if the pattern is empty or the
/// table was not built for a pattern of this length. No scanning happens in
/// either case.
pub fn search_with_table<T: PartialEq>(
    text: &[T],
    pattern: &[T],
    table: &PrefixTable,
) -> SearchResult<Vec<usize>> {
    if pattern.is_empty() {
        return Err(SearchError::empty_pattern());
    }
    if table.len() != pattern.len() {
        return Err(SearchError::table_mismatch(table.len(), pattern.len()));
    }
    Ok(scan(text, pattern, table))
}

/// The automaton proper; callers have already validated the table.
///
/// State `j` counts pattern symbols matched so far. On a mismatch the text
/// index stays put while `j` falls back through the table, so each step
/// either consumes a symbol or strictly decreases `j`.
pub(crate) fn scan<T: PartialEq>(text: &[T], pattern: &[T], table: &[usize]) -> Vec<usize> {
    let m = pattern.len();
    let mut matches = Vec::new();
    if m > text.len() {
        return matches;
    }

    let mut i = 0;
    let mut j = 0;
    while i < text.len() {
        if pattern[j] == text[i] {
            i += 1;
            j += 1;
            if j == m {
                trace!("Found match at offset {}", i - m);
                matches.push(i - m);
                j = table[m - 1];
            }
        } else if j > 0 {
            j = table[j - 1];
        } else {
            i += 1;
        }
    }
    matches
}

/// A pattern paired with its failure table, ready to scan any number of texts
#[derive(Debug, Clone)]
pub struct PatternMatcher<'p, T> {
    pattern: &'p [T],
    table: PrefixTable,
}

impl<'p, T: PartialEq> PatternMatcher<'p, T> {
    /// Builds the failure table for `pattern`
    pub fn new(pattern: &'p [T]) -> SearchResult<Self> {
        let table = build_prefix_table(pattern)?;
        Ok(Self { pattern, table })
    }

    pub fn pattern(&self) -> &'p [T] {
        self.pattern
    }

    pub fn table(&self) -> &PrefixTable {
        &self.table
    }

    /// Finds all match offsets in `text`, ascending
    pub fn find_matches(&self, text: &[T]) -> Vec<usize> {
        scan(text, self.pattern, &self.table)
    }
}

/// Single-threaded search over the whole text
pub fn sequential_search<T: PartialEq>(text: &[T], pattern: &[T]) -> SearchResult<MatchSet> {
    let matcher = PatternMatcher::new(pattern)?;
    let matches: MatchSet = matcher.find_matches(text).into_iter().collect();
    debug!(
        "Sequential search over {} symbols found {} matches",
        text.len(),
        matches.len()
    );
    Ok(matches)
}

/// Convenience wrapper matching over the UTF-8 bytes of `text` and `pattern`.
///
/// Offsets are byte offsets, so they can be used to slice `text` directly.
pub fn find_all_str(text: &str, pattern: &str) -> SearchResult<MatchSet> {
    sequential_search(text.as_bytes(), pattern.as_bytes())
}
