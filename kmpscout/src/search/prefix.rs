use std::ops::Deref;
use tracing::trace;

use crate::errors::{SearchError, SearchResult};

/// Failure function of a pattern.
///
/// Entry `i` is the length of the longest proper prefix of `pattern[..=i]`
/// that is also a suffix of it. The table is immutable once built and is
/// shared read-only by every worker of a parallel search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    entries: Vec<usize>,
}

impl PrefixTable {
    /// Number of entries, always equal to the pattern length
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a table produced by [`build_prefix_table`]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw entries
    pub fn as_slice(&self) -> &[usize] {
        &self.entries
    }

    /// Length of the longest border of the whole pattern, i.e. the state the
    /// automaton resumes from after reporting a match
    pub fn border(&self) -> usize {
        self.entries.last().copied().unwrap_or(0)
    }
}

impl Deref for PrefixTable {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.entries
    }
}

impl From<PrefixTable> for Vec<usize> {
    fn from(table: PrefixTable) -> Self {
        table.entries
    }
}

/// Computes the failure function of `pattern` in O(m).
///
/// # Errors
///
/// Returns [`SearchError::InvalidPattern`] if `pattern` is empty.
pub fn build_prefix_table<T: PartialEq>(pattern: &[T]) -> SearchResult<PrefixTable> {
    if pattern.is_empty() {
        return Err(SearchError::empty_pattern());
    }

    let mut entries = vec![0; pattern.len()];
    let mut length = 0;

    for i in 1..pattern.len() {
        while length > 0 && pattern[i] != pattern[length] {
            length = entries[length - 1];
        }
        if pattern[i] == pattern[length] {
            length += 1;
        }
        entries[i] = length;
    }

    trace!("Built prefix table for {} symbols", pattern.len());
    Ok(PrefixTable { entries })
}
