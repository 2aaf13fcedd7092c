/// Match result types.
///
/// A [`MatchSet`] is the de-duplicated collection of start offsets where a
/// pattern occurs in a text. Two match sets are equal when they contain the
/// same offsets; the order in which workers discovered them is irrelevant.
/// Offsets are kept in a `BTreeSet` so iteration is always ascending, which
/// keeps reporting deterministic without making order part of the contract.
use std::collections::btree_set;
use std::collections::BTreeSet;

/// The complete set of match start offsets for one (text, pattern) pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    offsets: BTreeSet<usize>,
}

impl MatchSet {
    /// Creates a new empty match set
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds an offset, returning false if it was already present
    pub fn insert(&mut self, offset: usize) -> bool {
        self.offsets.insert(offset)
    }

    /// Merges another match set into this one
    pub fn merge(&mut self, other: MatchSet) {
        self.offsets.extend(other.offsets);
    }

    /// Number of distinct offsets
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.offsets.contains(&offset)
    }

    /// Offsets in ascending order
    pub fn iter(&self) -> btree_set::Iter<'_, usize> {
        self.offsets.iter()
    }

    /// Offsets in ascending order, collected into a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.offsets.iter().copied().collect()
    }
}

impl FromIterator<usize> for MatchSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            offsets: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for MatchSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.offsets.extend(iter);
    }
}

impl IntoIterator for MatchSet {
    type Item = usize;
    type IntoIter = btree_set::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a usize;
    type IntoIter = btree_set::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter()
    }
}
