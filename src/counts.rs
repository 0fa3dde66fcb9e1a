use ahash::AHashMap as HashMap;
use std::hash::Hash;

/// Frequency mapping from each distinct value to the number of times it occurs.
///
/// After a fresh count of a sequence, the keys are exactly the distinct values
/// present and [`Counts::total`] equals the sequence length.
#[derive(Debug, Clone)]
pub struct Counts<T> {
    map: HashMap<T, usize>,
}

/// How a counting call treats counts already present in the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accumulate {
    /// Clear the mapping before counting.
    #[default]
    Fresh,
    /// Add to whatever the mapping already holds.
    Merge,
}

/// Result of a counting call that builds its own mapping.
#[derive(Debug, Clone)]
pub struct Tally<T> {
    /// Per-value counts
    pub counts: Counts<T>,
    /// Comparisons the counter performed
    pub operations: usize,
}

impl<T: Hash + Eq> Counts<T> {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Creates an empty mapping with room for `capacity` distinct values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the count for `value`, zero if it was never seen.
    pub fn get(&self, value: &T) -> usize {
        self.map.get(value).copied().unwrap_or(0)
    }

    /// Adds `count` occurrences of `value`.
    pub fn add(&mut self, value: T, count: usize) {
        *self.map.entry(value).or_insert(0) += count;
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.map.values().sum()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over `(value, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.map.iter().map(|(value, &count)| (value, count))
    }

    /// Prepares the mapping for a counting call.
    pub(crate) fn prepare(&mut self, mode: Accumulate) {
        if mode == Accumulate::Fresh {
            self.clear();
        }
    }
}

impl<T: Hash + Eq + Ord> Counts<T> {
    /// Returns `(value, count)` pairs ordered by value.
    pub fn sorted(&self) -> Vec<(&T, usize)> {
        let mut listing: Vec<(&T, usize)> = self.iter().collect();
        listing.sort_unstable_by(|a, b| a.0.cmp(b.0));
        listing
    }
}

impl<T: Hash + Eq> Default for Counts<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> PartialEq for Counts<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(value, count)| other.get(value) == count)
    }
}

impl<T: Hash + Eq> Eq for Counts<T> {}

impl<T: Hash + Eq> FromIterator<(T, usize)> for Counts<T> {
    fn from_iter<I: IntoIterator<Item = (T, usize)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (value, count) in iter {
            counts.add(value, count);
        }
        counts
    }
}

impl<T> IntoIterator for Counts<T> {
    type Item = (T, usize);
    type IntoIter = std::collections::hash_map::IntoIter<T, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}
