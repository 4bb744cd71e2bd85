//! Ordering and pagination helpers for query results
//!
//! Results are produced in ascending key order first; ordering and paging
//! are applied afterwards, so both are deterministic.

use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Apply the direction to an ascending sequence.
    ///
    /// Descending is the exact reverse of ascending.
    pub fn apply<T>(self, mut ascending: Vec<T>) -> Vec<T> {
        if self == SortOrder::Descending {
            ascending.reverse();
        }
        ascending
    }
}

/// Zero-based `(offset, limit)` window over an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Slice `items` to this window. Out-of-range offsets yield an empty result.
    pub fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

/// Sort `(key, value)` entries by a projection of each entry.
///
/// Projections are computed once per entry. Ties fall back to key order so
/// the result never depends on input order.
pub fn sort_by_projection<'a, K, V, A, P, C>(
    entries: Vec<(&'a K, &'a V)>,
    projector: P,
    compare: C,
) -> Vec<(&'a K, &'a V)>
where
    K: Ord,
    P: Fn(&K, &V) -> A,
    C: Fn(&A, &A) -> Ordering,
{
    let mut decorated: Vec<(A, &'a K, &'a V)> = entries
        .into_iter()
        .map(|(key, value)| (projector(key, value), key, value))
        .collect();

    decorated.sort_by(|a, b| compare(&a.0, &b.0).then_with(|| a.1.cmp(b.1)));

    decorated
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .collect()
}
