//! BTreeMap-based bucket index
//!
//! An index maps bucket labels to the ordered set of keys classified under
//! that label. Buckets are created on first insert and removed as soon as
//! they become empty, so no empty bucket is ever observable.

use std::collections::{BTreeMap, BTreeSet};

/// A single named index: bucket label -> ordered key set.
#[derive(Debug, Clone)]
pub struct Index<K> {
    buckets: BTreeMap<String, BTreeSet<K>>,
}

impl<K> Default for Index<K> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> Index<K> {
    /// Creates a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key into a bucket, creating the bucket on demand.
    pub fn insert(&mut self, label: &str, key: K) {
        match self.buckets.get_mut(label) {
            Some(keys) => {
                keys.insert(key);
            }
            None => {
                let mut keys = BTreeSet::new();
                keys.insert(key);
                self.buckets.insert(label.to_string(), keys);
            }
        }
    }

    /// Remove a key from a bucket.
    ///
    /// If the bucket has no more keys, removes the bucket entirely.
    /// Returns whether the key was present.
    pub fn remove(&mut self, label: &str, key: &K) -> bool {
        let Some(keys) = self.buckets.get_mut(label) else {
            return false;
        };
        let removed = keys.remove(key);
        if keys.is_empty() {
            self.buckets.remove(label);
        }
        removed
    }

    /// Remove a key from every bucket it appears in.
    pub fn remove_everywhere(&mut self, key: &K) {
        self.buckets.retain(|_, keys| {
            keys.remove(key);
            !keys.is_empty()
        });
    }

    /// Returns the keys of a bucket in ascending order, if the bucket exists.
    pub fn bucket(&self, label: &str) -> Option<&BTreeSet<K>> {
        self.buckets.get(label)
    }

    /// Returns the label of the first bucket containing `key`.
    pub fn label_of(&self, key: &K) -> Option<&str> {
        self.buckets
            .iter()
            .find(|(_, keys)| keys.contains(key))
            .map(|(label, _)| label.as_str())
    }

    /// Iterate over `(label, keys)` in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<K>)> {
        self.buckets.iter().map(|(label, keys)| (label.as_str(), keys))
    }

    /// Clear all buckets
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Returns the number of buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the total number of bucketed keys
    pub fn key_count(&self) -> usize {
        self.buckets.values().map(|keys| keys.len()).sum()
    }
}
