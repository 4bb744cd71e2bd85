//! The store: primary records plus the index registry
//!
//! `records` is the source of truth. Every index is derived classification
//! state that CRUD operations keep in step with `records`.

use std::collections::BTreeMap;

use super::bucket::Index;
use super::config::StoreConfig;
use super::errors::StoreResult;
use super::pairs::{self, Coverage, NormalizedPairs, Pair};
use super::stats::{IndexStats, StoreStats};

/// In-memory ordered record store with named secondary indexes.
#[derive(Debug, Clone)]
pub struct Store<K, V> {
    pub(super) config: StoreConfig,
    pub(super) records: BTreeMap<K, V>,
    pub(super) indexes: BTreeMap<String, Index<K>>,
}

impl<K: Ord + Clone, V> Store<K, V> {
    /// Creates an empty store with the default configuration.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::with_config(StoreConfig::named(name))
    }

    /// Creates an empty store from a config.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            records: BTreeMap::new(),
            indexes: BTreeMap::new(),
        }
    }

    /// Store label from the config.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Configuration the store was created with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.records.get(key)
    }

    /// Whether a record exists under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.records.keys().cloned().collect()
    }

    /// All values in ascending key order.
    pub fn values(&self) -> Vec<&V> {
        self.records.values().collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ---------------------------------------------------------------------
    // Unindexed scans (key order)
    // ---------------------------------------------------------------------

    /// Every record matching `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Vec<(&K, &V)>
    where
        P: Fn(&K, &V) -> bool,
    {
        self.records
            .iter()
            .filter(|(key, value)| predicate(*key, *value))
            .collect()
    }

    /// The first record matching `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<(&K, &V)>
    where
        P: Fn(&K, &V) -> bool,
    {
        self.records
            .iter()
            .find(|(key, value)| predicate(*key, *value))
    }

    /// Whether any record matches `predicate`.
    pub fn any<P>(&self, predicate: P) -> bool
    where
        P: Fn(&K, &V) -> bool,
    {
        self.records.iter().any(|(key, value)| predicate(key, value))
    }

    /// Apply `f` to every record, keeping the keys.
    pub fn map_values<A, F>(&self, f: F) -> BTreeMap<K, A>
    where
        F: Fn(&K, &V) -> A,
    {
        self.records
            .iter()
            .map(|(key, value)| (key.clone(), f(key, value)))
            .collect()
    }

    /// Record and index counts.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            name: self.config.name.clone(),
            record_count: self.records.len(),
            indexes: self
                .indexes
                .iter()
                .map(|(name, index)| IndexStats {
                    name: name.clone(),
                    bucket_count: index.bucket_count(),
                    key_count: index.key_count(),
                })
                .collect(),
        }
    }

    // ---------------------------------------------------------------------
    // Internal helpers shared by the CRUD and lifecycle operations
    // ---------------------------------------------------------------------

    pub(super) fn normalize(
        &self,
        pairs: &[Pair<'_>],
        coverage: Coverage,
    ) -> StoreResult<NormalizedPairs> {
        pairs::normalize(
            pairs,
            |name| self.indexes.contains_key(name),
            self.indexes.len(),
            coverage,
        )
    }

    /// Insert `key` into the bucket named by each normalized pair.
    ///
    /// Pairs must have been normalized against the current registry.
    pub(super) fn index_key(&mut self, key: &K, pairs: &NormalizedPairs) {
        for (name, label) in pairs {
            if let Some(index) = self.indexes.get_mut(name) {
                index.insert(label, key.clone());
            }
        }
    }

    /// Remove `key` from every bucket of every index.
    pub(super) fn unindex_key(&mut self, key: &K) {
        for index in self.indexes.values_mut() {
            index.remove_everywhere(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Store<u32, &'static str> {
        let mut store = Store::empty("numbers");
        store.add(3, "three", None).unwrap();
        store.add(1, "one", None).unwrap();
        store.add(2, "two", None).unwrap();
        store
    }

    #[test]
    fn test_empty_store() {
        let store: Store<String, i32> = Store::empty("accounts");
        assert_eq!(store.name(), "accounts");
        assert!(store.is_empty());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_keys_and_values_in_key_order() {
        let store = sample();
        assert_eq!(store.keys(), vec![1, 2, 3]);
        assert_eq!(store.values(), vec![&"one", &"two", &"three"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_scans() {
        let store = sample();

        let odd: Vec<_> = store.filter(|k, _| k % 2 == 1).into_iter().map(|(k, _)| *k).collect();
        assert_eq!(odd, vec![1, 3]);

        assert_eq!(store.find(|_, v| v.starts_with('t')), Some((&2, &"two")));
        assert!(store.any(|_, v| *v == "three"));
        assert!(!store.any(|_, v| *v == "four"));

        let lengths = store.map_values(|_, v| v.len());
        assert_eq!(lengths.into_iter().collect::<Vec<_>>(), vec![(1, 3), (2, 3), (3, 5)]);
    }

    #[test]
    fn test_stats() {
        let mut store: Store<u32, &str> = Store::empty("numbers");
        store.register_index("parity").unwrap();
        store.add(1, "one", Some(&[("parity", "odd")])).unwrap();
        store.add(2, "two", Some(&[("parity", "even")])).unwrap();
        store.add(3, "three", Some(&[("parity", "odd")])).unwrap();

        let stats = store.stats();
        assert_eq!(stats.name, "numbers");
        assert_eq!(stats.record_count, 3);
        assert_eq!(stats.indexes.len(), 1);
        assert_eq!(stats.indexes[0].bucket_count, 2);
        assert_eq!(stats.indexes[0].key_count, 3);
    }
}
