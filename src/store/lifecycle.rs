//! Index lifecycle
//!
//! Registering, dropping, clearing, rebuilding and verifying individual
//! indexes, plus cheap partial reclassification of one record.
//!
//! # Invariants
//!
//! - Registration never populates an index retroactively
//! - Unregistering or clearing an index never touches records
//! - `rebuild_index` followed by `verify_index` with the same projector succeeds

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::bucket::Index;
use super::errors::{StoreError, StoreResult};
use super::pairs::{Coverage, NormalizedPairs, Pair};
use super::store::Store;

impl<K: Ord + Clone, V> Store<K, V> {
    /// Register a new, empty index.
    pub fn register_index(&mut self, name: &str) -> StoreResult<()> {
        if self.indexes.contains_key(name) {
            return Err(StoreError::IndexExists(name.to_string()));
        }
        self.indexes.insert(name.to_string(), Index::new());

        debug!(target: "bucketdb::index", store = %self.config.name, index = name, "index registered");
        Ok(())
    }

    /// Drop an index and all of its buckets.
    pub fn unregister_index(&mut self, name: &str) -> StoreResult<()> {
        self.indexes
            .remove(name)
            .ok_or_else(|| StoreError::invalid_index(name))?;

        debug!(target: "bucketdb::index", store = %self.config.name, index = name, "index unregistered");
        Ok(())
    }

    /// Empty every bucket of an index.
    pub fn clear_index(&mut self, name: &str) -> StoreResult<()> {
        self.index_mut(name)?.clear();

        debug!(target: "bucketdb::index", store = %self.config.name, index = name, "index cleared");
        Ok(())
    }

    /// Repopulate an index from scratch, placing every record in bucket
    /// `projector(value)`.
    ///
    /// A panicking projector leaves the previous index in place.
    pub fn rebuild_index<P, L>(&mut self, name: &str, projector: P) -> StoreResult<()>
    where
        P: Fn(&V) -> L,
        L: Into<String>,
    {
        self.index(name)?;

        // Projection runs against a fresh index; the live one is only
        // replaced once every record has been classified.
        let mut rebuilt = Index::new();
        for (key, value) in &self.records {
            let label: String = projector(value).into();
            rebuilt.insert(&label, key.clone());
        }
        let buckets = rebuilt.bucket_count();
        *self.index_mut(name)? = rebuilt;

        debug!(
            target: "bucketdb::index",
            store = %self.config.name,
            index = name,
            records = self.records.len(),
            buckets,
            "index rebuilt"
        );

        if self.config.verify_after_rebuild {
            self.verify_index(name, projector)?;
        }
        Ok(())
    }

    /// Check an index against `projector` in both directions.
    ///
    /// - every record's key is in bucket `projector(value)`
    /// - every bucketed key exists and sits in bucket `projector(value)`
    ///
    /// Returns `Inconsistent(n)` where `n` counts distinct mismatched keys.
    pub fn verify_index<P, L>(&self, name: &str, projector: P) -> StoreResult<()>
    where
        P: Fn(&V) -> L,
        L: Into<String>,
    {
        let index = self.index(name)?;
        let mut mismatched: BTreeSet<&K> = BTreeSet::new();

        for (key, value) in &self.records {
            let label: String = projector(value).into();
            let present = index
                .bucket(&label)
                .is_some_and(|keys| keys.contains(key));
            if !present {
                mismatched.insert(key);
            }
        }

        for (label, keys) in index.iter() {
            for key in keys {
                let consistent = match self.records.get(key) {
                    Some(value) => {
                        let projected: String = projector(value).into();
                        projected == label
                    }
                    None => false,
                };
                if !consistent {
                    mismatched.insert(key);
                }
            }
        }

        if mismatched.is_empty() {
            return Ok(());
        }

        warn!(
            target: "bucketdb::index",
            store = %self.config.name,
            index = name,
            mismatched = mismatched.len(),
            "index verification failed"
        );
        Err(StoreError::Inconsistent(mismatched.len()))
    }

    /// Move one record between buckets without a full rebuild.
    ///
    /// The key is removed from every bucket in `old_pairs`, then added to
    /// every bucket in `new_pairs`. Either list may cover any subset of the
    /// registered indexes. `old_pairs` must name the buckets the key really
    /// occupies, otherwise it stays behind in the stale bucket.
    pub fn reindex_record(
        &mut self,
        key: &K,
        old_pairs: &[Pair<'_>],
        new_pairs: &[Pair<'_>],
    ) -> StoreResult<()> {
        if !self.records.contains_key(key) {
            return Err(StoreError::NotFound);
        }
        let old = self.normalize(old_pairs, Coverage::Subset)?;
        let new = self.normalize(new_pairs, Coverage::Subset)?;

        for (name, label) in &old {
            if let Some(index) = self.indexes.get_mut(name) {
                index.remove(label, key);
            }
        }
        self.index_key(key, &new);

        debug!(
            target: "bucketdb::index",
            store = %self.config.name,
            removed = old.len(),
            added = new.len(),
            "record reindexed"
        );
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Registry inspection
    // ---------------------------------------------------------------------

    /// Whether an index named `name` is registered.
    pub fn has_index(&self, name: &str) -> bool {
        self.indexes.contains_key(name)
    }

    /// Registered index names in ascending order.
    pub fn index_names(&self) -> Vec<&str> {
        self.indexes.keys().map(String::as_str).collect()
    }

    /// Non-empty bucket labels of an index in ascending order.
    pub fn bucket_labels(&self, name: &str) -> StoreResult<Vec<&str>> {
        Ok(self.index(name)?.iter().map(|(label, _)| label).collect())
    }

    /// The bucket `key` currently occupies in each registered index.
    ///
    /// Indexes where the key is not bucketed are omitted.
    pub fn index_pairs_for_key(&self, key: &K) -> NormalizedPairs {
        let mut pairs = NormalizedPairs::new();
        for (name, index) in &self.indexes {
            if let Some(label) = index.label_of(key) {
                pairs.insert(name.clone(), label.to_string());
            }
        }
        pairs
    }

    pub(super) fn index(&self, name: &str) -> StoreResult<&Index<K>> {
        self.indexes
            .get(name)
            .ok_or_else(|| StoreError::invalid_index(name))
    }

    fn index_mut(&mut self, name: &str) -> StoreResult<&mut Index<K>> {
        self.indexes
            .get_mut(name)
            .ok_or_else(|| StoreError::invalid_index(name))
    }
}
