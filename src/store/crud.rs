//! Record mutations
//!
//! Every mutation validates first and writes second, so a failed call
//! leaves both the records and every index untouched. Whenever new index
//! pairs are supplied for an existing key, the key is stripped from all of
//! its buckets before being re-added, which keeps each key in at most one
//! bucket per index.

use tracing::trace;

use super::errors::{StoreError, StoreResult};
use super::pairs::{Coverage, Pair};
use super::store::Store;

impl<K: Ord + Clone, V> Store<K, V> {
    /// Insert a new record classified by `pairs`.
    ///
    /// `pairs` must name every registered index exactly once; `None` is
    /// treated as an empty list.
    pub fn add(&mut self, key: K, value: V, pairs: Option<&[Pair<'_>]>) -> StoreResult<()> {
        if self.records.contains_key(&key) {
            return Err(StoreError::KeyExists);
        }
        let normalized = self.normalize(pairs.unwrap_or(&[]), Coverage::Exact)?;

        self.index_key(&key, &normalized);
        self.records.insert(key, value);

        trace!(
            target: "bucketdb::store",
            store = %self.config.name,
            indexes = normalized.len(),
            "record added"
        );
        Ok(())
    }

    /// Insert or replace a record. Returns the previous value, if any.
    ///
    /// With `pairs = None` an existing key keeps its index membership; a new
    /// key is rejected when any index is registered.
    pub fn put(&mut self, key: K, value: V, pairs: Option<&[Pair<'_>]>) -> StoreResult<Option<V>> {
        match pairs {
            None => {
                if !self.records.contains_key(&key) && !self.indexes.is_empty() {
                    return Err(StoreError::IndexMismatch(
                        "new keys must be classified in every registered index".to_string(),
                    ));
                }
            }
            Some(pairs) => {
                let normalized = self.normalize(pairs, Coverage::Exact)?;
                self.unindex_key(&key);
                self.index_key(&key, &normalized);
            }
        }

        let previous = self.records.insert(key, value);

        trace!(
            target: "bucketdb::store",
            store = %self.config.name,
            replaced = previous.is_some(),
            reindexed = pairs.is_some(),
            "record put"
        );
        Ok(previous)
    }

    /// Replace an existing record's value with `transform(current)`.
    ///
    /// Pairs are handled exactly as in [`put`](Self::put). Returns the new
    /// value. `transform` runs before anything is written, so a panic inside
    /// it leaves the store unchanged.
    pub fn update<F>(&mut self, key: &K, transform: F, pairs: Option<&[Pair<'_>]>) -> StoreResult<&V>
    where
        F: FnOnce(&V) -> V,
    {
        let current = self.records.get(key).ok_or(StoreError::NotFound)?;
        let normalized = pairs
            .map(|pairs| self.normalize(pairs, Coverage::Exact))
            .transpose()?;
        let next = transform(current);

        if let Some(normalized) = &normalized {
            self.unindex_key(key);
            self.index_key(key, normalized);
        }

        trace!(
            target: "bucketdb::store",
            store = %self.config.name,
            reindexed = normalized.is_some(),
            "record updated"
        );

        let slot = self.records.get_mut(key).ok_or(StoreError::NotFound)?;
        *slot = next;
        Ok(&*slot)
    }

    /// Move a record from `old_key` to `new_key`, storing `value` under the
    /// new key.
    ///
    /// With `pairs = None` the new key inherits the buckets the old key
    /// currently occupies.
    pub fn rename_key(
        &mut self,
        old_key: &K,
        new_key: K,
        value: V,
        pairs: Option<&[Pair<'_>]>,
    ) -> StoreResult<()> {
        if !self.records.contains_key(old_key) {
            return Err(StoreError::NotFound);
        }
        if self.records.contains_key(&new_key) {
            return Err(StoreError::KeyExists);
        }
        let resolved = match pairs {
            Some(pairs) => self.normalize(pairs, Coverage::Exact)?,
            None => self.index_pairs_for_key(old_key),
        };

        self.records.remove(old_key);
        self.unindex_key(old_key);

        self.index_key(&new_key, &resolved);
        self.records.insert(new_key, value);

        trace!(
            target: "bucketdb::store",
            store = %self.config.name,
            indexes = resolved.len(),
            "record renamed"
        );
        Ok(())
    }

    /// Remove a record and scrub it from every index.
    pub fn remove(&mut self, key: &K) -> StoreResult<()> {
        self.delete(key).map(|_| ())
    }

    /// Remove a record and scrub it from every index, returning its value.
    pub fn delete(&mut self, key: &K) -> StoreResult<V> {
        let value = self.records.remove(key).ok_or(StoreError::NotFound)?;
        self.unindex_key(key);

        trace!(target: "bucketdb::store", store = %self.config.name, "record removed");
        Ok(value)
    }
}
