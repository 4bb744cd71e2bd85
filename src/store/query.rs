//! Bucket queries
//!
//! Lookups go through an index bucket and resolve keys back through the
//! records. A missing bucket is simply empty; a missing index is an error.
//! A bucketed key with no record means the index has drifted from the
//! records, which surfaces as `NotFound` instead of being skipped.
//!
//! All results start in ascending key order. Ordering and paging are
//! applied on top of that sequence.

use std::cmp::Ordering;

use super::errors::{StoreError, StoreResult};
use super::order::{self, Page, SortOrder};
use super::store::Store;

impl<K: Ord + Clone, V> Store<K, V> {
    /// Keys in a bucket, ascending.
    pub fn keys_by(&self, name: &str, bucket: &str) -> StoreResult<Vec<K>> {
        Ok(self.bucket_keys(name, bucket)?.into_iter().cloned().collect())
    }

    /// Values of the records in a bucket, in ascending key order.
    pub fn values_by(&self, name: &str, bucket: &str) -> StoreResult<Vec<&V>> {
        Ok(self
            .bucket_entries(name, bucket)?
            .into_iter()
            .map(|(_, value)| value)
            .collect())
    }

    /// Number of keys in a bucket. A missing bucket counts as 0.
    pub fn count_by(&self, name: &str, bucket: &str) -> StoreResult<usize> {
        Ok(self
            .index(name)?
            .bucket(bucket)
            .map_or(0, |keys| keys.len()))
    }

    /// Same as [`count_by`](Self::count_by).
    pub fn index_size_by(&self, name: &str, bucket: &str) -> StoreResult<usize> {
        self.count_by(name, bucket)
    }

    /// Value of the lowest key in a bucket.
    pub fn first_by(&self, name: &str, bucket: &str) -> StoreResult<Option<&V>> {
        let first = self
            .index(name)?
            .bucket(bucket)
            .and_then(|keys| keys.iter().next());

        match first {
            Some(key) => self.records.get(key).map(Some).ok_or(StoreError::NotFound),
            None => Ok(None),
        }
    }

    /// Keys in a bucket in the given key order.
    pub fn keys_by_order(&self, name: &str, bucket: &str, order: SortOrder) -> StoreResult<Vec<K>> {
        Ok(order.apply(self.keys_by(name, bucket)?))
    }

    /// Keys in a bucket sorted by a projection of each record.
    ///
    /// Entries are sorted ascending by `compare(projector(key, value))`,
    /// ties broken by key, then `order` is applied.
    pub fn keys_by_value<A, P, C>(
        &self,
        name: &str,
        bucket: &str,
        order: SortOrder,
        projector: P,
        compare: C,
    ) -> StoreResult<Vec<K>>
    where
        P: Fn(&K, &V) -> A,
        C: Fn(&A, &A) -> Ordering,
    {
        Ok(self
            .sorted_entries(name, bucket, order, projector, compare)?
            .into_iter()
            .map(|(key, _)| key.clone())
            .collect())
    }

    /// Values in a bucket sorted by a projection of each record.
    ///
    /// Ordering follows [`keys_by_value`](Self::keys_by_value).
    pub fn values_by_order<A, P, C>(
        &self,
        name: &str,
        bucket: &str,
        order: SortOrder,
        projector: P,
        compare: C,
    ) -> StoreResult<Vec<&V>>
    where
        P: Fn(&K, &V) -> A,
        C: Fn(&A, &A) -> Ordering,
    {
        Ok(self
            .sorted_entries(name, bucket, order, projector, compare)?
            .into_iter()
            .map(|(_, value)| value)
            .collect())
    }

    // ---------------------------------------------------------------------
    // Paginated variants
    // ---------------------------------------------------------------------

    /// One page of [`keys_by`](Self::keys_by).
    pub fn page_keys_by(&self, name: &str, bucket: &str, page: Page) -> StoreResult<Vec<K>> {
        Ok(page.apply(self.keys_by(name, bucket)?))
    }

    /// One page of [`values_by`](Self::values_by).
    pub fn page_by(&self, name: &str, bucket: &str, page: Page) -> StoreResult<Vec<&V>> {
        Ok(page.apply(self.values_by(name, bucket)?))
    }

    /// One page of [`keys_by_order`](Self::keys_by_order).
    pub fn page_keys_by_order(
        &self,
        name: &str,
        bucket: &str,
        order: SortOrder,
        page: Page,
    ) -> StoreResult<Vec<K>> {
        Ok(page.apply(self.keys_by_order(name, bucket, order)?))
    }

    /// One page of [`keys_by_value`](Self::keys_by_value).
    pub fn page_keys_by_value<A, P, C>(
        &self,
        name: &str,
        bucket: &str,
        order: SortOrder,
        projector: P,
        compare: C,
        page: Page,
    ) -> StoreResult<Vec<K>>
    where
        P: Fn(&K, &V) -> A,
        C: Fn(&A, &A) -> Ordering,
    {
        Ok(page.apply(self.keys_by_value(name, bucket, order, projector, compare)?))
    }

    /// One page of [`values_by_order`](Self::values_by_order).
    pub fn page_values_by_order<A, P, C>(
        &self,
        name: &str,
        bucket: &str,
        order: SortOrder,
        projector: P,
        compare: C,
        page: Page,
    ) -> StoreResult<Vec<&V>>
    where
        P: Fn(&K, &V) -> A,
        C: Fn(&A, &A) -> Ordering,
    {
        Ok(page.apply(self.values_by_order(name, bucket, order, projector, compare)?))
    }

    fn bucket_keys(&self, name: &str, bucket: &str) -> StoreResult<Vec<&K>> {
        Ok(self
            .index(name)?
            .bucket(bucket)
            .map(|keys| keys.iter().collect())
            .unwrap_or_default())
    }

    /// Resolve every key of a bucket to its record.
    fn bucket_entries(&self, name: &str, bucket: &str) -> StoreResult<Vec<(&K, &V)>> {
        self.bucket_keys(name, bucket)?
            .into_iter()
            .map(|key| self.records.get_key_value(key).ok_or(StoreError::NotFound))
            .collect()
    }

    fn sorted_entries<A, P, C>(
        &self,
        name: &str,
        bucket: &str,
        order: SortOrder,
        projector: P,
        compare: C,
    ) -> StoreResult<Vec<(&K, &V)>>
    where
        P: Fn(&K, &V) -> A,
        C: Fn(&A, &A) -> Ordering,
    {
        let entries = self.bucket_entries(name, bucket)?;
        Ok(order.apply(order::sort_by_projection(entries, projector, compare)))
    }
}
