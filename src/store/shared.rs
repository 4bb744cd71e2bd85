//! Thread-safe store handle
//!
//! The record map and every index must change together, so the whole store
//! sits behind one lock. Finer-grained locking would let a reader observe a
//! record whose buckets are only half updated.

use std::sync::{Arc, RwLock};

use super::config::StoreConfig;
use super::store::Store;

/// Cloneable handle to a store guarded by a single `RwLock`.
#[derive(Debug)]
pub struct SharedStore<K, V> {
    inner: Arc<RwLock<Store<K, V>>>,
}

impl<K, V> Clone for SharedStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Ord + Clone, V> SharedStore<K, V> {
    pub fn new(store: Store<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(Store::empty(name))
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self::new(Store::with_config(config))
    }

    /// Run `f` with shared access to the store.
    ///
    /// # Panics
    ///
    /// Panics if a writer panicked while holding the lock. A closure passed
    /// to [`write`](Self::write) may chain several operations, so the store
    /// behind a poisoned lock is never handed out.
    pub fn read<R>(&self, f: impl FnOnce(&Store<K, V>) -> R) -> R {
        let guard = self.inner.read().expect("store lock poisoned");
        f(&*guard)
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// # Panics
    ///
    /// Panics if a previous writer panicked while holding the lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Store<K, V>) -> R) -> R {
        let mut guard = self.inner.write().expect("store lock poisoned");
        f(&mut *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::thread;

    #[test]
    fn test_concurrent_writers() {
        let shared: SharedStore<u32, u32> = SharedStore::empty("counters");
        shared.write(|store| store.register_index("parity")).unwrap();

        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25u32 {
                        let key = t * 100 + i;
                        let parity = if key % 2 == 0 { "even" } else { "odd" };
                        shared
                            .write(|store| store.add(key, i, Some(&[("parity", parity)])))
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.read(|store| store.len()), 100);
        let even = shared.read(|store| store.count_by("parity", "even")).unwrap();
        let odd = shared.read(|store| store.count_by("parity", "odd")).unwrap();
        assert_eq!(even + odd, 100);
        shared
            .read(|store| {
                // t * 100 is even, so every value shares its key's parity
                store.verify_index("parity", |v: &u32| if v % 2 == 0 { "even" } else { "odd" })
            })
            .unwrap();
    }

    #[test]
    fn test_panicking_writer_poisons_store() {
        let shared: SharedStore<u32, u32> = SharedStore::empty("counters");
        shared.write(|store| store.register_index("parity")).unwrap();
        for v in 1..=4u32 {
            let parity = if v % 2 == 0 { "even" } else { "odd" };
            shared
                .write(|store| store.add(v, v, Some(&[("parity", parity)])))
                .unwrap();
        }

        let writer = shared.clone();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            writer.write(|store| {
                store.remove(&1).unwrap();
                panic!("caller failed mid-sequence");
            })
        }));
        assert!(result.is_err());

        let reader = shared.clone();
        let read = panic::catch_unwind(AssertUnwindSafe(|| reader.read(|store| store.len())));
        assert!(read.is_err());
    }
}
