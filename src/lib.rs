//! bucketdb - an in-memory record store with bucketed secondary indexes
//!
//! ```
//! use bucketdb::store::{Page, Store};
//!
//! let mut store: Store<&str, u32> = Store::empty("accounts");
//! store.register_index("status").unwrap();
//! store.add("acct-1", 10, Some(&[("status", "active")])).unwrap();
//! store.add("acct-3", 30, Some(&[("status", "active")])).unwrap();
//!
//! assert_eq!(store.keys_by("status", "active").unwrap(), vec!["acct-1", "acct-3"]);
//! assert_eq!(store.page_keys_by("status", "active", Page::new(1, 1)).unwrap(), vec!["acct-3"]);
//! ```

pub mod store;

pub use store::{SharedStore, SortOrder, Store, StoreConfig, StoreError, StoreResult};
