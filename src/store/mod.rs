//! Record store subsystem for bucketdb
//!
//! A store holds an ordered key -> value map plus any number of named
//! secondary indexes. Each index classifies keys into labeled buckets.
//!
//! # Design Principles
//!
//! - Records are the source of truth; indexes are derived classification
//! - In-memory only: no persistence
//! - Deterministic: BTreeMap/BTreeSet iteration order everywhere
//!
//! # Invariants
//!
//! - A key occupies at most one bucket per index
//! - Every bucketed key exists in the records
//! - No bucket is ever empty
//! - A failed operation leaves the store unchanged

mod bucket;
mod config;
mod crud;
mod errors;
mod lifecycle;
mod order;
mod pairs;
mod query;
mod shared;
mod stats;
mod store;

pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use order::{sort_by_projection, Page, SortOrder};
pub use pairs::{NormalizedPairs, Pair};
pub use shared::SharedStore;
pub use stats::{IndexStats, StoreStats};
pub use store::Store;
