//! Store statistics
//!
//! Read-only counts for observability. Collecting stats never mutates the
//! store.

use serde::Serialize;

/// Snapshot of record and index sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub name: String,
    pub record_count: usize,
    /// One entry per registered index, in name order.
    pub indexes: Vec<IndexStats>,
}

/// Sizes of one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub name: String,
    /// Number of non-empty buckets
    pub bucket_count: usize,
    /// Number of bucketed keys across all buckets
    pub key_count: usize,
}

impl StoreStats {
    /// Render as a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_json() {
        let stats = StoreStats {
            name: "accounts".to_string(),
            record_count: 3,
            indexes: vec![IndexStats {
                name: "status".to_string(),
                bucket_count: 2,
                key_count: 3,
            }],
        };

        let json = stats.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"name":"accounts","record_count":3,"indexes":[{"name":"status","bucket_count":2,"key_count":3}]}"#
        );
    }
}
