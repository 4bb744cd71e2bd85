//! Index pair normalization
//!
//! Callers classify a key by passing `(index name, bucket label)` pairs.
//! Before anything is mutated the pairs are checked against the registered
//! indexes and folded into a canonical name -> label map.
//!
//! - Exact mode: every registered index named exactly once
//! - Subset mode: any registered indexes, each at most once

use std::collections::BTreeMap;

use super::errors::{StoreError, StoreResult};

/// An `(index name, bucket label)` association.
pub type Pair<'a> = (&'a str, &'a str);

/// Canonical index name -> bucket label mapping.
pub type NormalizedPairs = BTreeMap<String, String>;

/// Coverage required of a pair list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Every registered index must be named
    Exact,
    /// Any subset of registered indexes may be named
    Subset,
}

/// Validate `pairs` against the registered index names.
///
/// `is_registered` answers whether an index name exists; `registered_count`
/// is the number of registered indexes, used for exact coverage.
pub fn normalize<F>(
    pairs: &[Pair<'_>],
    is_registered: F,
    registered_count: usize,
    coverage: Coverage,
) -> StoreResult<NormalizedPairs>
where
    F: Fn(&str) -> bool,
{
    let mut normalized = NormalizedPairs::new();

    for (name, label) in pairs {
        if !is_registered(name) {
            return Err(StoreError::invalid_index(name));
        }
        if normalized.insert(name.to_string(), label.to_string()).is_some() {
            return Err(StoreError::IndexMismatch(format!(
                "index '{}' named more than once",
                name
            )));
        }
    }

    if coverage == Coverage::Exact && normalized.len() != registered_count {
        return Err(StoreError::IndexMismatch(format!(
            "expected {} index pairs, got {}",
            registered_count,
            normalized.len()
        )));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered(name: &str) -> bool {
        matches!(name, "status" | "category")
    }

    #[test]
    fn test_exact_full_coverage() {
        let pairs = [("status", "active"), ("category", "hardware")];
        let normalized = normalize(&pairs, registered, 2, Coverage::Exact).unwrap();

        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized["status"], "active");
        assert_eq!(normalized["category"], "hardware");
    }

    #[test]
    fn test_exact_partial_coverage_rejected() {
        let pairs = [("status", "active")];
        let err = normalize(&pairs, registered, 2, Coverage::Exact).unwrap_err();
        assert!(matches!(err, StoreError::IndexMismatch(_)));
    }

    #[test]
    fn test_unregistered_name_rejected() {
        let pairs = [("status", "active"), ("region", "eu")];
        let err = normalize(&pairs, registered, 2, Coverage::Subset).unwrap_err();
        assert_eq!(err, StoreError::InvalidIndex("region".into()));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let pairs = [("status", "active"), ("status", "inactive")];
        let err = normalize(&pairs, registered, 2, Coverage::Subset).unwrap_err();
        assert!(matches!(err, StoreError::IndexMismatch(_)));
    }

    #[test]
    fn test_subset_allows_partial() {
        let pairs = [("category", "services")];
        let normalized = normalize(&pairs, registered, 2, Coverage::Subset).unwrap();
        assert_eq!(normalized.len(), 1);
    }

    #[test]
    fn test_empty_accepted_without_indexes() {
        let normalized = normalize(&[], |_| false, 0, Coverage::Exact).unwrap();
        assert!(normalized.is_empty());
    }

    #[test]
    fn test_any_pair_rejected_without_indexes() {
        let err = normalize(&[("status", "x")], |_| false, 0, Coverage::Exact).unwrap_err();
        assert!(matches!(err, StoreError::InvalidIndex(_)));
    }
}
