//! Store error types
//!
//! Error codes:
//! - STORE_KEY_EXISTS
//! - STORE_INDEX_MISMATCH
//! - STORE_INVALID_INDEX
//! - STORE_NOT_FOUND
//! - STORE_INDEX_EXISTS
//! - STORE_INCONSISTENT

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
///
/// Every failing operation leaves the store exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Key already exists")]
    KeyExists,

    #[error("Index pairs do not match registered indexes: {0}")]
    IndexMismatch(String),

    #[error("Index not registered: {0}")]
    InvalidIndex(String),

    #[error("Key not found")]
    NotFound,

    #[error("Index already registered: {0}")]
    IndexExists(String),

    #[error("Index inconsistent: {0} mismatched keys")]
    Inconsistent(usize),
}

impl StoreError {
    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::KeyExists => "STORE_KEY_EXISTS",
            StoreError::IndexMismatch(_) => "STORE_INDEX_MISMATCH",
            StoreError::InvalidIndex(_) => "STORE_INVALID_INDEX",
            StoreError::NotFound => "STORE_NOT_FOUND",
            StoreError::IndexExists(_) => "STORE_INDEX_EXISTS",
            StoreError::Inconsistent(_) => "STORE_INCONSISTENT",
        }
    }

    /// Returns whether this error reports index/record desynchronization
    /// found by verification.
    pub fn is_consistency_failure(&self) -> bool {
        matches!(self, StoreError::Inconsistent(_))
    }

    pub(crate) fn invalid_index(name: &str) -> Self {
        StoreError::InvalidIndex(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StoreError::KeyExists.code(), "STORE_KEY_EXISTS");
        assert_eq!(StoreError::NotFound.code(), "STORE_NOT_FOUND");
        assert_eq!(StoreError::Inconsistent(3).code(), "STORE_INCONSISTENT");
        assert_eq!(
            StoreError::invalid_index("status").code(),
            "STORE_INVALID_INDEX"
        );
    }

    #[test]
    fn test_only_inconsistent_is_consistency_failure() {
        assert!(StoreError::Inconsistent(1).is_consistency_failure());
        assert!(!StoreError::NotFound.is_consistency_failure());
        assert!(!StoreError::IndexExists("a".into()).is_consistency_failure());
    }

    #[test]
    fn test_error_display() {
        let display = format!("{}", StoreError::Inconsistent(2));
        assert!(display.contains("2 mismatched keys"));

        let display = format!("{}", StoreError::invalid_index("category"));
        assert!(display.contains("category"));
    }
}
