//! Store configuration
//!
//! Configuration is fixed at construction time. It can be built in code or
//! loaded from a JSON document:
//!
//! ```json
//! { "name": "accounts", "verify_after_rebuild": true }
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for a [`Store`](super::Store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Label of the store, used in logs and stats.
    pub name: String,
    /// Whether `rebuild_index` verifies the rebuilt index before returning.
    pub verify_after_rebuild: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            verify_after_rebuild: false,
        }
    }
}

impl StoreConfig {
    /// Create a default config with the given store name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Enable verification after every rebuild.
    pub fn with_verify_after_rebuild(mut self, enabled: bool) -> Self {
        self.verify_after_rebuild = enabled;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = StoreConfig::default();
        assert_eq!(config.name, "store");
        assert!(!config.verify_after_rebuild);
    }

    #[test]
    fn test_named_with_verify() {
        let config = StoreConfig::named("accounts").with_verify_after_rebuild(true);
        assert_eq!(config.name, "accounts");
        assert!(config.verify_after_rebuild);
    }

    #[test]
    fn test_from_json() {
        let config =
            StoreConfig::from_json(r#"{"name":"accounts","verify_after_rebuild":true}"#).unwrap();
        assert_eq!(config, StoreConfig::named("accounts").with_verify_after_rebuild(true));
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = StoreConfig::from_json(r#"{"name":"ledger"}"#).unwrap();
        assert_eq!(config.name, "ledger");
        assert!(!config.verify_after_rebuild);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(StoreConfig::from_json("not json").is_err());
    }
}
