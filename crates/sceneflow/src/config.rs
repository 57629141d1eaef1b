//! Adapter configuration.
//!
//! [`AdapterConfig`] carries the tunables of a [`ScreenplayAdapter`]. It can
//! be built in code, deserialized from JSON, or assembled through
//! [`ScreenplayAdapterBuilder`].
//!
//! ```
//! use sceneflow::AdapterConfig;
//!
//! let config = AdapterConfig::from_json(r#"{ "copy_master_metadata": false }"#).unwrap();
//! assert!(!config.copy_master_metadata);
//! assert_eq!(config.reclaim_batch_size, sceneflow::DEFAULT_BATCH_SIZE);
//! ```
//!
//! [`ScreenplayAdapter`]: crate::model::ScreenplayAdapter
//! [`ScreenplayAdapterBuilder`]: crate::model::ScreenplayAdapterBuilder

use serde::{Deserialize, Serialize};

use sceneflow_core::DEFAULT_BATCH_SIZE;

use crate::error::Result;

/// Configuration for creating a screenplay adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Copy title, subtitle, author and version from the designated master
    /// screenplay into collections synthesized for a bare scene.
    pub copy_master_metadata: bool,
    /// Batch size of the reclamation queue the builder creates when none is
    /// supplied. An adapter drains at most this many superseded screenplays
    /// from its own queue when a `set_source` turn ends.
    pub reclaim_batch_size: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            copy_master_metadata: true,
            reclaim_batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl AdapterConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();
        assert!(config.copy_master_metadata);
        assert_eq!(config.reclaim_batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = AdapterConfig::from_json(r#"{ "reclaim_batch_size": 3 }"#).unwrap();
        assert!(config.copy_master_metadata);
        assert_eq!(config.reclaim_batch_size, 3);

        let empty = AdapterConfig::from_json("{}").unwrap();
        assert_eq!(empty, AdapterConfig::default());
    }

    #[test]
    fn test_json_round_trip_preserves_overrides() {
        let config = AdapterConfig {
            copy_master_metadata: false,
            reclaim_batch_size: 1,
        };
        let json = config.to_json().unwrap();
        assert_eq!(AdapterConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = AdapterConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
