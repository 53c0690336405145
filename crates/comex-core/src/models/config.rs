//! Configuration structures for the document pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for comex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComexConfig {
    /// Where clients and orders are persisted.
    pub storage: StorageConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Document assembly configuration.
    pub assembly: AssemblyConfig,

    /// Order numbering.
    pub orders: OrderConfig,
}

/// Persistence configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the storage files.
    pub data_dir: PathBuf,

    /// Key (file stem) of the clients document.
    pub clients_key: String,

    /// Reserved key for a separate orders document. Only cleared, never written.
    pub orders_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            clients_key: "facturapro_comex_clients".to_string(),
            orders_key: "facturapro_comex_orders".to_string(),
        }
    }
}

/// Which rule set reads PDF text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionProfile {
    /// Generic labeled-field rules.
    #[default]
    Generic,
    /// Labeled-block shipping layout (CUSTOMER, TERMS OF DELIVERY, BL#, ...).
    Shipping,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Skip failing files instead of aborting the whole batch.
    pub isolate_failures: bool,

    /// Rule set used for PDF text.
    pub profile: ExtractionProfile,
}

/// Source of the confidence shown on generated documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceMode {
    /// Random display value in `[display_min, display_max)`.
    #[default]
    Display,
    /// The scorer's batch confidence.
    Scored,
}

/// Document assembly configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    pub confidence_mode: ConfidenceMode,

    /// Lower bound (inclusive) of the display confidence.
    pub display_min: f64,

    /// Upper bound (exclusive) of the display confidence.
    pub display_max: f64,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            confidence_mode: ConfidenceMode::Display,
            display_min: 85.0,
            display_max: 95.0,
        }
    }
}

/// Order numbering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Prefix of order numbers.
    pub prefix: String,

    /// Zero-padded width of the per-client sequence.
    pub sequence_width: usize,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            prefix: "ORD".to_string(),
            sequence_width: 3,
        }
    }
}

impl ComexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Path of the clients document.
    pub fn clients_path(&self) -> PathBuf {
        self.storage
            .data_dir
            .join(format!("{}.json", self.storage.clients_key))
    }

    /// Path of the reserved orders document.
    pub fn orders_path(&self) -> PathBuf {
        self.storage
            .data_dir
            .join(format!("{}.json", self.storage.orders_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ComexConfig =
            serde_json::from_str(r#"{"extraction": {"isolate_failures": true}}"#).unwrap();
        assert!(config.extraction.isolate_failures);
        assert_eq!(config.extraction.profile, ExtractionProfile::Generic);
        assert_eq!(config.assembly.display_min, 85.0);
        assert_eq!(config.orders.prefix, "ORD");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ComexConfig::default();
        config.assembly.confidence_mode = ConfidenceMode::Scored;
        config.save(&path).unwrap();

        let loaded = ComexConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_storage_paths() {
        let mut config = ComexConfig::default();
        config.storage.data_dir = PathBuf::from("/tmp/comex");
        assert_eq!(
            config.clients_path(),
            PathBuf::from("/tmp/comex/facturapro_comex_clients.json")
        );
        assert_eq!(
            config.orders_path(),
            PathBuf::from("/tmp/comex/facturapro_comex_orders.json")
        );
    }
}
