//! Configuration structures for the ingestion pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the carshare pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarshareConfig {
    /// Record store configuration.
    pub store: StoreConfig,

    /// Batch ingestion configuration.
    pub ingest: IngestConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding the record collection.
    pub path: PathBuf,

    /// Guard each load-modify-store cycle with a lock file.
    pub use_lock: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("carsharing_data.json"),
            use_lock: true,
        }
    }
}

/// Batch ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// File extensions picked up when walking a directory.
    pub extensions: Vec<String>,

    /// Skip documents that fail to parse instead of aborting the batch.
    pub continue_on_error: bool,

    /// Replace stored records that share an invoice number.
    pub replace_existing: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["pdf".to_string(), "txt".to_string()],
            continue_on_error: true,
            replace_existing: false,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading vehicle tokens kept (manufacturer + model).
    pub vehicle_token_limit: usize,

    /// Flag trips whose invoice mentions the SHARE NOW Pass.
    pub detect_pass_discount: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vehicle_token_limit: 2,
            detect_pass_discount: true,
        }
    }
}

impl CarshareConfig {
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

    /// Whether a file with this extension should be ingested.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.ingest
            .extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}
