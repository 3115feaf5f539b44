//! CLI subcommands.

pub mod config;
pub mod delete;
pub mod ingest;
pub mod list;
pub mod process;
pub mod summary;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use carshare_core::models::config::CarshareConfig;
use carshare_core::pdf::PdfExtractor;
use carshare_core::store::{FileBackend, RecordStore};

/// Load the configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CarshareConfig> {
    if let Some(path) = config_path {
        return Ok(CarshareConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(CarshareConfig::from_file(&default_path)?)
    } else {
        Ok(CarshareConfig::default())
    }
}

/// Open the record store, with `--store` taking precedence over the config.
pub fn open_store(
    config: &CarshareConfig,
    store_override: Option<&Path>,
) -> RecordStore<FileBackend> {
    let path: PathBuf = store_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.store.path.clone());

    debug!("Using record store {}", path.display());
    RecordStore::new(FileBackend::new(path).with_locking(config.store.use_lock))
}

/// Read the text of one invoice document.
///
/// PDFs go through text extraction; anything else is read as UTF-8 text.
pub fn read_invoice_text(path: &Path) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            PdfExtractor::text_from_bytes(&data)?
        }
        _ => fs::read_to_string(path)?,
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text extracted from {}", path.display());
    }

    Ok(text)
}
