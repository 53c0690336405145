//! Subcommands and the state they share.

pub mod client;
pub mod config;
pub mod data;
pub mod order;
pub mod process;
pub mod types;

use std::path::{Path, PathBuf};

use tracing::debug;

use comex_core::models::config::ComexConfig;
use comex_core::{ClientStore, FileStorage, Persistence};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("comex")
        .join("config.json")
}

/// Default directory for client data.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("comex")
}

/// Configuration from an explicit path, the default path, or built-in
/// defaults with the platform data directory.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ComexConfig> {
    if let Some(path) = config_path {
        return Ok(ComexConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        return Ok(ComexConfig::from_file(&path)?);
    }

    let mut config = ComexConfig::default();
    config.storage.data_dir = default_data_dir();
    Ok(config)
}

/// Loaded configuration plus the client store mirrored to disk.
pub struct Context {
    pub config: ComexConfig,
    pub store: ClientStore,
    persistence: Persistence<FileStorage>,
}

impl Context {
    pub fn load(config_path: Option<&str>, data_dir: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = load_config(config_path)?;
        if let Some(dir) = data_dir {
            config.storage.data_dir = dir.to_path_buf();
        }
        debug!("Using data directory {}", config.storage.data_dir.display());

        let persistence = Persistence::new(
            FileStorage::new(&config.storage.data_dir),
            &config.storage,
        );
        let clients = persistence.load()?;
        let store = ClientStore::new(config.orders.clone()).with_clients(clients);

        Ok(Self {
            config,
            store,
            persistence,
        })
    }

    /// Write the store back to disk.
    pub fn save(&mut self) -> anyhow::Result<()> {
        self.persistence.save(&self.store)?;
        Ok(())
    }

    /// Remove every stored file and empty the store.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.persistence.clear()?;
        self.store.clear();
        Ok(())
    }
}
