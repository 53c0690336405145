//! Persistence of the client list under string keys, and the export format.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::ClientStore;
use crate::error::{Result, StoreError};
use crate::models::client::Client;
use crate::models::config::StorageConfig;

/// Version tag written into every export.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Key/value storage holding JSON documents.
pub trait StorageBackend {
    /// Stored value for `key`, `None` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Mirrors a [`ClientStore`] to a storage backend.
///
/// All clients, with their nested orders, live in one JSON document under the
/// clients key. The orders key is reserved and only ever removed.
pub struct Persistence<B: StorageBackend> {
    backend: B,
    clients_key: String,
    orders_key: String,
}

impl<B: StorageBackend> Persistence<B> {
    pub fn new(backend: B, config: &StorageConfig) -> Self {
        Self {
            backend,
            clients_key: config.clients_key.clone(),
            orders_key: config.orders_key.clone(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the stored clients.
    ///
    /// Nothing stored, or a document that does not parse, yields an empty
    /// list. An unreadable document is left in place until the next save.
    pub fn load(&self) -> Result<Vec<Client>> {
        let Some(content) = self.backend.read(&self.clients_key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Client>>(&content) {
            Ok(clients) => {
                debug!("Loaded {} clients", clients.len());
                Ok(clients)
            }
            Err(e) => {
                warn!("Ignoring unreadable clients document {}: {}", self.clients_key, e);
                Ok(Vec::new())
            }
        }
    }

    pub fn save(&mut self, store: &ClientStore) -> Result<()> {
        let content = serde_json::to_string(store.clients())?;
        self.backend.write(&self.clients_key, &content)?;
        debug!("Saved {} clients ({} bytes)", store.clients().len(), content.len());
        Ok(())
    }

    /// Remove both storage keys.
    pub fn clear(&mut self) -> Result<()> {
        warn!("Clearing all stored data");
        self.backend.remove(&self.clients_key)?;
        self.backend.remove(&self.orders_key)?;
        Ok(())
    }
}

/// Shape of an export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub clients: Vec<Client>,
}

impl ClientStore {
    /// Serialize every client as a pretty-printed export document.
    pub fn export_data(&self) -> Result<String> {
        let document = ExportDocument {
            version: EXPORT_VERSION.to_string(),
            export_date: Utc::now(),
            clients: self.clients.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Replace every client with those of an export document.
    ///
    /// Only the presence of a `clients` array is checked; the version tag is
    /// ignored. Nothing changes when the document is rejected.
    pub fn import_data(&mut self, json: &str) -> std::result::Result<usize, StoreError> {
        let mut value: Value =
            serde_json::from_str(json).map_err(|e| StoreError::InvalidImport(e.to_string()))?;

        let clients = match value.get_mut("clients") {
            Some(clients) if clients.is_array() => clients.take(),
            Some(_) => return Err(StoreError::InvalidImport("clients is not an array".to_string())),
            None => return Err(StoreError::InvalidImport("missing clients".to_string())),
        };
        let clients: Vec<Client> =
            serde_json::from_value(clients).map_err(|e| StoreError::InvalidImport(e.to_string()))?;

        let count = clients.len();
        self.clients = clients;
        Ok(count)
    }
}
