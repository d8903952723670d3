//! JSON file-based store.
//!
//! This module provides a simple, human-readable [`KeyValueStore`] implementation
//! using JSON serialization. It uses atomic file writes (write-to-temp + rename)
//! to prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads the entire file into memory once at open
//! - **Write**: O(n) - serializes and writes the entire key set
//! - **Best for**: a handful of keys holding collection-sized values

use crate::domain::error::{Result, ShelfmarkError};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// On-disk container format.
///
/// Wraps the key-value entries in a versioned object for future migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the storage format.
    version: u32,

    /// All stored key-value pairs.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// Keeps the full key set in memory and rewrites the file on every `set`. A
/// malformed existing file degrades to an empty store with a warning rather
/// than failing to open; losing the engine over a corrupt data file is worse
/// than starting fresh, and the next successful write replaces the file.
pub struct JsonFileStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded at open.
    data: StoreData,
}

impl JsonFileStore {
    /// Creates or opens a JSON file store.
    ///
    /// If the file exists and parses, loads the existing data. A missing file
    /// starts empty; an unreadable or unparseable file logs a warning and also
    /// starts empty. Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error only if parent directory creation fails.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = match std::fs::read_to_string(&file_path) {
            Ok(contents) => match serde_json::from_str::<StoreData>(&contents) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(path = ?file_path, error = %e, "store file is malformed, starting empty");
                    StoreData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no existing store file, starting empty");
                StoreData::default()
            }
            Err(e) => {
                tracing::warn!(path = ?file_path, error = %e, "store file unreadable, starting empty");
                StoreData::default()
            }
        };

        tracing::debug!(
            version = data.version,
            entry_count = data.entries.len(),
            "JSON store opened"
        );

        Ok(Self { file_path, data })
    }

    /// Saves the store to disk using an atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path,
    /// so the file is never left in a half-written state even if the process
    /// crashes mid-write.
    fn save_to_file(&self) -> Result<()> {
        tracing::debug!(path = ?self.file_path, "saving store data");

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ShelfmarkError::Storage(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!("store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key).entered();

        self.data.entries.insert(key.to_string(), value.to_string());
        self.save_to_file()?;

        tracing::debug!("key written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("shelfmark.json")).unwrap();

        store.set("favorites", "[]").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfmark.json");

        {
            let mut store = JsonFileStore::open(path.clone()).unwrap();
            store.set("theme", "dark").unwrap();
        }

        let store = JsonFileStore::open(path).unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn malformed_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfmark.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);

        // The next write replaces the corrupt file with valid data.
        store.set("favorites", "[]").unwrap();
        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(reopened.get("favorites").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("shelfmark.json");
        let mut store = JsonFileStore::open(path).unwrap();
        store.set("theme", "light").unwrap();
    }
}
