//! JSON file persistence for the favorites collections
//!
//! The whole store lives in a single JSON object (`key -> raw text`). Every
//! batch rewrites that file through a sibling temp file and a rename, so a
//! crash mid-write leaves the previous contents intact and both favorites
//! keys always change together.

use crate::modules::favorites::domain::KeyValueStore;
use crate::shared::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Default file name inside the data directory
pub const FAVORITES_FILE_NAME: &str = "favorites.json";

pub struct JsonFileKeyValueStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileKeyValueStore {
    /// Open (or lazily create) the store at `path`
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// also treated as empty and gets replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);

        tracing::debug!(
            "Favorites store opened at {} ({} keys)",
            path.display(),
            entries.len()
        );

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Store at `<data_dir>/favorites.json`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::open(data_dir.as_ref().join(FAVORITES_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Cannot read {}: {}. Starting empty.", path.display(), e);
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!("Corrupt store file {}: {}. Starting empty.", path.display(), e);
            BTreeMap::new()
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let serialized = serde_json::to_string_pretty(entries)?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, serialized)?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AppError::StorageError(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Apply `change` to a copy, persist it, then publish it in memory
    fn commit<F>(&self, change: F) -> AppResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        change(&mut next);

        if next == *entries {
            return Ok(());
        }

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, batch: &[(&str, String)]) -> AppResult<()> {
        self.commit(|entries| {
            for (key, value) in batch {
                entries.insert((*key).to_string(), value.clone());
            }
        })
    }

    fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        self.commit(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}
