//! Durable client-side key/value storage.
//!
//! Holds the language preference plus, for the admin area, the bearer token
//! and the serialized signed-in user.

use anyhow::{anyhow, Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::warn;

pub trait ClientStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub type SharedStorage = Arc<dyn ClientStorage>;

/// Storage that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStorage {
        Arc::new(Self::new())
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .map_err(|_| anyhow!("storage lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values
            .write()
            .map_err(|_| anyhow!("storage lock poisoned"))?
            .remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`. A missing file starts empty; an unreadable
    /// one is logged and replaced on the next write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .context(format!("Failed to read client storage at {:?}", path))?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring corrupt client storage at {:?}: {}", path, e);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, json)
            .context(format!("Failed to write client storage at {:?}", self.path))
    }
}

impl ClientStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("language"), None);

        storage.set("language", "en").unwrap();
        assert_eq!(storage.get("language").as_deref(), Some("en"));

        storage.remove("language").unwrap();
        assert_eq!(storage.get("language"), None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client").join("storage.json");

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set("language", "en").unwrap();
            storage.set("token", "abc").unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("language").as_deref(), Some("en"));
        assert_eq!(storage.get("token").as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_storage_remove_is_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("token", "abc").unwrap();
        storage.remove("token").unwrap();
        storage.remove("never-set").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("token"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("language"), None);

        storage.set("language", "tr").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"language\""));
    }
}
