//! File-based property store implementation.

use super::{PropertyStore, StorageError, StorageResult};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// File-based property store.
///
/// Stores each key as a JSON file in a base directory.
pub struct FileStore {
    /// Base directory for property storage.
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new file store with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create a file store in the default location.
    ///
    /// On Unix: `~/.local/share/glint/properties/`
    /// On Windows: `%LOCALAPPDATA%\glint\properties\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        let path = base.join("glint").join("properties");
        Self::new(path)
    }

    /// Get the file path for a key.
    fn key_path(&self, key: &str) -> PathBuf {
        // Sanitize key to be safe for filenames
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl PropertyStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let tree = serde_json::from_str(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Some(tree))
    }

    fn set(&self, key: &str, tree: &Value) -> StorageResult<()> {
        let path = self.key_path(key);
        let json = serde_json::to_string_pretty(tree)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }
}
