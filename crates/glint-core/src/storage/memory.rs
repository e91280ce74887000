//! In-memory property store implementation.

use super::{PropertyStore, StorageError, StorageResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory property store for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PropertyStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, tree: &Value) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        entries.insert(key.to_string(), tree.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}
