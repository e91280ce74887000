//! Property store abstraction for persistence.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde_json::Value;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for property store backends.
///
/// A property store holds loosely-typed trees under flat string keys. It has
/// no versioning and no transactions; the manager layer treats it as an
/// opaque blob store.
pub trait PropertyStore: Send + Sync {
    /// Read the tree stored under a key, or `None` if the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Store a tree under a key, replacing any previous value.
    fn set(&self, key: &str, tree: &Value) -> StorageResult<()>;

    /// Remove a key entirely. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
