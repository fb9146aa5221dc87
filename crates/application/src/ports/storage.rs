//! Persistent key-value storage port.

use chrono::TimeDelta;
use serde_json::Value;

/// Errors raised by key-value storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Key-value storage that survives process restarts and expires entries.
///
/// Access is synchronous: the store is local and has a single owner.
pub trait KeyValueStorage: Send + Sync {
    /// Stores `value` under `key` for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn set_data(&self, key: &str, value: Value, ttl: TimeDelta) -> Result<(), StorageError>;

    /// Reads the value under `key`. Expired entries read as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_data(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Removes the entry under `key`. Removing a missing key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
