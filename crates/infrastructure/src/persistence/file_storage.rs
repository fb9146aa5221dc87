//! File-backed key-value storage.
//!
//! All entries live in one JSON document:
//! ```json
//! {
//!   "auth_user": { "value": true, "expires_at": "2026-10-29T12:00:00Z" }
//! }
//! ```
//! Expired entries are dropped the next time the file is written. Writes
//! go through a temporary file renamed over the old one; a file that no
//! longer parses is replaced on the next write.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::TimeDelta;
use serde_json::Value;
use storefront_application::{Clock, KeyValueStorage, StorageError};
use tempfile::NamedTempFile;
use tracing::warn;

use super::entry::Entry;

type Entries = BTreeMap<String, Entry>;

/// Key-value storage persisted to a JSON file.
#[derive(Debug)]
pub struct FileKeyValueStorage<C> {
    path: PathBuf,
    clock: C,
    // Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl<C: Clock> FileKeyValueStorage<C> {
    /// Creates a storage backed by `path`. The file is created on first
    /// write.
    pub fn new(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
            lock: Mutex::new(()),
        }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };
        if bytes.is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn save(&self, entries: &Entries) -> Result<(), StorageError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let mut json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        json.push('\n');

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }

    fn update(&self, change: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StorageError::Serialization(err)) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unreadable storage file replaced"
                );
                Entries::new()
            }
            Err(err) => return Err(err),
        };
        entries.retain(|_, entry| entry.is_live(now));
        change(&mut entries);
        self.save(&entries)
    }
}

impl<C: Clock> KeyValueStorage for FileKeyValueStorage<C> {
    fn set_data(&self, key: &str, value: Value, ttl: TimeDelta) -> Result<(), StorageError> {
        let entry = Entry::new(value, self.clock.now(), ttl);
        self.update(|entries| {
            entries.insert(key.to_string(), entry);
        })
    }

    fn get_data(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();
        Ok(self
            .load()?
            .remove(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
