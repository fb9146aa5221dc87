//! In-process key-value storage.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::TimeDelta;
use serde_json::Value;
use storefront_application::{Clock, KeyValueStorage, StorageError};

use super::entry::Entry;

/// Key-value storage that lives as long as the process.
///
/// Used when no session file is configured; sessions then end with the
/// process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStorage<C> {
    clock: C,
    entries: Mutex<HashMap<String, Entry>>,
}

impl<C: Clock> MemoryKeyValueStorage<C> {
    /// Creates an empty storage.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<C: Clock> KeyValueStorage for MemoryKeyValueStorage<C> {
    fn set_data(&self, key: &str, value: Value, ttl: TimeDelta) -> Result<(), StorageError> {
        let entry = Entry::new(value, self.clock.now(), ttl);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
        Ok(())
    }

    fn get_data(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::adapters::SystemClock;
    use serde_json::json;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryKeyValueStorage::new(SystemClock);
        storage
            .set_data("k", json!({"a": 1}), TimeDelta::minutes(5))
            .unwrap();
        assert_eq!(storage.get_data("k").unwrap(), Some(json!({"a": 1})));

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_data("k").unwrap(), None);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let storage = MemoryKeyValueStorage::new(SystemClock);
        storage.set_data("k", json!(true), TimeDelta::zero()).unwrap();
        assert_eq!(storage.get_data("k").unwrap(), None);
    }

    #[test]
    fn test_removing_missing_key_is_ok() {
        let storage = MemoryKeyValueStorage::new(SystemClock);
        assert!(storage.remove_item("missing").is_ok());
    }
}
