//! Persisted "is authenticated" flag.

use std::sync::Arc;

use chrono::TimeDelta;
use serde_json::Value;
use tracing::warn;

use crate::ports::{KeyValueStorage, StorageError};

/// Storage key of the session flag.
pub const SESSION_KEY: &str = "auth_user";

/// How long a session flag lives.
pub const SESSION_TTL_DAYS: i64 = 10;

/// Persists whether a user is signed in, and nothing else.
///
/// The flag only tells startup code whether a silent re-authentication is
/// worth trying. Identity and profile data never go through here.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    ttl: TimeDelta,
}

impl SessionStore {
    /// Creates a session store with the default lifetime.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_ttl(storage, TimeDelta::days(SESSION_TTL_DAYS))
    }

    /// Creates a session store with a custom lifetime.
    #[must_use]
    pub fn with_ttl(storage: Arc<dyn KeyValueStorage>, ttl: TimeDelta) -> Self {
        Self { storage, ttl }
    }

    /// Stores the flag when `authenticated`, removes it otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub fn set(&self, authenticated: bool) -> Result<(), StorageError> {
        if authenticated {
            self.storage
                .set_data(SESSION_KEY, Value::Bool(true), self.ttl)
        } else {
            self.clear()
        }
    }

    /// Removes the flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(SESSION_KEY)
    }

    /// Whether a live session flag exists.
    ///
    /// Never-set, expired and unreadable flags are all `false`.
    #[must_use]
    pub fn get(&self) -> bool {
        match self.storage.get_data(SESSION_KEY) {
            Ok(value) => value.and_then(|v| v.as_bool()).unwrap_or(false),
            Err(err) => {
                warn!(error = %err, "session flag unreadable");
                false
            }
        }
    }
}
