//! Stored entries with an expiry date.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A value and the moment it stops being readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The stored value.
    pub value: Value,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

impl Entry {
    /// An entry living `ttl` from `now`.
    #[must_use]
    pub fn new(value: Value, now: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Self {
            value,
            expires_at: now + ttl,
        }
    }

    /// Whether the entry is still readable at `now`.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
