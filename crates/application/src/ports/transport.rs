//! Backend transport ports.
//!
//! The search cluster and the ERP are reached through these traits. The
//! core never builds HTTP requests itself.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

/// Error raised by a backend transport.
///
/// For HTTP failures `data` holds the decoded error body, which has the
/// same shape as a successful body. Failure extraction runs on it the same
/// way it runs on successes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Status text or error message.
        message: String,
        /// Decoded error body, if it was JSON.
        data: Option<Value>,
    },

    /// No usable response was received.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error body, if one was received and decoded.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        match self {
            Self::Status { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. } => message,
            Self::Connection(message) | Self::InvalidResponse(message) => message,
        }
    }
}

/// Port for the search cluster.
pub trait SearchTransport: Send + Sync {
    /// POSTs a JSON body to `url` and returns the decoded JSON answer.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for network failures and non-2xx
    /// statuses.
    fn post_json(
        &self,
        url: &str,
        body: &Value,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// Port for the ERP backend.
///
/// Paths are relative to the ERP API root, e.g. `auth/login`.
#[async_trait]
pub trait ErpTransport: Send + Sync {
    /// POSTs a JSON payload.
    async fn post(&self, path: &str, payload: &Value) -> Result<Value, TransportError>;

    /// GETs a resource.
    async fn get(&self, path: &str) -> Result<Value, TransportError>;
}
