//! Shared reqwest plumbing for the backend transports.

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use storefront_application::TransportError;

/// User agent sent to both backends.
const USER_AGENT: &str = concat!("storefront/", env!("CARGO_PKG_VERSION"));

/// Builds the reqwest client used by a transport.
///
/// # Errors
///
/// Returns an error if the client cannot be created.
pub fn build_client(timeout: Duration) -> Result<Client, TransportError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| TransportError::Connection(e.to_string()))
}

/// Maps reqwest errors to [`TransportError`].
pub fn map_error(error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        return TransportError::Connection(format!("request timed out: {error}"));
    }
    if error.is_decode() {
        return TransportError::InvalidResponse(error.to_string());
    }
    if let Some(status) = error.status() {
        return TransportError::Status {
            status: status.as_u16(),
            message: error.to_string(),
            data: None,
        };
    }
    TransportError::Connection(error.to_string())
}

/// Reads a response into JSON, turning non-2xx statuses into errors that
/// carry the decoded body.
///
/// # Errors
///
/// Returns [`TransportError::Status`] for non-2xx answers and
/// [`TransportError::InvalidResponse`] for undecodable 2xx bodies.
pub async fn read_json(response: Response) -> Result<Value, TransportError> {
    let status = response.status();
    let body = response.bytes().await.map_err(|e| map_error(&e))?;
    decode_body(
        status.as_u16(),
        status.canonical_reason().unwrap_or("request failed"),
        &body,
    )
}

/// Decodes a response body for `status`.
///
/// An empty 2xx body is JSON `null`. Error bodies that are not JSON are
/// dropped; the status and reason are kept.
///
/// # Errors
///
/// See [`read_json`].
pub fn decode_body(status: u16, reason: &str, body: &[u8]) -> Result<Value, TransportError> {
    if (200..300).contains(&status) {
        if body.is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_slice(body)
            .map_err(|e| TransportError::InvalidResponse(format!("invalid JSON body: {e}")));
    }
    Err(TransportError::Status {
        status,
        message: reason.to_string(),
        data: serde_json::from_slice(body).ok(),
    })
}
