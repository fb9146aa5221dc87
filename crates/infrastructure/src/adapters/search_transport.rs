//! Search cluster transport using reqwest.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use storefront_application::{SearchTransport, TransportError};

use super::http::{build_client, map_error, read_json};

/// POSTs search bodies to the cluster.
///
/// Cloning is cheap; clones share the connection pool, so one transport
/// can back every search client.
#[derive(Debug, Clone)]
pub struct ReqwestSearchTransport {
    client: Client,
}

impl ReqwestSearchTransport {
    /// Creates a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    /// Creates a transport with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl SearchTransport for ReqwestSearchTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| map_error(&e))?;
        read_json(response).await
    }
}
