//! ERP transport using reqwest.
//!
//! Frontend calls to the ERP go through a `/shopinvader` proxy path. The
//! transport strips that prefix, targets the configured ERP URL and adds
//! the ERP credentials, so callers may pass either proxied or bare paths.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use storefront_application::{ErpTransport, TransportError};

use super::http::{build_client, map_error, read_json};
use crate::configuration::ErpConfig;

/// Path prefix of ERP requests coming from the frontend.
pub const PROXY_PREFIX: &str = "/shopinvader";

/// Where a frontend ERP path is sent.
///
/// `base_url` is the ERP API root; `request_path` may carry the proxy
/// prefix.
#[must_use]
pub fn proxy_target(base_url: &str, request_path: &str) -> String {
    let path = request_path
        .strip_prefix(PROXY_PREFIX)
        .unwrap_or(request_path)
        .trim_start_matches('/');
    format!("{}/{path}", base_url.trim_end_matches('/'))
}

/// JSON calls to the ERP API.
#[derive(Debug, Clone)]
pub struct ReqwestErpTransport {
    client: Client,
    base_url: String,
    auth: Option<String>,
}

impl ReqwestErpTransport {
    /// Creates a transport from the ERP configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(config: &ErpConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(Duration::from_millis(config.timeout_ms))?,
            base_url: config.url.clone(),
            auth: config.auth.clone(),
        })
    }

    /// The URL a path is sent to.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        proxy_target(&self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(auth) => builder.header(AUTHORIZATION, auth),
            None => builder,
        }
    }
}

#[async_trait]
impl ErpTransport for ReqwestErpTransport {
    async fn post(&self, path: &str, payload: &Value) -> Result<Value, TransportError> {
        let request = self.authorize(self.client.post(self.url_for(path)).json(payload));
        let response = request.send().await.map_err(|e| map_error(&e))?;
        read_json(response).await
    }

    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        let request = self.authorize(self.client.get(self.url_for(path)));
        let response = request.send().await.map_err(|e| map_error(&e))?;
        read_json(response).await
    }
}
