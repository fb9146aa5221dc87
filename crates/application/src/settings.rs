//! Shop settings fetched from the ERP.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::ports::{ErpTransport, TransportError};

/// ERP path for shop settings.
pub const SETTINGS_PATH: &str = "settings";

/// Holds the shop settings once they are loaded.
///
/// Settings depend on the customer, so they are fetched after a user has
/// been loaded rather than at startup.
pub struct SettingsService {
    erp: Arc<dyn ErpTransport>,
    options: RwLock<Option<Value>>,
}

impl SettingsService {
    /// Creates an empty settings service.
    #[must_use]
    pub fn new(erp: Arc<dyn ErpTransport>) -> Self {
        Self {
            erp,
            options: RwLock::new(None),
        }
    }

    /// Fetches the settings and keeps them.
    ///
    /// # Errors
    ///
    /// Returns the transport error; previously loaded settings are kept.
    pub async fn init(&self) -> Result<Value, TransportError> {
        let options = self.erp.get(SETTINGS_PATH).await?;
        *self.options.write().await = Some(options.clone());
        info!("settings loaded");
        Ok(options)
    }

    /// The loaded settings, if any.
    pub async fn options(&self) -> Option<Value> {
        self.options.read().await.clone()
    }
}
