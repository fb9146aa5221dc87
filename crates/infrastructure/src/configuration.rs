//! Runtime configuration.
//!
//! Values come from an optional TOML file, overridden by `STOREFRONT__*`
//! environment variables (`STOREFRONT__SEARCH__BASE_URL`, ...). Index
//! lists in the environment are comma separated.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use storefront_domain::{DomainError, IndexSet, Locale};
use tracing::warn;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "STOREFRONT";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized.
    #[error("config load error: {0}")]
    Load(#[from] config::ConfigError),

    /// A required section is absent.
    #[error("missing configuration: {0}")]
    Missing(&'static str),

    /// A value was read but is not usable.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

/// Search cluster settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Cluster base URL.
    pub base_url: String,
    /// Logical product indexes.
    pub products: Vec<String>,
    /// Logical category indexes.
    pub categories: Vec<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl SearchConfig {
    /// Product and category indexes together, products first.
    ///
    /// # Errors
    ///
    /// Returns an error if no index is configured.
    pub fn catalog_indexes(&self) -> Result<IndexSet, ConfigError> {
        let names = self.products.iter().chain(&self.categories).cloned();
        Ok(IndexSet::new(names)?)
    }

    /// Product indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if no product index is configured.
    pub fn product_indexes(&self) -> Result<IndexSet, ConfigError> {
        Ok(IndexSet::new(self.products.clone())?)
    }

    /// Category indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if no category index is configured.
    pub fn category_indexes(&self) -> Result<IndexSet, ConfigError> {
        Ok(IndexSet::new(self.categories.clone())?)
    }
}

/// ERP settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErpConfig {
    /// ERP API root.
    pub url: String,
    /// `Authorization` header value sent with every call.
    #[serde(default)]
    pub auth: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Session persistence settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// File holding the session flag. Kept in memory when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Complete storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorefrontConfig {
    /// Locale code the indexes start under.
    pub locale: String,
    /// Search cluster settings.
    pub search: SearchConfig,
    /// ERP settings; auth and settings are disabled without them.
    #[serde(default)]
    pub erp: Option<ErpConfig>,
    /// Session persistence settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl StorefrontConfig {
    /// Loads configuration from `path` (if given) and the environment.
    ///
    /// A missing file is not an error; the environment may carry
    /// everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the sources cannot be merged into a complete
    /// configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                warn!(
                    path = %path.display(),
                    "config file not found; using environment only"
                );
            }
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("search.products")
                .with_list_parse_key("search.categories"),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// The starting locale.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is blank.
    pub fn locale(&self) -> Result<Locale, ConfigError> {
        Ok(Locale::new(self.locale.clone())?)
    }

    /// The ERP section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if it is absent.
    pub fn require_erp(&self) -> Result<&ErpConfig, ConfigError> {
        self.erp.as_ref().ok_or(ConfigError::Missing("erp"))
    }
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
