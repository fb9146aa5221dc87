//! Storefront Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: reqwest transports for the search
//! cluster and the ERP, expiring key/value storage, an in-memory route
//! table and configuration loading.

pub mod adapters;
pub mod configuration;
pub mod persistence;
pub mod routing;

pub use adapters::{
    PROXY_PREFIX, ReqwestErpTransport, ReqwestSearchTransport, SystemClock, proxy_target,
};
pub use configuration::{ConfigError, ErpConfig, SearchConfig, SessionConfig, StorefrontConfig};
pub use persistence::{FileKeyValueStorage, MemoryKeyValueStorage};
pub use routing::InMemoryRouteTable;
