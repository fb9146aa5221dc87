//! Storefront Application - Services and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces to the search cluster, the ERP, storage and routing)
//! - The search, auth, settings and routing services
//! - Application-level error handling

pub mod auth;
pub mod error;
pub mod locale;
pub mod ports;
pub mod routing;
pub mod search;
pub mod settings;

pub use auth::{AuthCoordinator, AuthService, AuthState, SessionStore};
pub use error::{ApplicationError, ApplicationResult};
pub use locale::{LocaleAware, LocaleHub};
pub use ports::{
    CatalogLookup, Clock, ErpTransport, KeyValueStorage, RouteTable, SearchTransport,
    StorageError, TransportError,
};
pub use routing::{EntityRouteResolver, Navigator, RouteResolution};
pub use search::{CatalogService, SearchClient};
pub use settings::SettingsService;
