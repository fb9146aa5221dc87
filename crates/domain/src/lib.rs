//! Storefront Domain - Core business types
//!
//! This crate defines the domain model for the storefront client core.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod locale;
pub mod routing;
pub mod search;
pub mod user;

pub use auth::AuthOutcome;
pub use catalog::{CatalogEntity, EntityKind};
pub use error::{DomainError, DomainResult};
pub use locale::Locale;
pub use routing::{
    NavigationOutcome, NavigationTarget, RouteDefinition, RouteMatch, ViewVariant, url_key,
};
pub use search::{IndexSet, SearchEndpoint, build_endpoint, extract_failures};
pub use user::User;
