//! Routing ports: the route table and the catalog lookup behind it.

use std::future::Future;

use storefront_domain::{CatalogEntity, RouteDefinition, RouteMatch};

use crate::ApplicationResult;

/// The navigation route table.
///
/// Registering a path twice is ignored by implementations.
pub trait RouteTable: Send + Sync {
    /// Whether a route for `path` exists.
    fn has_route(&self, path: &str) -> bool;

    /// Registers a route.
    fn add_route(&self, route: RouteDefinition);

    /// Resolves `path` against the current table.
    fn resolve(&self, path: &str) -> Vec<RouteMatch>;
}

/// Port for looking up catalog entities by URL key.
pub trait CatalogLookup: Send + Sync {
    /// Finds the entity bound to `url_key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be queried.
    fn entity_by_url_key(
        &self,
        url_key: &str,
    ) -> impl Future<Output = ApplicationResult<Option<CatalogEntity>>> + Send;
}
