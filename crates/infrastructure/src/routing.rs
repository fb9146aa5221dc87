//! In-memory route table.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use storefront_application::RouteTable;
use storefront_domain::{RouteDefinition, RouteMatch};
use tracing::debug;

/// Route table keyed by path.
///
/// Registering an existing path keeps the first definition.
#[derive(Debug, Default)]
pub struct InMemoryRouteTable {
    routes: RwLock<BTreeMap<String, RouteDefinition>>,
}

impl InMemoryRouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding statically declared routes.
    #[must_use]
    pub fn with_routes(routes: impl IntoIterator<Item = RouteDefinition>) -> Self {
        let table = Self::new();
        for route in routes {
            table.add_route(route);
        }
        table
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no route is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RouteTable for InMemoryRouteTable {
    fn has_route(&self, path: &str) -> bool {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    fn add_route(&self, route: RouteDefinition) {
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        if routes.contains_key(&route.path) {
            debug!(path = %route.path, "duplicate route ignored");
            return;
        }
        routes.insert(route.path.clone(), route);
    }

    fn resolve(&self, path: &str) -> Vec<RouteMatch> {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);
        let Some(route) = routes.get(path) else {
            return Vec::new();
        };
        let mut matches = vec![RouteMatch {
            path: route.path.clone(),
            view: route.view,
        }];
        // Index children render alongside their parent.
        matches.extend(
            route
                .children
                .iter()
                .filter(|child| child.path.is_empty())
                .map(|child| RouteMatch {
                    path: route.path.clone(),
                    view: child.view,
                }),
        );
        matches
    }
}
