//! Lazy routes for catalog entities.

use std::sync::Arc;

use storefront_domain::{EntityKind, RouteDefinition, RouteMatch, ViewVariant, url_key};
use tracing::{debug, info};

use crate::ApplicationResult;
use crate::ports::{CatalogLookup, RouteTable};

/// What resolving a path did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResolution {
    /// A route was installed; these are the matches for the path.
    Installed(Vec<RouteMatch>),
    /// The path was already routed; no lookup was made.
    Existing(Vec<RouteMatch>),
    /// The catalog has no entity for the path.
    NotFound,
    /// The entity exists but has no view.
    Unsupported(EntityKind),
}

impl RouteResolution {
    /// The matches the navigation should continue with, if any.
    #[must_use]
    pub fn matches(&self) -> Option<&[RouteMatch]> {
        match self {
            Self::Installed(matches) | Self::Existing(matches) => Some(matches),
            Self::NotFound | Self::Unsupported(_) => None,
        }
    }
}

/// Binds unknown paths to product and category pages.
///
/// The first navigation to an unknown path looks the path up in the
/// catalog and, for a product or a category, installs a route for it.
/// Later navigations find the route in the table.
pub struct EntityRouteResolver<C, R> {
    catalog: C,
    routes: Arc<R>,
}

impl<C: CatalogLookup, R: RouteTable> EntityRouteResolver<C, R> {
    /// Creates a resolver installing into `routes`.
    pub const fn new(catalog: C, routes: Arc<R>) -> Self {
        Self { catalog, routes }
    }

    /// The route table routes are installed into.
    #[must_use]
    pub const fn routes(&self) -> &Arc<R> {
        &self.routes
    }

    /// Resolves `path`, installing an entity route if the catalog knows it.
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the lookup fails. No route is installed
    /// in that case.
    pub async fn resolve(&self, path: &str) -> ApplicationResult<RouteResolution> {
        if self.routes.has_route(path) {
            return Ok(RouteResolution::Existing(self.routes.resolve(path)));
        }

        let key = url_key(path);
        if key.is_empty() {
            return Ok(RouteResolution::NotFound);
        }

        let Some(entity) = self.catalog.entity_by_url_key(key).await? else {
            debug!(path, "no entity for path");
            return Ok(RouteResolution::NotFound);
        };

        let Some(view) = ViewVariant::for_kind(&entity.kind) else {
            debug!(path, kind = ?entity.kind, "entity has no view");
            return Ok(RouteResolution::Unsupported(entity.kind));
        };

        self.routes.add_route(RouteDefinition::leaf(path, view));
        info!(path, ?view, "entity route installed");
        Ok(RouteResolution::Installed(self.routes.resolve(path)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
pub(crate) mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::ports::TransportError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storefront_domain::CatalogEntity;

    /// Route table recording every registration, duplicates included.
    #[derive(Default)]
    pub struct RecordingRoutes {
        pub added: Mutex<Vec<RouteDefinition>>,
    }

    impl RouteTable for RecordingRoutes {
        fn has_route(&self, path: &str) -> bool {
            self.added.lock().unwrap().iter().any(|r| r.path == path)
        }

        fn add_route(&self, route: RouteDefinition) {
            self.added.lock().unwrap().push(route);
        }

        fn resolve(&self, path: &str) -> Vec<RouteMatch> {
            self.added
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.path == path)
                .map(|r| RouteMatch {
                    path: r.path.clone(),
                    view: r.view,
                })
                .collect()
        }
    }

    /// Catalog answering from a fixed map.
    #[derive(Default)]
    pub struct MapCatalog {
        pub entities: HashMap<String, EntityKind>,
        pub lookups: AtomicUsize,
        pub fail: bool,
    }

    impl MapCatalog {
        pub fn with(mut self, key: &str, kind: EntityKind) -> Self {
            self.entities.insert(key.to_string(), kind);
            self
        }
    }

    impl CatalogLookup for MapCatalog {
        async fn entity_by_url_key(
            &self,
            url_key: &str,
        ) -> ApplicationResult<Option<CatalogEntity>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TransportError::Connection("down".to_string()).into());
            }
            Ok(self
                .entities
                .get(url_key)
                .map(|kind| CatalogEntity::new(kind.clone(), url_key, json!({}))))
        }
    }

    fn resolver(catalog: MapCatalog) -> EntityRouteResolver<MapCatalog, RecordingRoutes> {
        EntityRouteResolver::new(catalog, Arc::new(RecordingRoutes::default()))
    }

    #[tokio::test]
    async fn test_product_path_installs_product_route() {
        let resolver = resolver(MapCatalog::default().with("red-shoes", EntityKind::Product));

        let resolution = resolver.resolve("/red-shoes").await.unwrap();

        assert_eq!(
            resolution,
            RouteResolution::Installed(vec![RouteMatch {
                path: "/red-shoes".to_string(),
                view: ViewVariant::ProductPage,
            }])
        );
        let added = resolver.routes().added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert!(added[0].children.is_empty());
    }

    #[tokio::test]
    async fn test_category_path_installs_listing_route() {
        let resolver = resolver(MapCatalog::default().with("shoes", EntityKind::Category));

        let resolution = resolver.resolve("/shoes").await.unwrap();

        assert_eq!(
            resolution.matches().unwrap()[0].view,
            ViewVariant::CategoryPage
        );
    }

    #[tokio::test]
    async fn test_resolving_twice_installs_once() {
        let resolver = resolver(MapCatalog::default().with("red-shoes", EntityKind::Product));

        let first = resolver.resolve("/red-shoes").await.unwrap();
        let second = resolver.resolve("/red-shoes").await.unwrap();

        assert!(matches!(first, RouteResolution::Installed(_)));
        assert!(matches!(second, RouteResolution::Existing(_)));
        assert_eq!(resolver.routes().added.lock().unwrap().len(), 1);
        assert_eq!(resolver.catalog.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_path_installs_nothing() {
        let resolver = resolver(MapCatalog::default());

        let resolution = resolver.resolve("/nowhere").await.unwrap();

        assert_eq!(resolution, RouteResolution::NotFound);
        assert!(resolver.routes().added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_kind_installs_nothing() {
        let kind = EntityKind::Other("pages_en".to_string());
        let resolver = resolver(MapCatalog::default().with("about", kind.clone()));

        let resolution = resolver.resolve("/about").await.unwrap();

        assert_eq!(resolution, RouteResolution::Unsupported(kind));
        assert!(resolution.matches().is_none());
        assert!(resolver.routes().added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_root_path_skips_lookup() {
        let resolver = resolver(MapCatalog::default());

        assert_eq!(
            resolver.resolve("/").await.unwrap(),
            RouteResolution::NotFound
        );
        assert_eq!(resolver.catalog.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let resolver = resolver(MapCatalog {
            fail: true,
            ..MapCatalog::default()
        });

        let error = resolver.resolve("/red-shoes").await.unwrap_err();

        assert!(matches!(error, ApplicationError::Transport(_)));
        assert!(resolver.routes().added.lock().unwrap().is_empty());
    }
}
