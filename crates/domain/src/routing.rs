//! Route definitions for dynamically bound entity pages.

use crate::catalog::EntityKind;

/// The page template a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewVariant {
    /// Content page for a single product.
    ProductPage,
    /// Listing page for a category.
    CategoryPage,
}

impl ViewVariant {
    /// Picks the view for an entity kind, if the kind has one.
    #[must_use]
    pub const fn for_kind(kind: &EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Product => Some(Self::ProductPage),
            EntityKind::Category => Some(Self::CategoryPage),
            EntityKind::Other(_) => None,
        }
    }
}

/// A route registered in the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    /// Path the route answers, with its leading separator.
    pub path: String,
    /// View rendered for the path.
    pub view: ViewVariant,
    /// Nested routes. Entity routes have none.
    pub children: Vec<RouteDefinition>,
}

impl RouteDefinition {
    /// Creates a route without children.
    #[must_use]
    pub fn leaf(path: impl Into<String>, view: ViewVariant) -> Self {
        Self {
            path: path.into(),
            view,
            children: Vec::new(),
        }
    }
}

/// One route matched while resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matched path.
    pub path: String,
    /// The view for that path.
    pub view: ViewVariant,
}

/// Where a navigation is going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    /// Requested path.
    pub path: String,
    /// Whether the destination needs a signed-in user.
    pub requires_auth: bool,
}

impl NavigationTarget {
    /// A navigation to a public path.
    #[must_use]
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requires_auth: false,
        }
    }

    /// A navigation to a path that needs a signed-in user.
    #[must_use]
    pub fn protected(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requires_auth: true,
        }
    }

    /// The path without its leading separator, used as a catalog URL key.
    #[must_use]
    pub fn url_key(&self) -> &str {
        url_key(&self.path)
    }
}

/// Strips the leading separator from a path.
#[must_use]
pub fn url_key(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// How a navigation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The path resolved to these routes.
    Matched(Vec<RouteMatch>),
    /// The navigation must go elsewhere.
    Redirect(String),
    /// Nothing answers this path.
    NotFound,
}
