//! Catalog entities reachable by URL key.

use serde_json::Value;

/// What kind of entity a catalog hit is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// A product: rendered as a content page.
    Product,
    /// A category: rendered as a listing.
    Category,
    /// Anything else, named by the physical index it came from.
    Other(String),
}

/// A catalog entity bound to a URL key.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntity {
    /// The entity kind.
    pub kind: EntityKind,
    /// The URL key the entity was found under.
    pub url_key: String,
    /// The indexed document.
    pub source: Value,
}

impl CatalogEntity {
    /// Creates a catalog entity.
    #[must_use]
    pub fn new(kind: EntityKind, url_key: impl Into<String>, source: Value) -> Self {
        Self {
            kind,
            url_key: url_key.into(),
            source,
        }
    }
}
