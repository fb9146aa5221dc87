//! Catalog lookups by URL key.

use std::sync::Arc;

use serde_json::{Value, json};
use storefront_domain::{CatalogEntity, EntityKind, IndexSet};
use tracing::debug;

use crate::ApplicationResult;
use crate::ports::{CatalogLookup, SearchTransport};
use crate::search::SearchClient;

/// Field holding an entity's URL key in the catalog indexes.
pub const URL_KEY_FIELD: &str = "url_key";

/// Finds products and categories by URL key.
///
/// The search client targets every catalog index at once; the physical
/// index of the first hit tells the entity kind.
pub struct CatalogService<T> {
    search: Arc<SearchClient<T>>,
    products: IndexSet,
    categories: IndexSet,
}

impl<T: SearchTransport> CatalogService<T> {
    /// Creates a catalog service over `search`.
    #[must_use]
    pub const fn new(
        search: Arc<SearchClient<T>>,
        products: IndexSet,
        categories: IndexSet,
    ) -> Self {
        Self {
            search,
            products,
            categories,
        }
    }

    /// The underlying search client.
    #[must_use]
    pub const fn search_client(&self) -> &Arc<SearchClient<T>> {
        &self.search
    }

    fn kind_of(&self, index: &str) -> EntityKind {
        if self.products.contains_physical(index) {
            EntityKind::Product
        } else if self.categories.contains_physical(index) {
            EntityKind::Category
        } else {
            EntityKind::Other(index.to_string())
        }
    }
}

impl<T: SearchTransport> CatalogLookup for CatalogService<T> {
    async fn entity_by_url_key(&self, url_key: &str) -> ApplicationResult<Option<CatalogEntity>> {
        let response = self.search.find(URL_KEY_FIELD, json!(url_key)).await?;
        let Some(hit) = response
            .pointer("/hits/hits")
            .and_then(Value::as_array)
            .and_then(|hits| hits.first())
        else {
            debug!(url_key, "no catalog entity");
            return Ok(None);
        };

        let index = hit.get("_index").and_then(Value::as_str).unwrap_or_default();
        let source = hit.get("_source").cloned().unwrap_or(Value::Null);
        Ok(Some(CatalogEntity::new(self.kind_of(index), url_key, source)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::TransportError;
    use pretty_assertions::assert_eq;
    use storefront_domain::Locale;

    struct Fixed(Result<Value, TransportError>);

    impl SearchTransport for Fixed {
        async fn post_json(&self, _url: &str, _body: &Value) -> Result<Value, TransportError> {
            self.0.clone()
        }
    }

    fn catalog(answer: Result<Value, TransportError>) -> CatalogService<Fixed> {
        let search = SearchClient::new(
            Fixed(answer),
            "http://search.local",
            IndexSet::new(["products", "categories"]).unwrap(),
            Locale::new("en").unwrap(),
        )
        .unwrap();
        CatalogService::new(
            Arc::new(search),
            IndexSet::single("products").unwrap(),
            IndexSet::single("categories").unwrap(),
        )
    }

    fn hit(index: &str) -> Value {
        json!({"hits": {"hits": [{"_index": index, "_source": {"name": "Red shoes"}}]}})
    }

    #[tokio::test]
    async fn test_product_hit() {
        let entity = catalog(Ok(hit("products_en")))
            .entity_by_url_key("red-shoes")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entity.kind, EntityKind::Product);
        assert_eq!(entity.url_key, "red-shoes");
        assert_eq!(entity.source, json!({"name": "Red shoes"}));
    }

    #[tokio::test]
    async fn test_category_hit() {
        let entity = catalog(Ok(hit("categories_en")))
            .entity_by_url_key("shoes")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entity.kind, EntityKind::Category);
    }

    #[tokio::test]
    async fn test_unknown_index_hit() {
        let entity = catalog(Ok(hit("pages_en")))
            .entity_by_url_key("about")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entity.kind, EntityKind::Other("pages_en".to_string()));
    }

    #[tokio::test]
    async fn test_no_hit() {
        let result = catalog(Ok(json!({"hits": {"hits": []}})))
            .entity_by_url_key("nothing")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let result = catalog(Err(TransportError::Connection("down".to_string())))
            .entity_by_url_key("x")
            .await;
        assert!(result.unwrap_err().as_transport().is_some());
    }
}
