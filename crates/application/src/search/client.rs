//! Locale-aware search client.

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use storefront_domain::search::{match_all, terms_query};
use storefront_domain::{DomainResult, IndexSet, Locale, SearchEndpoint, extract_failures};
use tracing::{debug, error, warn};

use crate::locale::LocaleAware;
use crate::ports::{SearchTransport, TransportError};

/// Index set and locale a client currently targets.
#[derive(Debug)]
struct Target {
    indexes: IndexSet,
    locale: Locale,
    endpoint: Arc<SearchEndpoint>,
}

/// Runs queries against one locale-partitioned index set.
///
/// The endpoint is rebuilt on every locale or index change. A search takes
/// the endpoint current when it starts and keeps it until it completes, so
/// a change made while a search is in flight only affects later searches.
///
/// A 2xx answer can still carry shard failures. Those are logged and the
/// answer is returned as-is. Transport failures are logged with whatever
/// failure records their body carries and returned unchanged.
pub struct SearchClient<T> {
    transport: T,
    base_url: String,
    target: RwLock<Target>,
}

impl<T: SearchTransport> SearchClient<T> {
    /// Creates a client for `indexes` under `locale`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse.
    pub fn new(
        transport: T,
        base_url: impl Into<String>,
        indexes: IndexSet,
        locale: Locale,
    ) -> DomainResult<Self> {
        let base_url = base_url.into();
        let endpoint = Arc::new(SearchEndpoint::build(&base_url, &indexes, &locale)?);
        Ok(Self {
            transport,
            base_url,
            target: RwLock::new(Target {
                indexes,
                locale,
                endpoint,
            }),
        })
    }

    /// The endpoint the next search will use.
    #[must_use]
    pub fn endpoint(&self) -> Arc<SearchEndpoint> {
        Arc::clone(&self.read_target().endpoint)
    }

    /// The locale the client currently targets.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.read_target().locale.clone()
    }

    /// The index set the client currently targets.
    #[must_use]
    pub fn indexes(&self) -> IndexSet {
        self.read_target().indexes.clone()
    }

    /// Points the client at another index set.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be rebuilt.
    pub fn change_indexes(&self, indexes: IndexSet) -> DomainResult<()> {
        let mut target = self.target.write().unwrap_or_else(PoisonError::into_inner);
        let endpoint = SearchEndpoint::build(&self.base_url, &indexes, &target.locale)?;
        target.indexes = indexes;
        target.endpoint = Arc::new(endpoint);
        Ok(())
    }

    /// Runs a search. `None` searches for everything.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged if the request fails.
    pub async fn search(&self, query: Option<Value>) -> Result<Value, TransportError> {
        let body = query.unwrap_or_else(match_all);
        let endpoint = self.endpoint();
        debug!(endpoint = %endpoint, "search");

        match self.transport.post_json(endpoint.as_str(), &body).await {
            Ok(response) => {
                if let Some(failures) = extract_failures(&response) {
                    warn!(
                        endpoint = %endpoint,
                        request = %body,
                        "search reported partial failures: {failures}"
                    );
                }
                Ok(response)
            }
            Err(err) => {
                match err.data().and_then(extract_failures) {
                    Some(failures) => error!(
                        status = ?err.status(),
                        request = %body,
                        "search failed: {failures}"
                    ),
                    None => error!(
                        endpoint = %endpoint,
                        request = %body,
                        error = %err,
                        "search failed"
                    ),
                }
                Err(err)
            }
        }
    }

    /// Searches for documents whose `field` is exactly `value`.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged if the request fails.
    pub async fn find(&self, field: &str, value: Value) -> Result<Value, TransportError> {
        self.search(Some(terms_query(field, value))).await
    }

    fn read_target(&self) -> std::sync::RwLockReadGuard<'_, Target> {
        self.target.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: SearchTransport> LocaleAware for SearchClient<T> {
    fn change_locale(&self, locale: &Locale) -> DomainResult<()> {
        let mut target = self.target.write().unwrap_or_else(PoisonError::into_inner);
        let endpoint = SearchEndpoint::build(&self.base_url, &target.indexes, locale)?;
        target.locale = locale.clone();
        target.endpoint = Arc::new(endpoint);
        debug!(endpoint = %target.endpoint, "search endpoint rebuilt");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct MockTransport {
        responses: Mutex<VecDeque<Result<Value, TransportError>>>,
        calls: Mutex<Vec<(String, Value)>>,
        entered: Option<Arc<Notify>>,
        release: Option<Arc<Notify>>,
    }

    impl MockTransport {
        fn answering(response: Result<Value, TransportError>) -> Self {
            let transport = Self::default();
            transport.responses.lock().unwrap().push_back(response);
            transport
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SearchTransport for MockTransport {
        async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), body.clone()));
            if let (Some(entered), Some(release)) = (&self.entered, &self.release) {
                entered.notify_one();
                release.notified().await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(json!({"hits": {"hits": []}})))
        }
    }

    /// Log output captured for one test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn install(&self) -> tracing::subscriber::DefaultGuard {
            let writer = self.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_ansi(false)
                .with_max_level(tracing::Level::DEBUG)
                .with_writer(move || writer.clone())
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn locale(code: &str) -> Locale {
        Locale::new(code).unwrap()
    }

    fn client(transport: MockTransport) -> SearchClient<MockTransport> {
        SearchClient::new(
            transport,
            "http://search.local",
            IndexSet::single("products").unwrap(),
            locale("fr_FR"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_absent_query_matches_everything() {
        let client = client(MockTransport::default());
        client.search(None).await.unwrap();

        let calls = client.transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "http://search.local/products_fr_FR/_search");
        assert_eq!(calls[0].1, json!({"query": {"match_all": {}}}));
    }

    #[tokio::test]
    async fn test_find_sends_terms_query() {
        let client = client(MockTransport::default());
        client.find("sku", json!("A-1")).await.unwrap();

        assert_eq!(
            client.transport.calls()[0].1,
            json!({"query": {"terms": {"sku": ["A-1"]}}})
        );
    }

    #[tokio::test]
    async fn test_partial_failure_returns_data_unmodified() {
        let response = json!({
            "took": 5,
            "_shards": {"failures": [{"index": "products_fr_FR", "reason": {"reason": "timeout"}}]},
            "hits": {"hits": [{"_id": "1"}]}
        });
        let client = client(MockTransport::answering(Ok(response.clone())));

        let result = client.search(None).await.unwrap();
        assert_eq!(result, response);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reraised_unchanged() {
        let failure = TransportError::Status {
            status: 400,
            message: "Bad Request".to_string(),
            data: Some(json!({
                "error": {"failed_shards": [{"index": "products_fr_FR", "reason": {"reason": "parse"}}]},
                "status": 400
            })),
        };
        let client = client(MockTransport::answering(Err(failure.clone())));

        let error = client.search(None).await.unwrap_err();
        assert_eq!(error, failure);
        assert_eq!(error.status(), Some(400));
        assert_eq!(error.message(), "Bad Request");
    }

    #[tokio::test]
    async fn test_partial_failure_is_logged_as_warning() {
        let logs = Captured::default();
        let _guard = logs.install();
        let response = json!({
            "took": 5,
            "failures": [{"index": "a", "reason": {"reason": "timeout"}}]
        });
        let client = client(MockTransport::answering(Ok(response)));

        client.search(None).await.unwrap();

        let lines = logs.lines();
        let line = lines
            .iter()
            .find(|line| line.contains("a: timeout"))
            .expect("failure summary logged");
        assert!(line.contains("WARN"));
        assert!(line.contains("match_all"));
        assert!(!lines.iter().any(|line| line.contains("ERROR")));
    }

    #[tokio::test]
    async fn test_transport_failure_is_logged_with_status_and_summary() {
        let logs = Captured::default();
        let _guard = logs.install();
        let client = client(MockTransport::answering(Err(TransportError::Status {
            status: 400,
            message: "Bad Request".to_string(),
            data: Some(json!({
                "error": {"failed_shards": [{"index": "a", "reason": {"reason": "timeout"}}]}
            })),
        })));

        client.search(None).await.unwrap_err();

        let lines = logs.lines();
        let line = lines
            .iter()
            .find(|line| line.contains("a: timeout"))
            .expect("failure summary logged");
        assert!(line.contains("ERROR"));
        assert!(line.contains("status=Some(400)"));
    }

    #[tokio::test]
    async fn test_transport_failure_without_records_logs_endpoint() {
        let logs = Captured::default();
        let _guard = logs.install();
        let client = client(MockTransport::answering(Err(TransportError::Connection(
            "refused".to_string(),
        ))));

        client.search(None).await.unwrap_err();

        let lines = logs.lines();
        let line = lines
            .iter()
            .find(|line| line.contains("search failed"))
            .expect("failure logged");
        assert!(line.contains("ERROR"));
        assert!(line.contains("http://search.local/products_fr_FR/_search"));
        assert!(line.contains("refused"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_reraised() {
        let client = client(MockTransport::answering(Err(TransportError::Connection(
            "refused".to_string(),
        ))));

        let error = client.search(None).await.unwrap_err();
        assert!(matches!(error, TransportError::Connection(_)));
    }

    #[tokio::test]
    async fn test_locale_change_rebuilds_endpoint_for_next_search() {
        let client = client(MockTransport::default());
        client.change_locale(&locale("en_US")).unwrap();
        client.search(None).await.unwrap();

        assert_eq!(client.locale(), locale("en_US"));
        assert_eq!(
            client.transport.calls()[0].0,
            "http://search.local/products_en_US/_search"
        );
    }

    #[tokio::test]
    async fn test_index_change_keeps_locale() {
        let client = client(MockTransport::default());
        client
            .change_indexes(IndexSet::new(["products", "categories"]).unwrap())
            .unwrap();

        assert_eq!(
            client.endpoint().as_str(),
            "http://search.local/products_fr_FR,categories_fr_FR/_search"
        );
    }

    #[tokio::test]
    async fn test_in_flight_search_keeps_old_endpoint() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let transport = MockTransport {
            entered: Some(Arc::clone(&entered)),
            release: Some(Arc::clone(&release)),
            ..MockTransport::default()
        };
        let client = client(transport);

        let (result, ()) = tokio::join!(client.search(None), async {
            entered.notified().await;
            client.change_locale(&locale("de_DE")).unwrap();
            release.notify_one();
        });

        result.unwrap();
        assert_eq!(
            client.transport.calls()[0].0,
            "http://search.local/products_fr_FR/_search"
        );
        assert_eq!(
            client.endpoint().as_str(),
            "http://search.local/products_de_DE/_search"
        );
    }
}
