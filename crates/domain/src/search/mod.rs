//! Search domain: endpoints, query bodies and failure extraction.

mod endpoint;
mod failures;
mod query;

pub use endpoint::{INDEX_SEPARATOR, IndexSet, SEARCH_PATH, SearchEndpoint, build_endpoint};
pub use failures::{FAILURE_KEYS, extract_failures};
pub use query::{match_all, terms_query};
