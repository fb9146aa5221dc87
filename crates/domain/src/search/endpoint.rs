//! Locale-partitioned search endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::locale::Locale;

/// Separator the search cluster understands as a multi-index query.
pub const INDEX_SEPARATOR: &str = ",";

/// Path appended to the localized index list.
pub const SEARCH_PATH: &str = "/_search";

/// An ordered, non-empty set of logical index names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct IndexSet(Vec<String>);

impl IndexSet {
    /// Creates an index set.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Configuration`] if no names are given or a
    /// name is blank.
    pub fn new<I, S>(names: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(DomainError::Configuration(
                "search index is required".to_string(),
            ));
        }
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(DomainError::Configuration(
                "search index names must not be empty".to_string(),
            ));
        }
        Ok(Self(names))
    }

    /// Creates a set holding a single index.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Configuration`] if the name is blank.
    pub fn single(name: impl Into<String>) -> DomainResult<Self> {
        Self::new([name.into()])
    }

    /// Returns the logical index names in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Returns true if `physical` is one of these indexes for any locale.
    ///
    /// Physical names look like `<logical>_<locale>`.
    #[must_use]
    pub fn contains_physical(&self, physical: &str) -> bool {
        self.0.iter().any(|name| {
            physical == name
                || physical
                    .strip_prefix(name.as_str())
                    .is_some_and(|rest| rest.starts_with('_'))
        })
    }

    fn localized(&self, locale: &Locale) -> String {
        self.0
            .iter()
            .map(|name| format!("{name}_{locale}"))
            .collect::<Vec<_>>()
            .join(INDEX_SEPARATOR)
    }
}

impl TryFrom<Vec<String>> for IndexSet {
    type Error = DomainError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IndexSet> for Vec<String> {
    fn from(set: IndexSet) -> Self {
        set.0
    }
}

/// A fully built search URL for one index set and one locale.
///
/// Endpoints are values: a locale or index change builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchEndpoint {
    url: String,
}

impl SearchEndpoint {
    /// Builds the endpoint for `indexes` under `locale`.
    ///
    /// A single index `products` with locale `fr_FR` becomes
    /// `<base>/products_fr_FR/_search`; several indexes are each suffixed
    /// and joined with [`INDEX_SEPARATOR`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the base URL does not parse.
    pub fn build(base_url: &str, indexes: &IndexSet, locale: &Locale) -> DomainResult<Self> {
        Url::parse(base_url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {base_url}")))?;
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            url: format!("{base}/{}{SEARCH_PATH}", indexes.localized(locale)),
        })
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SearchEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Builds a search endpoint from raw index names.
///
/// # Errors
///
/// Returns [`DomainError::Configuration`] if `index_names` is empty and
/// [`DomainError::InvalidUrl`] if the base URL does not parse.
pub fn build_endpoint<I, S>(
    base_url: &str,
    index_names: I,
    locale: &Locale,
) -> DomainResult<SearchEndpoint>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let indexes = IndexSet::new(index_names)?;
    SearchEndpoint::build(base_url, &indexes, locale)
}
