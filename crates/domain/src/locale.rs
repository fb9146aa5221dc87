//! Locale codes used to partition search indexes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// An opaque locale code such as `fr_FR` or `en`.
///
/// The core never looks inside the code; it is only appended to index
/// names to pick the right partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Creates a locale from a code.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Configuration`] if the code is empty.
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Configuration(
                "locale code must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the locale code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Locale {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_trims_code() {
        let locale = Locale::new("  fr_FR ").unwrap();
        assert_eq!(locale.as_str(), "fr_FR");
        assert_eq!(locale.to_string(), "fr_FR");
    }

    #[test]
    fn test_empty_locale_is_configuration_error() {
        assert!(matches!(
            Locale::new("   "),
            Err(DomainError::Configuration(_))
        ));
    }

    #[test]
    fn test_locale_deserialization_validates() {
        let ok: Locale = serde_json::from_str("\"en_US\"").unwrap();
        assert_eq!(ok.as_str(), "en_US");
        assert!(serde_json::from_str::<Locale>("\"\"").is_err());
    }
}
