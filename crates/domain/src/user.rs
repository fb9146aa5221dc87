//! The signed-in user.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Profile fields read from the ERP user payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct UserFields {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    lang: Option<String>,
}

/// A signed-in customer.
///
/// Users are immutable snapshots: a login or profile refresh builds a new
/// one from the payload instead of patching the old value.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// ERP identifier.
    pub id: Option<i64>,
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Login used to authenticate.
    pub login: Option<String>,
    /// Preferred language.
    pub lang: Option<String>,
    raw: Value,
}

impl User {
    /// Builds a user from an ERP payload.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUser`] if the payload is not an object
    /// or a known field has the wrong type.
    pub fn from_value(data: Value) -> DomainResult<Self> {
        if !data.is_object() {
            return Err(DomainError::InvalidUser(format!(
                "expected an object, got {data}"
            )));
        }
        let fields: UserFields = serde_json::from_value(data.clone())
            .map_err(|e| DomainError::InvalidUser(e.to_string()))?;
        Ok(Self {
            id: fields.id,
            name: fields.name,
            email: fields.email,
            login: fields.login,
            lang: fields.lang,
            raw: data,
        })
    }

    /// The payload this user was built from.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }
}
