//! Authentication results.

use serde_json::{Map, Value};

/// Result of an ERP authentication call.
///
/// A call the ERP did not acknowledge with `success: true` is reported as
/// an unsuccessful outcome, not as an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthOutcome {
    /// Whether the ERP reported success.
    pub success: bool,
    /// The full response body.
    pub data: Map<String, Value>,
}

impl AuthOutcome {
    /// An unsuccessful outcome with no data.
    #[must_use]
    pub fn failed() -> Self {
        Self::default()
    }

    /// Reads an outcome from a response body. Anything but an object with
    /// `success: true` is unsuccessful.
    #[must_use]
    pub fn from_response(response: Value) -> Self {
        match response {
            Value::Object(data) => Self {
                success: data.get("success").and_then(Value::as_bool) == Some(true),
                data,
            },
            _ => Self::failed(),
        }
    }
}
