//! Search request bodies.

use serde_json::{Map, Value, json};

/// The query sent when a caller asks for no particular query.
#[must_use]
pub fn match_all() -> Value {
    json!({ "query": { "match_all": {} } })
}

/// An exact-match query on one field.
#[must_use]
pub fn terms_query(field: &str, value: Value) -> Value {
    let mut terms = Map::new();
    terms.insert(field.to_string(), Value::Array(vec![value]));
    json!({ "query": { "terms": terms } })
}
