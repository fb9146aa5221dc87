//! Partial-failure extraction from search responses.
//!
//! A search cluster may answer 200 while some shards failed. The failure
//! records show up under `failures` or `failed_shards`, either on the root
//! object or one object below it (`_shards.failures`). The walk stops
//! there: markers nested deeper are not reported.
//!
//! A `null` marker reports nothing, and fragments from several markers are
//! separated with `"; "` rather than run together.

use serde_json::Value;

/// Keys that carry partial-failure records.
pub const FAILURE_KEYS: [&str; 2] = ["failures", "failed_shards"];

/// Deepest container level whose keys are still inspected (root is 0).
const MAX_DEPTH: usize = 1;

const UNKNOWN: &str = "unknown";

/// Summarizes the failure records embedded in a search response or error
/// body.
///
/// Array markers contribute one `"<index>: <reason>"` fragment per record;
/// any other non-null marker is serialized verbatim. Fragments are joined
/// with `"; "`. Returns `None` when nothing is found within the depth
/// budget.
#[must_use]
pub fn extract_failures(response: &Value) -> Option<String> {
    let mut fragments = Vec::new();
    collect(response, 0, &mut fragments);
    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join("; "))
    }
}

fn collect(value: &Value, depth: usize, fragments: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if FAILURE_KEYS.contains(&key.as_str()) {
                    fragments.extend(describe(child));
                } else if depth < MAX_DEPTH {
                    collect(child, depth + 1, fragments);
                }
            }
        }
        Value::Array(items) if depth < MAX_DEPTH => {
            for item in items {
                collect(item, depth + 1, fragments);
            }
        }
        _ => {}
    }
}

fn describe(marker: &Value) -> Option<String> {
    match marker {
        Value::Null => None,
        Value::Array(records) if records.is_empty() => None,
        Value::Array(records) => Some(
            records
                .iter()
                .map(|record| {
                    format!(
                        "{}: {}",
                        text(record.get("index")),
                        text(record.pointer("/reason/reason"))
                    )
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
        other => Some(other.to_string()),
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => UNKNOWN.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_root_failures_array() {
        let response = json!({
            "took": 5,
            "failures": [{"index": "a", "reason": {"reason": "timeout"}}]
        });
        assert_eq!(extract_failures(&response).as_deref(), Some("a: timeout"));
    }

    #[test]
    fn test_shard_failures_one_level_down() {
        let response = json!({
            "took": 12,
            "_shards": {
                "total": 2,
                "failed": 2,
                "failures": [
                    {"index": "products_fr_FR", "shard": 0, "reason": {"type": "x", "reason": "boom"}},
                    {"index": "products_fr_FR", "shard": 1, "reason": {"reason": "no such field"}}
                ]
            },
            "hits": {"hits": []}
        });
        assert_eq!(
            extract_failures(&response).as_deref(),
            Some("products_fr_FR: boom; products_fr_FR: no such field")
        );
    }

    #[test]
    fn test_non_array_marker_is_serialized() {
        let response = json!({"failed_shards": {"count": 3}});
        assert_eq!(
            extract_failures(&response).as_deref(),
            Some(r#"{"count":3}"#)
        );
    }

    #[test]
    fn test_missing_record_fields_render_unknown() {
        let response = json!({"failures": [{"shard": 1}]});
        assert_eq!(
            extract_failures(&response).as_deref(),
            Some("unknown: unknown")
        );
    }

    #[test]
    fn test_no_markers() {
        let response = json!({"took": 1, "hits": {"total": 0, "hits": []}});
        assert_eq!(extract_failures(&response), None);
    }

    #[test]
    fn test_null_and_empty_inputs() {
        assert_eq!(extract_failures(&Value::Null), None);
        assert_eq!(extract_failures(&json!({"failures": []})), None);
        assert_eq!(extract_failures(&json!({"failures": null})), None);
    }

    #[test]
    fn test_markers_beyond_depth_budget_are_ignored() {
        let response = json!({
            "outer": {"inner": {"failures": [{"index": "a", "reason": {"reason": "deep"}}]}}
        });
        assert_eq!(extract_failures(&response), None);
    }

    #[test]
    fn test_root_array_elements_are_inspected() {
        let response = json!([{"failures": [{"index": "b", "reason": {"reason": "r"}}]}]);
        assert_eq!(extract_failures(&response).as_deref(), Some("b: r"));
    }

    #[test]
    fn test_several_markers_are_joined() {
        let response = json!({
            "failed_shards": [{"index": "b", "reason": {"reason": "two"}}],
            "failures": [{"index": "a", "reason": {"reason": "one"}}]
        });
        assert_eq!(
            extract_failures(&response).as_deref(),
            Some("b: two; a: one")
        );
    }
}
