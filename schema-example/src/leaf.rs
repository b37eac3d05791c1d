//! Leaf value resolution.

use serde_json::Value;

use crate::schema::{SchemaKind, SchemaNode};

/// Placeholder produced for leaves that are not key/value mappings.
pub const UNKNOWN: &str = "unknown";

/// Resolve the terminal value attached to a schema node.
///
/// Mappings yield `example`, then `default`, then `None`. Any other shape
/// yields `placeholder`.
pub fn resolve_leaf(config: &Value, placeholder: &str) -> Option<Value> {
    match SchemaKind::of(config) {
        SchemaKind::Mapping(_) => {
            let node = SchemaNode::new(config);
            node.example().or_else(|| node.default_value()).cloned()
        }
        _ => Some(Value::String(placeholder.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_example_wins_over_default() {
        let config = json!({"example": 1, "default": 2});
        assert_eq!(resolve_leaf(&config, UNKNOWN), Some(json!(1)));
    }

    #[test]
    fn test_default_fallback() {
        let config = json!({"type": "string", "default": "fallback"});
        assert_eq!(resolve_leaf(&config, UNKNOWN), Some(json!("fallback")));
    }

    #[test]
    fn test_mapping_without_values_is_absent() {
        assert_eq!(resolve_leaf(&json!({"type": "integer"}), UNKNOWN), None);
    }

    #[test]
    fn test_non_mapping_is_placeholder() {
        for config in [json!("string"), json!(3), json!([1]), Value::Null] {
            assert_eq!(resolve_leaf(&config, UNKNOWN), Some(json!("unknown")));
        }
        assert_eq!(resolve_leaf(&json!(true), "n/a"), Some(json!("n/a")));
    }
}
