//! Object merging for JSON values.

use serde_json::Value;

/// Merge `sources` left to right into one object. Later keys win; with
/// `deep` set, nested objects merge recursively instead of replacing.
/// Non-object sources are skipped.
pub fn extend(deep: bool, sources: &[Value]) -> Value {
    let mut out = serde_json::Map::new();
    for source in sources {
        let Value::Object(map) = source else { continue };
        for (key, value) in map {
            let merged = match out.remove(key) {
                Some(existing @ Value::Object(_)) if deep && value.is_object() => {
                    extend(true, &[existing, value.clone()])
                }
                _ => value.clone(),
            };
            out.insert(key.clone(), merged);
        }
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shallow_later_wins() {
        let merged = extend(false, &[json!({"a": 1, "b": 2}), json!({"b": 3, "c": 4})]);
        assert_eq!(merged, json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_shallow_replaces_nested() {
        let merged = extend(false, &[json!({"o": {"x": 1, "y": 2}}), json!({"o": {"y": 3}})]);
        assert_eq!(merged, json!({"o": {"y": 3}}));
    }

    #[test]
    fn test_deep_merges_nested() {
        let merged = extend(true, &[json!({"o": {"x": 1, "y": 2}}), json!({"o": {"y": 3}})]);
        assert_eq!(merged, json!({"o": {"x": 1, "y": 3}}));
    }

    #[test]
    fn test_deep_mixed_types_replace() {
        let merged = extend(true, &[json!({"o": {"x": 1}}), json!({"o": 7})]);
        assert_eq!(merged, json!({"o": 7}));
    }

    #[test]
    fn test_non_objects_skipped() {
        let merged = extend(false, &[json!(5), json!({"a": 1}), json!(null)]);
        assert_eq!(merged, json!({"a": 1}));
    }

    #[test]
    fn test_empty() {
        assert_eq!(extend(true, &[]), json!({}));
    }
}
