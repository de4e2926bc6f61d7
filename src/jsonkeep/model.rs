use crate::error::{Result, StoreError};
use serde_json::{Map, Value};

/// A persisted JSON document. Usually an object, but any JSON value is accepted.
pub type Document = Value;

/// The "no saved state yet" document: `{}`.
pub fn empty_document() -> Document {
    Value::Object(Map::new())
}

/// Splits a dotted key path (`server.http.port`) into its segments.
pub fn parse_key_path(key: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(segments)
}

pub fn get_path<'a>(doc: &'a Document, key: &str) -> Result<Option<&'a Value>> {
    let mut current = doc;
    for segment in parse_key_path(key)? {
        match current.as_object().and_then(|obj| obj.get(segment)) {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Sets the value at `key`, creating intermediate objects as needed.
/// Intermediates that are not objects are replaced.
pub fn set_path(doc: &mut Document, key: &str, value: Value) -> Result<()> {
    let segments = parse_key_path(key)?;
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| StoreError::InvalidKey(key.to_string()))?;

    let mut current = doc;
    for segment in parents {
        current = ensure_object(current)
            .entry(segment.to_string())
            .or_insert_with(empty_document);
    }
    ensure_object(current).insert(last.to_string(), value);
    Ok(())
}

/// Removes the value at `key`, returning it if present.
pub fn remove_path(doc: &mut Document, key: &str) -> Result<Option<Value>> {
    let segments = parse_key_path(key)?;
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| StoreError::InvalidKey(key.to_string()))?;

    let mut current = doc;
    for segment in parents {
        match current.as_object_mut().and_then(|obj| obj.get_mut(*segment)) {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
    Ok(current.as_object_mut().and_then(|obj| obj.remove(*last)))
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = empty_document();
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_is_empty_object() {
        assert_eq!(empty_document(), json!({}));
    }

    #[test]
    fn test_parse_key_path_rejects_empty_segments() {
        assert!(parse_key_path("").is_err());
        assert!(parse_key_path("a..b").is_err());
        assert!(parse_key_path(".a").is_err());
        assert_eq!(parse_key_path("a.b").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_get_path_nested() {
        let doc = json!({"bridge": {"name": "hue", "port": 80}});
        assert_eq!(get_path(&doc, "bridge.port").unwrap(), Some(&json!(80)));
        assert_eq!(get_path(&doc, "bridge.missing").unwrap(), None);
        assert_eq!(get_path(&doc, "bridge.port.deeper").unwrap(), None);
    }

    #[test]
    fn test_set_path_creates_intermediates() {
        let mut doc = empty_document();
        set_path(&mut doc, "lights.1.name", json!("Kitchen")).unwrap();
        assert_eq!(doc, json!({"lights": {"1": {"name": "Kitchen"}}}));
    }

    #[test]
    fn test_set_path_replaces_scalar_intermediate() {
        let mut doc = json!({"a": 5});
        set_path(&mut doc, "a.b", json!(true)).unwrap();
        assert_eq!(doc, json!({"a": {"b": true}}));
    }

    #[test]
    fn test_set_path_on_non_object_root() {
        let mut doc = json!([1, 2]);
        set_path(&mut doc, "k", json!(1)).unwrap();
        assert_eq!(doc, json!({"k": 1}));
    }

    #[test]
    fn test_remove_path() {
        let mut doc = json!({"a": {"b": 1, "c": 2}});
        assert_eq!(remove_path(&mut doc, "a.b").unwrap(), Some(json!(1)));
        assert_eq!(remove_path(&mut doc, "a.zzz").unwrap(), None);
        assert_eq!(remove_path(&mut doc, "x.y").unwrap(), None);
        assert_eq!(doc, json!({"a": {"c": 2}}));
    }
}
