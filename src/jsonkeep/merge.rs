use serde_json::Value;

/// Merges `patch` into `base` in place.
///
/// Objects present on both sides are merged key by key, recursively. Every
/// other value in `patch` (scalars, arrays, objects meeting a non-object)
/// replaces what `base` had under that key.
pub fn update_document(base: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *base = patch.clone();
        return;
    };
    let Value::Object(base_map) = base else {
        *base = patch.clone();
        return;
    };

    for (key, value) in patch_map {
        match base_map.get_mut(key) {
            Some(existing) if value.is_object() && existing.is_object() => {
                update_document(existing, value)
            }
            _ => {
                base_map.insert(key.clone(), value.clone());
            }
        }
    }
}
