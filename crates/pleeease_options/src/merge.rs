use serde_json::Map;
use serde_json::Value;

/// Deep merge `overlay` into `base`
///
/// - Objects are merged key by key, recursively
/// - Arrays are replaced wholesale, the overlay wins
/// - Scalars (including `null` and `false`) are replaced by the overlay
pub fn deep_merge(base: Value, overlay: Value) -> Value {
  match (base, overlay) {
    (Value::Object(mut base_map), Value::Object(overlay_map)) => {
      for (key, overlay_value) in overlay_map {
        let merged = match base_map.remove(&key) {
          Some(base_value) => deep_merge(base_value, overlay_value),
          None => overlay_value,
        };

        base_map.insert(key, merged);
      }

      Value::Object(base_map)
    }
    (_, overlay) => overlay,
  }
}

/// Merge the top-level keys of `overlay` over `base` without descending into nested objects
pub fn shallow_merge(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
  for (key, value) in overlay {
    base.insert(key, value);
  }

  base
}
