//! Value snapshot - the live values of one form instance
//!
//! The snapshot is owned and mutated by the hosting form-state layer; the
//! interpreter only reads it. Fields address into it by dot-path, so nested
//! group values and array elements can be referenced from conditional rules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current values for all fields in a form instance, keyed by field name.
///
/// Paths passed to [`ValueSnapshot::get`] may contain `.` separators to
/// address into nested objects, and numeric segments to index into arrays
/// (e.g. `"address.lines.0"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueSnapshot(Map<String, Value>);

impl ValueSnapshot {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Resolves a dot-path against the snapshot. Missing segments resolve
    /// to `None`; the interpreter treats an unresolved path like a null
    /// value.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Sets a top-level value. Nested writes go through the host's own
    /// form-state mechanism, not through the snapshot.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ValueSnapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for ValueSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: Value) -> ValueSnapshot {
        serde_json::from_value(value).expect("snapshot fixture must be an object")
    }

    #[test]
    fn test_get_top_level() {
        let snap = snapshot(json!({"code": "ABC", "count": 2}));
        assert_eq!(snap.get("code"), Some(&json!("ABC")));
        assert_eq!(snap.get("count"), Some(&json!(2)));
        assert_eq!(snap.get("missing"), None);
    }

    #[test]
    fn test_get_dot_path() {
        let snap = snapshot(json!({
            "address": {"city": "Oakhaven", "lines": ["12 Elm St", "Attic"]}
        }));
        assert_eq!(snap.get("address.city"), Some(&json!("Oakhaven")));
        assert_eq!(snap.get("address.lines.1"), Some(&json!("Attic")));
        assert_eq!(snap.get("address.lines.7"), None);
        assert_eq!(snap.get("address.city.deeper"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut snap = ValueSnapshot::new();
        snap.set("code", json!("ABC"));
        snap.set("code", json!("XYZ"));
        assert_eq!(snap.get("code"), Some(&json!("XYZ")));
    }
}
