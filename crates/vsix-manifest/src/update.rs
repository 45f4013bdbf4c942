//! Partial updates and the one-level merge that applies them.

use serde_json::{Map, Value};

use crate::manifest::Manifest;

/// The change requested for one top-level key.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Set the key. Objects are merged one level into an existing object.
    Set(Value),
    /// Delete the key.
    Remove,
}

/// An ordered set of top-level field updates.
///
/// Setting the same key twice keeps the last value in the first position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestUpdate {
    fields: Vec<(String, FieldUpdate)>,
}

impl ManifestUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key.into(), FieldUpdate::Set(value.into()));
        self
    }

    /// Removes `key`.
    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.push(key.into(), FieldUpdate::Remove);
        self
    }

    /// Adds a field update in place.
    pub fn push(&mut self, key: String, update: FieldUpdate) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = update,
            None => self.fields.push((key, update)),
        }
    }

    /// Iterates over the field updates in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldUpdate)> {
        self.fields.iter().map(|(k, u)| (k.as_str(), u))
    }

    /// Returns the number of field updates.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for ManifestUpdate {
    /// Every entry becomes a [`FieldUpdate::Set`].
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, FieldUpdate::Set(v)))
                .collect(),
        }
    }
}

impl FromIterator<(String, FieldUpdate)> for ManifestUpdate {
    fn from_iter<I: IntoIterator<Item = (String, FieldUpdate)>>(iter: I) -> Self {
        let mut update = Self::new();
        for (key, field) in iter {
            update.push(key, field);
        }
        update
    }
}

/// Applies `update` to a copy of `original`.
///
/// Keys not named in the update are copied unchanged. A removed key leaves
/// the order of the remaining keys intact; a replaced key keeps its position;
/// a new key is appended.
pub fn apply_update(original: &Manifest, update: &ManifestUpdate) -> Manifest {
    let mut result = original.as_map().clone();

    for (key, field) in update.iter() {
        match field {
            FieldUpdate::Remove => {
                result.shift_remove(key);
            }
            FieldUpdate::Set(value) => {
                let merged = match (result.get(key), value) {
                    (Some(Value::Object(existing)), Value::Object(incoming)) => {
                        Value::Object(shallow_merge(existing, incoming))
                    }
                    _ => value.clone(),
                };
                result.insert(key.to_string(), merged);
            }
        }
    }

    Manifest::from(result)
}

/// Overlays `incoming` keys on `existing`. Nested objects are not merged further.
fn shallow_merge(existing: &Map<String, Value>, incoming: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = existing.clone();
    for (k, v) in incoming {
        merged.insert(k.clone(), v.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn manifest(value: Value) -> Manifest {
        Manifest::try_from(value).unwrap()
    }

    #[test]
    fn test_untouched_keys_are_identical() {
        let original = manifest(json!({
            "name": "ext",
            "scripts": { "build": "tsc", "nested": { "deep": [1, 2, 3] } },
            "custom": null
        }));
        let updated = apply_update(&original, &ManifestUpdate::new().set("name", "renamed"));

        assert_eq!(updated.get("name"), Some(&json!("renamed")));
        assert_eq!(updated.get("scripts"), original.get("scripts"));
        assert_eq!(updated.get("custom"), Some(&Value::Null));
    }

    #[test]
    fn test_shallow_merge_one_level() {
        let original = manifest(json!({ "a": { "x": 1, "y": 2 } }));
        let updated = apply_update(&original, &ManifestUpdate::new().set("a", json!({ "y": 9 })));
        assert_eq!(Value::from(updated.clone()), json!({ "a": { "x": 1, "y": 9 } }));

        let again = apply_update(&updated, &ManifestUpdate::new().set("a", json!({ "z": { "w": 1 } })));
        assert_eq!(
            Value::from(again.clone()),
            json!({ "a": { "x": 1, "y": 9, "z": { "w": 1 } } })
        );

        let replaced = apply_update(&again, &ManifestUpdate::new().set("a", json!({ "z": { "v": 2 } })));
        assert_eq!(
            Value::from(replaced),
            json!({ "a": { "x": 1, "y": 9, "z": { "v": 2 } } })
        );
    }

    #[test]
    fn test_arrays_replace_wholesale() {
        let original = manifest(json!({ "keywords": ["a", "b", "c"] }));
        let updated = apply_update(&original, &ManifestUpdate::new().set("keywords", json!(["z"])));
        assert_eq!(updated.get("keywords"), Some(&json!(["z"])));
    }

    #[test]
    fn test_object_replaces_non_object() {
        let original = manifest(json!({ "repository": "https://example.com/repo" }));
        let updated = apply_update(
            &original,
            &ManifestUpdate::new().set("repository", json!({ "type": "git", "url": "u" })),
        );
        assert_eq!(updated.get("repository"), Some(&json!({ "type": "git", "url": "u" })));

        let original = manifest(json!({ "engines": { "vscode": "^1.0.0" } }));
        let updated = apply_update(&original, &ManifestUpdate::new().set("engines", Value::Null));
        assert_eq!(updated.get("engines"), Some(&Value::Null));
    }

    #[test]
    fn test_remove_deletes_key_and_keeps_order() {
        let original = manifest(json!({ "a": 1, "b": 2, "c": 3 }));
        let updated = apply_update(&original, &ManifestUpdate::new().remove("a"));
        assert!(!updated.contains_key("a"));
        let keys: Vec<&str> = updated.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "c"]);

        let untouched = apply_update(&original, &ManifestUpdate::new().remove("missing"));
        assert_eq!(untouched, original);
    }

    #[test]
    fn test_replaced_key_keeps_position_new_key_appended() {
        let original = manifest(json!({ "a": 1, "b": 2 }));
        let updated = apply_update(
            &original,
            &ManifestUpdate::new().set("new", true).set("a", 10),
        );
        let keys: Vec<&str> = updated.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "new"]);
        assert_eq!(updated.get("a"), Some(&json!(10)));
    }

    #[test]
    fn test_original_is_not_mutated() {
        let original = manifest(json!({ "a": { "x": 1 } }));
        let snapshot = original.clone();
        let _ = apply_update(
            &original,
            &ManifestUpdate::new().set("a", json!({ "x": 2 })).remove("a"),
        );
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_last_write_for_a_key_wins() {
        let update = ManifestUpdate::new().set("a", 1).set("b", 2).remove("a");
        assert_eq!(update.len(), 2);
        let fields: Vec<(&str, &FieldUpdate)> = update.iter().collect();
        assert_eq!(fields[0], ("a", &FieldUpdate::Remove));
    }

    #[test]
    fn test_from_map_sets_every_entry() {
        let map = json!({ "name": "x", "preview": false });
        let update = ManifestUpdate::from(map.as_object().unwrap().clone());
        assert_eq!(update.len(), 2);
        assert!(update.iter().all(|(_, f)| matches!(f, FieldUpdate::Set(_))));
    }
}
