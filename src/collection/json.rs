//! Dynamic JSON input for [`OrderedMap`].
//!
//! These operations accept `serde_json::Value`s whose shape is only known at
//! runtime. The shape is validated before the map is touched.

use std::hash::BuildHasher;

use serde_json::Value;

use super::error::Result;
use super::ordered_map::OrderedMap;
use super::source::json::{entries_for_construction, entries_for_merge, key_of};

impl OrderedMap<String, Value> {
    /// Builds a map from a JSON value.
    ///
    /// | Shape                              | Entries                        |
    /// |------------------------------------|--------------------------------|
    /// | object                             | its members, in document order |
    /// | array of `[key, value]` pairs only | those pairs                    |
    /// | any other array                    | elements keyed `"0"`, `"1"`, … |
    /// | string                             | characters keyed by position   |
    ///
    /// Pair keys that are not strings are converted to their JSON text.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::UnsupportedSource`] for `null`, booleans and
    ///   numbers.
    /// - [`CollectionError::InvalidKey`] if a pair's key is `null`.
    ///
    /// [`CollectionError::UnsupportedSource`]: crate::collection::CollectionError::UnsupportedSource
    /// [`CollectionError::InvalidKey`]: crate::collection::CollectionError::InvalidKey
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    /// use serde_json::json;
    ///
    /// let map = OrderedMap::from_json(json!({"b": 2, "a": 1})).unwrap();
    /// assert_eq!(map.first_keys(2).into_vec(), vec!["b".to_string(), "a".to_string()]);
    ///
    /// let pairs = OrderedMap::from_json(json!([[1, "one"], [2, "two"]])).unwrap();
    /// assert_eq!(pairs.get("2"), Some(&json!("two")));
    ///
    /// assert!(OrderedMap::from_json(json!(42)).is_err());
    /// ```
    pub fn from_json(source: Value) -> Result<Self> {
        Ok(entries_for_construction(source)?.into_iter().collect())
    }

    /// Builds a map from a JSON value, transforming every element with
    /// `map_fn(element, key)`.
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json).
    pub fn from_json_with<F>(source: Value, mut map_fn: F) -> Result<Self>
    where
        F: FnMut(Value, &String) -> Value,
    {
        let entries = entries_for_construction(source)?;
        let mut map = Self::with_capacity(entries.len());
        for (key, element) in entries {
            let value = map_fn(element, &key);
            map.set(key, value);
        }
        Ok(map)
    }
}

impl<S> OrderedMap<String, Value, S>
where
    S: BuildHasher + Clone,
{
    /// Stores `value` under a JSON key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidKey`] if `key` is `null`; the map is
    /// left unchanged.
    ///
    /// [`CollectionError::InvalidKey`]: crate::collection::CollectionError::InvalidKey
    pub fn set_json_key(&mut self, key: &Value, value: Value) -> Result<&mut Self> {
        let key = key_of(key, "set")?;
        Ok(self.set(key, value))
    }

    /// Merges a JSON object or array of `[key, value]` pairs with overwrite
    /// semantics. Array elements that are not pairs are skipped.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::UnsupportedSource`] if `source` is neither an
    ///   object nor an array.
    /// - [`CollectionError::InvalidKey`] if a pair's key is `null`.
    ///
    /// Nothing is merged when an error is returned.
    ///
    /// [`CollectionError::UnsupportedSource`]: crate::collection::CollectionError::UnsupportedSource
    /// [`CollectionError::InvalidKey`]: crate::collection::CollectionError::InvalidKey
    pub fn add_json(&mut self, source: Value) -> Result<&mut Self> {
        let entries = entries_for_merge(source)?;
        Ok(self.add_map(entries))
    }

    /// Like [`add_json`](Self::add_json), but combines colliding values with
    /// `reducer(incoming, existing, key, self)`.
    ///
    /// # Errors
    ///
    /// Same as [`add_json`](Self::add_json).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    /// use serde_json::{Value, json};
    ///
    /// let mut tags = OrderedMap::from_json(json!({"x": ["a"]})).unwrap();
    /// tags.add_json_with(json!([["x", ["b"]], "ignored", ["y", []]]), |incoming, existing, _, _| {
    ///     let mut merged = existing.as_array().cloned().unwrap_or_default();
    ///     merged.extend(incoming.as_array().cloned().unwrap_or_default());
    ///     Value::Array(merged)
    /// })
    /// .unwrap();
    /// assert_eq!(tags.get("x"), Some(&json!(["a", "b"])));
    /// assert_eq!(tags.len(), 2);
    /// ```
    pub fn add_json_with<F>(&mut self, source: Value, reducer: F) -> Result<&mut Self>
    where
        F: FnMut(Value, &Value, &String, &Self) -> Value,
    {
        let entries = entries_for_merge(source)?;
        Ok(self.add_map_with(entries, reducer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionError;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_from_json_object_keeps_document_order() {
        let map = OrderedMap::from_json(json!({"z": 1, "a": 2, "m": 3})).unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[rstest]
    fn test_from_json_bare_values_are_auto_indexed() {
        let map = OrderedMap::from_json(json!(["x", "y"])).unwrap();
        assert_eq!(map.get("0"), Some(&json!("x")));
        assert_eq!(map.get("1"), Some(&json!("y")));
    }

    #[rstest]
    fn test_from_json_with_transforms_values() {
        let map = OrderedMap::from_json_with(json!("ab"), |value, key| {
            json!(format!("{key}:{}", value.as_str().unwrap_or_default()))
        })
        .unwrap();
        assert_eq!(map.get("1"), Some(&json!("1:b")));
    }

    #[rstest]
    fn test_from_json_null_pair_key_is_invalid() {
        let result = OrderedMap::from_json(json!([[null, 1], ["a", 2]]));
        assert_eq!(
            result.unwrap_err(),
            CollectionError::InvalidKey {
                operation: "from_json"
            }
        );
    }

    #[rstest]
    fn test_set_json_key() {
        let mut map = OrderedMap::from_json(json!({})).unwrap();
        map.set_json_key(&json!(7), json!("seven")).unwrap();
        assert_eq!(map.get("7"), Some(&json!("seven")));

        let error = map.set_json_key(&Value::Null, json!(0)).unwrap_err();
        assert_eq!(error, CollectionError::InvalidKey { operation: "set" });
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_add_json_overwrites_in_place() {
        let mut map = OrderedMap::from_json(json!({"a": 1, "b": 2})).unwrap();
        map.add_json(json!({"a": 10, "c": 3})).unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(map.get("a"), Some(&json!(10)));
    }

    #[rstest]
    fn test_add_json_rejected_source_leaves_map_untouched() {
        let mut map = OrderedMap::from_json(json!({"a": 1})).unwrap();
        assert!(map.add_json(json!("text")).is_err());
        assert!(map.add_json(json!([["b", 2], [null, 3]])).is_err());
        assert_eq!(map.len(), 1);
        assert!(!map.has("b"));
    }

    #[rstest]
    fn test_to_json_round_trip() {
        let original = OrderedMap::from_json(json!({"k1": [1, 2], "k0": null})).unwrap();
        let restored = OrderedMap::from_json(Value::Object(original.to_json().unwrap())).unwrap();
        assert_eq!(original, restored);
    }
}
