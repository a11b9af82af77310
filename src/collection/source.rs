//! Input shapes accepted when building an [`OrderedMap`].
//!
//! Statically typed sources go through [`Source`]. Dynamically shaped input
//! (a `serde_json::Value`) is classified here at runtime, which is the only
//! place where [`CollectionError::UnsupportedSource`] and
//! [`CollectionError::InvalidKey`] can arise.
//!
//! [`OrderedMap`]: crate::collection::OrderedMap
//! [`CollectionError::UnsupportedSource`]: crate::collection::CollectionError::UnsupportedSource
//! [`CollectionError::InvalidKey`]: crate::collection::CollectionError::InvalidKey

use std::collections::BTreeMap;

/// A statically typed source of entries.
///
/// # Examples
///
/// ```rust
/// use orderly::collection::{OrderedMap, Source};
///
/// let letters: OrderedMap<usize, char> = OrderedMap::from_source(Source::Values(vec!['x', 'y']));
/// assert_eq!(letters.get(&1), Some(&'y'));
///
/// let pairs: OrderedMap<usize, &str> =
///     OrderedMap::from_source(Source::Entries(vec![(10, "ten"), (2, "two")]));
/// assert_eq!(pairs.first(), Some((&10, &"ten")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source<K, V> {
    /// Key-value pairs, taken in order. Later pairs overwrite earlier ones
    /// with the same key.
    Entries(Vec<(K, V)>),
    /// Bare values, keyed by their position.
    Values(Vec<V>),
}

impl<K: IndexKey, V> Source<K, V> {
    pub(crate) fn into_entries(self) -> Vec<(K, V)> {
        match self {
            Self::Entries(entries) => entries,
            Self::Values(values) => values
                .into_iter()
                .enumerate()
                .map(|(index, value)| (K::from_index(index), value))
                .collect(),
        }
    }
}

impl<K, V> From<Vec<(K, V)>> for Source<K, V> {
    fn from(entries: Vec<(K, V)>) -> Self {
        Self::Entries(entries)
    }
}

impl<K, V> From<BTreeMap<K, V>> for Source<K, V> {
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::Entries(map.into_iter().collect())
    }
}

/// Key types that can be generated from a position.
///
/// Used when a map is built from bare values or from a length.
pub trait IndexKey {
    /// Builds the key for the element at `index`.
    fn from_index(index: usize) -> Self;
}

impl IndexKey for usize {
    #[inline]
    fn from_index(index: usize) -> Self {
        index
    }
}

/// Positions past the key type's range saturate at its maximum.
macro_rules! impl_saturating_index_key {
    ($($key:ty),*) => {
        $(
            impl IndexKey for $key {
                #[inline]
                fn from_index(index: usize) -> Self {
                    Self::try_from(index).unwrap_or(Self::MAX)
                }
            }
        )*
    };
}

impl_saturating_index_key!(u32, u64, i32, i64);

impl IndexKey for String {
    #[inline]
    fn from_index(index: usize) -> Self {
        index.to_string()
    }
}

#[cfg(feature = "json")]
pub(crate) mod json {
    use serde_json::Value;

    use crate::collection::error::{CollectionError, Result};

    /// Converts a JSON key into its string form. `null` is not a key.
    pub(crate) fn key_of(key: &Value, operation: &'static str) -> Result<String> {
        match key {
            Value::Null => Err(CollectionError::InvalidKey { operation }),
            Value::String(text) => Ok(text.clone()),
            other => Ok(other.to_string()),
        }
    }

    fn as_pair(element: &Value) -> Option<(&Value, &Value)> {
        match element {
            Value::Array(pair) if pair.len() == 2 => Some((&pair[0], &pair[1])),
            _ => None,
        }
    }

    const fn shape_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }

    fn indexed<I: IntoIterator<Item = Value>>(values: I) -> Vec<(String, Value)> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value))
            .collect()
    }

    /// Classifies a constructor source.
    ///
    /// - object: its members, in document order
    /// - array whose elements are all `[key, value]` pairs: those pairs
    /// - any other array: its elements keyed by position
    /// - string: its characters keyed by position
    pub(crate) fn entries_for_construction(source: Value) -> Result<Vec<(String, Value)>> {
        match source {
            Value::Object(object) => Ok(object.into_iter().collect()),
            Value::Array(elements) => {
                if !elements.is_empty() && elements.iter().all(|element| as_pair(element).is_some())
                {
                    elements
                        .iter()
                        .filter_map(as_pair)
                        .map(|(key, value)| Ok((key_of(key, "from_json")?, value.clone())))
                        .collect()
                } else {
                    Ok(indexed(elements))
                }
            }
            Value::String(text) => Ok(indexed(
                text.chars().map(|character| Value::String(character.to_string())),
            )),
            other => Err(CollectionError::UnsupportedSource {
                found: shape_name(&other),
            }),
        }
    }

    /// Classifies a merge source. Array elements that are not
    /// `[key, value]` pairs are skipped.
    pub(crate) fn entries_for_merge(source: Value) -> Result<Vec<(String, Value)>> {
        match source {
            Value::Object(object) => Ok(object.into_iter().collect()),
            Value::Array(elements) => elements
                .iter()
                .filter_map(as_pair)
                .map(|(key, value)| Ok((key_of(key, "add_json")?, value.clone())))
                .collect(),
            other => Err(CollectionError::UnsupportedSource {
                found: shape_name(&other),
            }),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use rstest::rstest;
        use serde_json::json;

        #[rstest]
        #[case(json!("k"), "k")]
        #[case(json!(1), "1")]
        #[case(json!(true), "true")]
        #[case(json!([1, 2]), "[1,2]")]
        fn test_key_of(#[case] key: Value, #[case] expected: &str) {
            assert_eq!(key_of(&key, "set").unwrap(), expected);
        }

        #[rstest]
        fn test_key_of_null_is_invalid() {
            assert_eq!(
                key_of(&Value::Null, "set"),
                Err(CollectionError::InvalidKey { operation: "set" })
            );
        }

        #[rstest]
        fn test_construction_from_pairs() {
            let entries = entries_for_construction(json!([["a", 1], ["b", 2]])).unwrap();
            assert_eq!(
                entries,
                vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))]
            );
        }

        #[rstest]
        fn test_construction_from_mixed_array_indexes_everything() {
            let entries = entries_for_construction(json!([["a", 1], 5])).unwrap();
            assert_eq!(
                entries,
                vec![("0".to_string(), json!(["a", 1])), ("1".to_string(), json!(5))]
            );
        }

        #[rstest]
        fn test_construction_from_string_is_array_like() {
            let entries = entries_for_construction(json!("hi")).unwrap();
            assert_eq!(
                entries,
                vec![("0".to_string(), json!("h")), ("1".to_string(), json!("i"))]
            );
        }

        #[rstest]
        #[case(Value::Null, "null")]
        #[case(json!(false), "a boolean")]
        #[case(json!(3.5), "a number")]
        fn test_construction_rejects_scalars(#[case] source: Value, #[case] found: &'static str) {
            assert_eq!(
                entries_for_construction(source),
                Err(CollectionError::UnsupportedSource { found })
            );
        }

        #[rstest]
        fn test_merge_skips_non_pairs() {
            let entries = entries_for_merge(json!([["a", 1], "junk", [1, 2, 3], ["b", 2]])).unwrap();
            assert_eq!(
                entries,
                vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))]
            );
        }

        #[rstest]
        fn test_merge_null_key_is_invalid() {
            assert_eq!(
                entries_for_merge(json!([[null, 1]])),
                Err(CollectionError::InvalidKey {
                    operation: "add_json"
                })
            );
        }
    }
}
