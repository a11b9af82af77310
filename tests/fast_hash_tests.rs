//! Tests for the hasher feature flags.
//!
//! Whichever hasher `fxhash` or `ahash` selects, the key index must stay
//! consistent with the entry order. The same checks run under the default
//! SipHash build.

use orderly::collection::{DefaultBuildHasher, OrderedMap};
use rstest::rstest;
use std::hash::BuildHasher;

// =============================================================================
// Determinism
// =============================================================================

#[rstest]
fn test_default_hasher_builds_maps() {
    let mut map: OrderedMap<i32, i32, DefaultBuildHasher> =
        OrderedMap::with_hasher(DefaultBuildHasher::default());
    map.set(42, 100);
    assert_eq!(map.get(&42), Some(&100));
}

#[rstest]
fn test_identical_inputs_behave_identically() {
    let entries: Vec<(String, i32)> = ["alpha", "beta", "gamma", "delta"]
        .into_iter()
        .zip(1..)
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    let first: OrderedMap<String, i32> = entries.iter().cloned().collect();
    let second: OrderedMap<String, i32> = entries.iter().cloned().collect();

    assert_eq!(first, second);
    for (key, value) in &entries {
        assert_eq!(first.get(key), Some(value));
    }
}

#[rstest]
fn test_builder_is_deterministic_per_instance() {
    let builder = DefaultBuildHasher::default();
    assert_eq!(builder.hash_one("ordered"), builder.hash_one("ordered"));
}

// =============================================================================
// Large Scale
// =============================================================================

#[rstest]
fn test_large_scale_insert_and_position() {
    let map: OrderedMap<u32, u32> = (0..10_000).rev().map(|key| (key, key * 2)).collect();
    assert_eq!(map.len(), 10_000);
    assert_eq!(map.position(&9_999), Some(0));
    assert_eq!(map.position(&0), Some(9_999));
    assert_eq!(map.get(&1_234), Some(&2_468));
}

#[rstest]
fn test_large_scale_delete_where_keeps_index() {
    let mut map: OrderedMap<String, usize> = (0..2_000).map(|n| (format!("key{n}"), n)).collect();
    let removed = map.delete_where(|value, _, _, _| value % 3 == 0);
    assert_eq!(removed, 667);
    for (expected, (key, _)) in map.iter().enumerate() {
        assert_eq!(map.position(key), Some(expected));
    }
}

// =============================================================================
// Edge Case Keys
// =============================================================================

#[rstest]
#[case("")]
#[case("key")]
#[case("key ")]
#[case("key\n")]
#[case("キー")]
#[case("🦀")]
fn test_unusual_string_keys(#[case] key: &str) {
    let mut map: OrderedMap<String, usize> = OrderedMap::new();
    map.set("neighbour".to_string(), 0);
    map.set(key.to_string(), 1);
    assert_eq!(map.get(key), Some(&1));
    assert_eq!(map.position(key), Some(1));
}

#[rstest]
fn test_boundary_integer_keys() {
    let map = OrderedMap::from([(i64::MIN, "min"), (0, "zero"), (i64::MAX, "max"), (-1, "neg")]);
    assert_eq!(map.get(&i64::MIN), Some(&"min"));
    assert_eq!(map.get(&i64::MAX), Some(&"max"));
    assert_eq!(map.at(-1), Some((&-1, &"neg")));
}
