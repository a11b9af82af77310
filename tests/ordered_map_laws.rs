//! Property-based tests for OrderedMap.
//!
//! This module verifies that OrderedMap keeps its ordering and size
//! invariants under arbitrary sequences of operations using proptest.

use orderly::collection::OrderedMap;
use proptest::prelude::*;
use std::collections::HashSet;

// =============================================================================
// Strategy for generating test data
// =============================================================================

fn arbitrary_key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}".prop_map(|s| s)
}

fn arbitrary_value() -> impl Strategy<Value = i32> {
    any::<i32>()
}

fn arbitrary_entries() -> impl Strategy<Value = Vec<(String, i32)>> {
    prop::collection::vec((arbitrary_key(), arbitrary_value()), 0..40)
}

fn distinct_entries() -> impl Strategy<Value = Vec<(String, i32)>> {
    arbitrary_entries().prop_map(|entries| {
        let mut seen = HashSet::new();
        entries
            .into_iter()
            .filter(|(key, _)| seen.insert(key.clone()))
            .collect()
    })
}

fn first_occurrence_order(entries: &[(String, i32)]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|(key, _)| seen.insert(key.clone()))
        .map(|(key, _)| key.clone())
        .collect()
}

fn assert_index_consistent(map: &OrderedMap<String, i32>) -> Result<(), TestCaseError> {
    for (expected, (key, _)) in map.iter().enumerate() {
        prop_assert_eq!(map.position(key), Some(expected));
    }
    Ok(())
}

// =============================================================================
// Set-Get Law: after map.set(k, v), map.has(k) and map.get(k) == Some(v)
// =============================================================================

proptest! {
    #[test]
    fn prop_set_get_law(
        entries in arbitrary_entries(),
        key in arbitrary_key(),
        value in arbitrary_value()
    ) {
        let mut map: OrderedMap<String, i32> = entries.into_iter().collect();
        map.set(key.clone(), value);

        prop_assert!(map.has(&key));
        prop_assert_eq!(map.get(&key), Some(&value));
    }
}

// =============================================================================
// Absent-Key Law: keys never inserted are not reported present
// =============================================================================

proptest! {
    #[test]
    fn prop_absent_key_law(entries in arbitrary_entries()) {
        let map: OrderedMap<String, i32> = entries.into_iter().collect();
        prop_assert!(!map.has("UPPER"));
        prop_assert_eq!(map.get("UPPER"), None);
    }
}

// =============================================================================
// Insertion-Order Law: keys come back in first-insertion order
// =============================================================================

proptest! {
    #[test]
    fn prop_insertion_order_law(entries in arbitrary_entries()) {
        let map: OrderedMap<String, i32> = entries.iter().cloned().collect();
        let keys: Vec<String> = map.keys().cloned().collect();

        prop_assert_eq!(keys, first_occurrence_order(&entries));
    }
}

// =============================================================================
// Size Law: len equals the number of distinct keys
// =============================================================================

proptest! {
    #[test]
    fn prop_size_law(entries in arbitrary_entries()) {
        let distinct: HashSet<&String> = entries.iter().map(|(key, _)| key).collect();
        let map: OrderedMap<String, i32> = entries.iter().cloned().collect();

        prop_assert_eq!(map.len(), distinct.len());
    }
}

// =============================================================================
// Delete Law: deleting a present key shrinks by one, an absent key by zero
// =============================================================================

proptest! {
    #[test]
    fn prop_delete_law(entries in arbitrary_entries(), key in arbitrary_key()) {
        let mut map: OrderedMap<String, i32> = entries.into_iter().collect();
        let before = map.len();
        let present = map.has(&key);

        let removed = map.delete_all([key.as_str()]);

        prop_assert_eq!(removed, usize::from(present));
        prop_assert_eq!(map.len(), before - removed);
        prop_assert!(!map.has(&key));
        assert_index_consistent(&map)?;
    }
}

// =============================================================================
// Filter and Partition Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_filter_counts_matches(entries in arbitrary_entries(), threshold in arbitrary_value()) {
        let map: OrderedMap<String, i32> = entries.into_iter().collect();
        let expected = map.values().filter(|value| **value > threshold).count();

        prop_assert_eq!(map.filter(|value, _, _| *value > threshold).len(), expected);
    }

    #[test]
    fn prop_partition_is_disjoint_and_complete(
        entries in arbitrary_entries(),
        threshold in arbitrary_value()
    ) {
        let map: OrderedMap<String, i32> = entries.into_iter().collect();
        let (matches, rest) = map.partition(|value, _, _| *value > threshold);

        prop_assert_eq!(matches.len() + rest.len(), map.len());
        prop_assert!(matches.keys().all(|key| !rest.has(key)));
    }
}

// =============================================================================
// Sort Idempotence Law
// =============================================================================

proptest! {
    #[test]
    fn prop_sort_idempotent(entries in arbitrary_entries()) {
        let mut map: OrderedMap<String, i32> = entries.into_iter().collect();
        map.sort(|a, b, _, _| a.cmp(b));
        let once = map.clone();
        map.sort(|a, b, _, _| a.cmp(b));

        prop_assert_eq!(&map, &once);
        assert_index_consistent(&map)?;
    }
}

// =============================================================================
// Splice Length Law: new = old - deleted + inserted (for fresh keys)
// =============================================================================

proptest! {
    #[test]
    fn prop_splice_length_law(
        entries in distinct_entries(),
        start in -50_isize..50,
        delete_count in 0_usize..50,
        inserted in 0_usize..5
    ) {
        let mut map: OrderedMap<String, i32> = entries.into_iter().collect();
        let before = map.len();
        let items: Vec<(String, i32)> = (0..inserted)
            .map(|index| (format!("NEW{index}"), 0))
            .collect();

        let removed = map.splice(start, delete_count, items);

        prop_assert!(removed.len() <= delete_count);
        prop_assert_eq!(map.len(), before - removed.len() + inserted);
        prop_assert!(removed.keys().all(|key| !map.has(key)));
        assert_index_consistent(&map)?;
    }
}

// =============================================================================
// Slice Law: slice matches the corresponding Vec slice
// =============================================================================

proptest! {
    #[test]
    fn prop_slice_matches_vec_slice(
        entries in distinct_entries(),
        start in 0_usize..45,
        end in 0_usize..45
    ) {
        let map: OrderedMap<String, i32> = entries.iter().cloned().collect();
        let start_bound = start.min(entries.len());
        let end_bound = end.min(entries.len());
        let expected: Vec<String> = if start_bound < end_bound {
            entries[start_bound..end_bound].iter().map(|(key, _)| key.clone()).collect()
        } else {
            Vec::new()
        };

        let sliced = map.slice(
            isize::try_from(start).unwrap(),
            Some(isize::try_from(end).unwrap()),
        );
        let keys: Vec<String> = sliced.keys().cloned().collect();
        prop_assert_eq!(keys, expected);
    }
}

// =============================================================================
// JSON Round-Trip Law
// =============================================================================

#[cfg(feature = "json")]
proptest! {
    #[test]
    fn prop_json_round_trip(entries in arbitrary_entries()) {
        use serde_json::Value;

        let map: OrderedMap<String, Value> = entries
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect();
        let object = map.to_json().unwrap();
        let restored = OrderedMap::from_json(Value::Object(object)).unwrap();

        prop_assert_eq!(restored, map);
    }
}
