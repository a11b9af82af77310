//! Insertion-ordered map with array-like query and transform methods.
//!
//! This module provides [`OrderedMap`], a mutable key-value container that
//! remembers the order in which keys were first inserted.
//!
//! # Overview
//!
//! `OrderedMap` is a composition of two parts:
//! - a `Vec<(K, V)>` holding the entries in their logical order
//! - a `HashMap<K, usize>` from each key to its position in that `Vec`
//!
//! Updating the value of an existing key keeps its position. Only
//! [`sort`](OrderedMap::sort) and [`splice`](OrderedMap::splice) move
//! entries around.
//!
//! # Time Complexity
//!
//! | Operation                          | Complexity |
//! |------------------------------------|------------|
//! | `get` / `has` / `set`              | O(1)*      |
//! | `delete`                           | O(n)       |
//! | `at` / `first` / `last`            | O(1)       |
//! | `sort`                             | O(n log n) |
//! | `slice` / `splice` / `delete_where`| O(n)       |
//!
//! *amortized, expected
//!
//! Every operation that reorders or removes entries rebuilds the position
//! index, so the map targets small-to-moderate collections.
//!
//! # Examples
//!
//! ```rust
//! use orderly::collection::OrderedMap;
//!
//! let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
//! map.set("c", 3);
//!
//! let head = map.first_n(2);
//! assert_eq!(head.collect_keys().into_vec(), vec!["a", "b"]);
//! assert_eq!(map.last(), Some((&"c", &3)));
//!
//! // Updating a value keeps the key where it was
//! map.set("a", 10);
//! assert_eq!(map.first(), Some((&"a", &10)));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::{FromIterator, FusedIterator};

use rand::Rng;
use rand::seq::SliceRandom;

use super::hash::DefaultBuildHasher;
use super::sequence::Sequence;
use super::source::{IndexKey, Source};

// =============================================================================
// Position helpers
// =============================================================================

/// Resolves a slice bound: negative values count from the end, and the
/// result is clamped into `[0, length]`.
fn resolve_bound(index: isize, length: usize) -> usize {
    if index < 0 {
        length.saturating_sub(index.unsigned_abs())
    } else {
        index.unsigned_abs().min(length)
    }
}

/// Resolves an element position for a non-empty collection: the index is
/// clamped into `[-length, length - 1]`, then negative values count from
/// the end.
fn resolve_position(index: isize, length: usize) -> usize {
    debug_assert!(length > 0);
    if index < 0 {
        length.saturating_sub(index.unsigned_abs())
    } else {
        index.unsigned_abs().min(length - 1)
    }
}

// =============================================================================
// KeyPresence
// =============================================================================

/// Result of checking several keys at once with
/// [`OrderedMap::has_each`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPresence {
    /// One flag per queried key, in query order.
    pub results: Sequence<bool>,
    /// `true` if every queried key is present (vacuously `true` for no keys).
    pub has_all: bool,
    /// `true` if at least one queried key is present.
    pub has_any: bool,
}

// =============================================================================
// OrderedMap
// =============================================================================

/// A map that preserves the insertion order of its keys.
///
/// # Type Parameters
///
/// * `K` - The key type. Must implement `Hash`, `Eq` and `Clone`.
/// * `V` - The value type.
/// * `S` - The hasher for the key index; see
///   [`DefaultBuildHasher`](crate::collection::DefaultBuildHasher).
///
/// # Examples
///
/// ```rust
/// use orderly::collection::OrderedMap;
///
/// let mut scores: OrderedMap<&str, u32> = OrderedMap::new();
/// scores.set("carol", 92).set("alice", 100).set("bob", 85);
///
/// // Iteration follows insertion order, not key order
/// let names: Vec<&str> = scores.keys().copied().collect();
/// assert_eq!(names, vec!["carol", "alice", "bob"]);
///
/// // Negative positions count from the end
/// assert_eq!(scores.at(-1), Some((&"bob", &85)));
///
/// scores.sort(|a, b, _, _| b.cmp(a));
/// assert_eq!(scores.first(), Some((&"alice", &100)));
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, S = DefaultBuildHasher> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize, S>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a new empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultBuildHasher::default())
    }

    /// Creates an empty map with room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultBuildHasher::default())
    }

    /// Builds a map from a [`Source`].
    ///
    /// Pairs are applied in order with overwrite semantics: a repeated key
    /// keeps its first position and takes the last value. Bare values are
    /// keyed by their position.
    pub fn from_source(source: Source<K, V>) -> Self
    where
        K: IndexKey,
    {
        source.into_entries().into_iter().collect()
    }

    /// Builds a map from a [`Source`], transforming every element with
    /// `map_fn(element, key)` on the way in.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::{OrderedMap, Source};
    ///
    /// let lengths: OrderedMap<usize, usize> =
    ///     OrderedMap::from_source_with(Source::Values(vec!["one", "three"]), |word, _| word.len());
    /// assert_eq!(lengths.collect_values().into_vec(), vec![3, 5]);
    /// ```
    pub fn from_source_with<T, F>(source: Source<K, T>, mut map_fn: F) -> Self
    where
        K: IndexKey,
        F: FnMut(T, &K) -> V,
    {
        let entries = source.into_entries();
        let mut map = Self::with_capacity(entries.len());
        for (key, element) in entries {
            let value = map_fn(element, &key);
            map.set(key, value);
        }
        map
    }

    /// Builds a map of `length` entries whose keys are generated from their
    /// positions and whose values come from `generator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    ///
    /// let squares: OrderedMap<usize, usize> = OrderedMap::from_length(4, |index| index * index);
    /// assert_eq!(squares.get(&3), Some(&9));
    /// ```
    pub fn from_length<F>(length: usize, mut generator: F) -> Self
    where
        K: IndexKey,
        F: FnMut(&K) -> V,
    {
        let mut map = Self::with_capacity(length);
        for index in 0..length {
            let key = K::from_index(index);
            let value = generator(&key);
            map.set(key, value);
        }
        map
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Creates an empty map that hashes keys with `hasher`.
    #[inline]
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::with_hasher(hasher),
        }
    }

    /// Creates an empty map with room for `capacity` entries that hashes keys
    /// with `hasher`.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    /// Builds an empty map sharing this map's hasher, then fills it.
    fn derive<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_hasher(self.index.hasher().clone());
        map.set_all(entries);
        map
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, (key, _)) in self.entries.iter().enumerate() {
            self.index.insert(key.clone(), position);
        }
        tracing::trace!(length = self.entries.len(), "rebuilt key index");
    }

    fn reindex_from(&mut self, start: usize) {
        for (position, (key, _)) in self.entries.iter().enumerate().skip(start) {
            if let Some(slot) = self.index.get_mut(key) {
                *slot = position;
            }
        }
    }

    // =========================================================================
    // Size and iteration
    // =========================================================================

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Returns an iterator over the entries in order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the entries in order, with mutable values.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (&K, &mut V)> + ExactSizeIterator {
        self.entries.iter_mut().map(|(key, value)| (&*key, value))
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over mutable references to the values in order.
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// Collects the keys into a [`Sequence`].
    #[must_use]
    pub fn collect_keys(&self) -> Sequence<K> {
        self.keys().cloned().collect()
    }

    /// Collects the values into a [`Sequence`].
    #[must_use]
    pub fn collect_values(&self) -> Sequence<V>
    where
        V: Clone,
    {
        self.values().cloned().collect()
    }

    /// Collects the entries into a [`Sequence`] of pairs.
    #[must_use]
    pub fn collect_entries(&self) -> Sequence<(K, V)>
    where
        V: Clone,
    {
        self.entries.iter().cloned().collect()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns the value stored under `key`, or `None`.
    ///
    /// A stored value is always `Some`, so a value that is itself "empty"
    /// (for example `Option::None`) is never confused with a missing key.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|&position| &self.entries[position].1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = *self.index.get(key)?;
        Some(&mut self.entries[position].1)
    }

    /// Returns the position of `key` in iteration order.
    #[inline]
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Checks several keys at once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// let presence = map.has_each(&["a", "z"]);
    /// assert_eq!(presence.results.into_vec(), vec![true, false]);
    /// assert!(!presence.has_all);
    /// assert!(presence.has_any);
    /// ```
    pub fn has_each<'q, Q, I>(&self, keys: I) -> KeyPresence
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let results: Sequence<bool> = keys.into_iter().map(|key| self.has(key)).collect();
        let has_all = results.iter().all(|&present| present);
        let has_any = results.iter().any(|&present| present);
        KeyPresence {
            results,
            has_all,
            has_any,
        }
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Stores `value` under `key`.
    ///
    /// A new key is appended at the end; an existing key keeps its position
    /// and has its value replaced.
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        if let Some(&position) = self.index.get(&key) {
            self.entries[position].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
        self
    }

    /// Stores every pair of `source` with overwrite semantics.
    pub fn set_all<I>(&mut self, source: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in source {
            self.set(key, value);
        }
        self
    }

    /// Returns the value under `key`, first storing `generator(&key, self)`
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    ///
    /// let mut counts: OrderedMap<&str, usize> = OrderedMap::new();
    /// *counts.ensure("hits", |_, _| 0) += 1;
    /// *counts.ensure("hits", |_, _| 0) += 1;
    /// assert_eq!(counts.get("hits"), Some(&2));
    /// ```
    pub fn ensure<F>(&mut self, key: K, generator: F) -> &mut V
    where
        F: FnOnce(&K, &Self) -> V,
    {
        let position = if let Some(position) = self.position(&key) {
            position
        } else {
            let value = generator(&key, &*self);
            self.set(key, value);
            self.entries.len() - 1
        };
        &mut self.entries[position].1
    }

    /// Merges `source` into the map with overwrite semantics.
    pub fn add_map<I>(&mut self, source: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.set_all(source)
    }

    /// Merges `source` into the map. For keys already present the stored
    /// value becomes `reducer(incoming, existing, key, self)`.
    ///
    /// Every reducer call sees the map as it was before the merge, so
    /// `existing` is always the pre-merge value. A key that was absent
    /// before the call is never reduced; if it repeats in `source` the last
    /// occurrence wins, as with [`add_map`](Self::add_map). A key that
    /// was present and repeats is reduced once per occurrence and the last
    /// result is stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    ///
    /// let mut totals = OrderedMap::from([("apples", 3), ("pears", 1)]);
    /// totals.add_map_with([("pears", 4), ("plums", 2)], |incoming, existing, _, _| {
    ///     incoming + existing
    /// });
    /// assert_eq!(totals.get("pears"), Some(&5));
    /// assert_eq!(totals.last(), Some((&"plums", &2)));
    /// ```
    pub fn add_map_with<I, F>(&mut self, source: I, mut reducer: F) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(V, &V, &K, &Self) -> V,
    {
        let mut merged = 0_usize;
        let resolved: Vec<(K, V)> = source
            .into_iter()
            .map(|(key, incoming)| match self.get(&key) {
                Some(existing) => {
                    merged += 1;
                    let value = reducer(incoming, existing, &key, &*self);
                    (key, value)
                }
                None => (key, incoming),
            })
            .collect();
        self.set_all(resolved);
        tracing::trace!(merged, length = self.entries.len(), "add_map_with");
        self
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes `key`, returning `true` if it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes `key`, returning its value if it was present.
    pub fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        self.reindex_from(position);
        Some(value)
    }

    /// Removes every listed key that is present and returns how many were
    /// removed.
    pub fn delete_all<'q, Q, I>(&mut self, keys: I) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        keys.into_iter().filter(|key| self.delete(*key)).count()
    }

    /// Removes every entry for which
    /// `predicate(value, key, self, removed_so_far)` holds and returns how
    /// many were removed.
    ///
    /// The predicate sees the map as it was before the call; its last
    /// argument counts the matches found earlier in the same pass. Matched
    /// entries are removed together once every entry has been visited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    ///
    /// let mut map: OrderedMap<usize, usize> = OrderedMap::from_length(6, |index| *index);
    /// // Remove at most two odd values
    /// let removed = map.delete_where(|value, _, _, removed_so_far| value % 2 == 1 && removed_so_far < 2);
    /// assert_eq!(removed, 2);
    /// assert_eq!(map.collect_keys().into_vec(), vec![0, 2, 4, 5]);
    /// ```
    pub fn delete_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&V, &K, &Self, usize) -> bool,
    {
        let mut doomed = Vec::new();
        for (position, (key, value)) in self.entries.iter().enumerate() {
            if predicate(value, key, &*self, doomed.len()) {
                doomed.push(position);
            }
        }
        if doomed.is_empty() {
            return 0;
        }

        let mut position = 0;
        self.entries.retain(|_| {
            let keep = doomed.binary_search(&position).is_err();
            position += 1;
            keep
        });
        self.rebuild_index();
        tracing::debug!(removed = doomed.len(), length = self.entries.len(), "delete_where");
        doomed.len()
    }

    // =========================================================================
    // Positional access
    // =========================================================================

    /// Returns the first entry, or `None` if the map is empty.
    #[inline]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(key, value)| (key, value))
    }

    /// Returns the last entry, or `None` if the map is empty.
    #[inline]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.entries.last().map(|(key, value)| (key, value))
    }

    /// Returns a new map holding the first `count` entries.
    ///
    /// This always returns a map: `first_n(1)` is a one-entry map and
    /// `first_n(0)` is empty. Use [`first`](Self::first) to get the single
    /// leading entry itself.
    #[must_use]
    pub fn first_n(&self, count: usize) -> Self
    where
        V: Clone,
    {
        self.derive(self.entries.iter().take(count).cloned())
    }

    /// Returns a new map holding the last `count` entries, in their original
    /// relative order.
    ///
    /// Like [`first_n`](Self::first_n) this always returns a map; use
    /// [`last`](Self::last) for the single trailing entry.
    #[must_use]
    pub fn last_n(&self, count: usize) -> Self
    where
        V: Clone,
    {
        self.derive(self.tail(count).iter().cloned())
    }

    fn tail(&self, count: usize) -> &[(K, V)] {
        &self.entries[self.entries.len().saturating_sub(count)..]
    }

    /// Returns the first `count` keys.
    #[must_use]
    pub fn first_keys(&self, count: usize) -> Sequence<K> {
        self.keys().take(count).cloned().collect()
    }

    /// Returns the first `count` values.
    #[must_use]
    pub fn first_values(&self, count: usize) -> Sequence<V>
    where
        V: Clone,
    {
        self.values().take(count).cloned().collect()
    }

    /// Returns the last `count` keys, in their original relative order.
    #[must_use]
    pub fn last_keys(&self, count: usize) -> Sequence<K> {
        self.tail(count).iter().map(|(key, _)| key.clone()).collect()
    }

    /// Returns the last `count` values, in their original relative order.
    #[must_use]
    pub fn last_values(&self, count: usize) -> Sequence<V>
    where
        V: Clone,
    {
        self.tail(count).iter().map(|(_, value)| value.clone()).collect()
    }

    /// Returns the entry at `index`.
    ///
    /// Negative indices count from the end. The index is clamped into
    /// `[-len, len - 1]`, so any index yields an entry unless the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// assert_eq!(map.at(1), Some((&"b", &2)));
    /// assert_eq!(map.at(-1), Some((&"c", &3)));
    /// assert_eq!(map.at(99), Some((&"c", &3)));
    /// assert_eq!(map.at(-99), Some((&"a", &1)));
    /// ```
    pub fn at(&self, index: isize) -> Option<(&K, &V)> {
        if self.entries.is_empty() {
            return None;
        }
        let (key, value) = &self.entries[resolve_position(index, self.entries.len())];
        Some((key, value))
    }

    /// Returns one entry chosen at random, or `None` if the map is empty.
    pub fn random(&self) -> Option<(&K, &V)> {
        self.random_with(&mut rand::thread_rng())
    }

    /// Returns one entry chosen with `rng`, or `None` if the map is empty.
    pub fn random_with<R>(&self, rng: &mut R) -> Option<(&K, &V)>
    where
        R: Rng + ?Sized,
    {
        self.entries.choose(rng).map(|(key, value)| (key, value))
    }

    /// Returns a new map of up to `count` distinct entries sampled without
    /// replacement.
    #[must_use]
    pub fn random_n(&self, count: usize) -> Self
    where
        V: Clone,
    {
        self.random_n_with(count, &mut rand::thread_rng())
    }

    /// Returns a new map of up to `count` distinct entries sampled without
    /// replacement using `rng`.
    #[must_use]
    pub fn random_n_with<R>(&self, count: usize, rng: &mut R) -> Self
    where
        V: Clone,
        R: Rng + ?Sized,
    {
        self.derive(self.entries.choose_multiple(rng, count).cloned())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the first entry, in iteration order, that satisfies
    /// `predicate(value, key, self)`.
    pub fn find<F>(&self, mut predicate: F) -> Option<(&K, &V)>
    where
        F: FnMut(&V, &K, &Self) -> bool,
    {
        self.entries
            .iter()
            .find(|entry| predicate(&entry.1, &entry.0, self))
            .map(|(key, value)| (key, value))
    }

    /// Returns the key of the first entry that satisfies `predicate`.
    pub fn find_key<F>(&self, predicate: F) -> Option<&K>
    where
        F: FnMut(&V, &K, &Self) -> bool,
    {
        self.find(predicate).map(|(key, _)| key)
    }

    /// Returns a new map of the entries that satisfy `predicate`, in order.
    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        V: Clone,
        F: FnMut(&V, &K, &Self) -> bool,
    {
        self.derive(
            self.entries
                .iter()
                .filter(|entry| predicate(&entry.1, &entry.0, self))
                .cloned(),
        )
    }

    /// Splits the entries into those that satisfy `predicate` and those that
    /// do not, each keeping its relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// let (odd, even) = map.partition(|value, _, _| value % 2 == 1);
    /// assert_eq!(odd.collect_keys().into_vec(), vec!["a", "c"]);
    /// assert_eq!(even.collect_keys().into_vec(), vec!["b"]);
    /// ```
    #[must_use]
    pub fn partition<F>(&self, mut predicate: F) -> (Self, Self)
    where
        V: Clone,
        F: FnMut(&V, &K, &Self) -> bool,
    {
        let mut matches = Self::with_hasher(self.index.hasher().clone());
        let mut rest = Self::with_hasher(self.index.hasher().clone());
        for (key, value) in &self.entries {
            let target = if predicate(value, key, self) {
                &mut matches
            } else {
                &mut rest
            };
            target.set(key.clone(), value.clone());
        }
        (matches, rest)
    }

    /// Applies `transform(value, key, self)` to every entry in order and
    /// collects the results.
    pub fn map<R, F>(&self, mut transform: F) -> Sequence<R>
    where
        F: FnMut(&V, &K, &Self) -> R,
    {
        self.entries
            .iter()
            .map(|(key, value)| transform(value, key, self))
            .collect()
    }

    /// Returns `true` if any entry satisfies `predicate`. Stops at the first
    /// match.
    pub fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&V, &K, &Self) -> bool,
    {
        self.entries
            .iter()
            .any(|(key, value)| predicate(value, key, self))
    }

    /// Returns `true` if every entry satisfies `predicate`. Stops at the
    /// first failure.
    pub fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&V, &K, &Self) -> bool,
    {
        self.entries
            .iter()
            .all(|(key, value)| predicate(value, key, self))
    }

    /// Calls `action(value, key, self, position)` for every entry in order.
    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&V, &K, &Self, usize),
    {
        for (position, (key, value)) in self.entries.iter().enumerate() {
            action(value, key, self, position);
        }
    }

    // =========================================================================
    // Reordering
    // =========================================================================

    /// Sorts the entries in place with
    /// `comparator(value_a, value_b, key_a, key_b)`.
    ///
    /// The sort is stable.
    pub fn sort<F>(&mut self, mut comparator: F) -> &mut Self
    where
        F: FnMut(&V, &V, &K, &K) -> Ordering,
    {
        self.entries
            .sort_by(|(key_a, value_a), (key_b, value_b)| comparator(value_a, value_b, key_a, key_b));
        self.rebuild_index();
        tracing::debug!(length = self.entries.len(), "sorted entries");
        self
    }

    /// Sorts the entries in place by key.
    pub fn sort_keys(&mut self) -> &mut Self
    where
        K: Ord,
    {
        self.sort(|_, _, key_a, key_b| key_a.cmp(key_b))
    }

    /// Returns a new map over the entry range `start..end`.
    ///
    /// Negative bounds count from the end; both bounds are clamped into
    /// `[0, len]`. `None` for `end` means the end of the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    /// assert_eq!(map.slice(1, Some(-1)).collect_keys().into_vec(), vec!["b", "c"]);
    /// assert_eq!(map.slice(-2, None).collect_keys().into_vec(), vec!["c", "d"]);
    /// assert!(map.slice(3, Some(1)).is_empty());
    /// ```
    #[must_use]
    pub fn slice(&self, start: isize, end: Option<isize>) -> Self
    where
        V: Clone,
    {
        let length = self.entries.len();
        let start = resolve_bound(start, length);
        let end = end.map_or(length, |end| resolve_bound(end, length));
        if start >= end {
            return self.derive(std::iter::empty());
        }
        self.derive(self.entries[start..end].iter().cloned())
    }

    /// Removes up to `delete_count` entries starting at `start`, inserts
    /// `items` at that position, and returns the removed entries.
    ///
    /// `start` follows the same negative-index and clamping rules as
    /// [`slice`](Self::slice). If an inserted key is already present
    /// elsewhere, the key stays at whichever position comes first and takes
    /// the value that comes last.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// let removed = map.splice(1, 1, [("x", 10), ("y", 11)]);
    /// assert_eq!(removed.collect_keys().into_vec(), vec!["b"]);
    /// assert_eq!(map.collect_keys().into_vec(), vec!["a", "x", "y", "c"]);
    /// ```
    pub fn splice<I>(&mut self, start: isize, delete_count: usize, items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let length = self.entries.len();
        let start = resolve_bound(start, length);
        let end = start.saturating_add(delete_count).min(length);

        let removed: Vec<(K, V)> = self.entries.splice(start..end, items).collect();

        let spliced = std::mem::take(&mut self.entries);
        self.index.clear();
        self.set_all(spliced);
        tracing::debug!(
            start,
            removed = removed.len(),
            length = self.entries.len(),
            "spliced entries"
        );
        self.derive(removed)
    }
}

#[cfg(feature = "json")]
impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone + fmt::Display,
    S: BuildHasher + Clone,
{
    /// Returns a plain JSON object view of the map. Keys are converted with
    /// their `Display` form; keys whose text collides keep the last value.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if a value cannot be serialized.
    pub fn to_json(&self) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error>
    where
        V: serde::Serialize,
    {
        let mut object = serde_json::Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            object.insert(key.to_string(), serde_json::to_value(value)?);
        }
        Ok(object)
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over the entries of an [`OrderedMap`], in order.
///
/// This `struct` is created by [`OrderedMap::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, S> Default for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone + Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.set_all(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.set_all(iter);
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    fn from(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> From<BTreeMap<K, V>> for OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V, S> From<OrderedMap<K, V, S>> for Source<K, V> {
    fn from(map: OrderedMap<K, V, S>) -> Self {
        Self::Entries(map.entries)
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Two maps are equal when they hold the same entries in the same order.
impl<K: PartialEq, V: PartialEq, S> PartialEq for OrderedMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq, S> Eq for OrderedMap<K, V, S> {}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.entries.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for OrderedMap<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in &self.entries {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, S> serde::Serialize for OrderedMap<K, V, S>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V, S> {
    marker: std::marker::PhantomData<OrderedMap<K, V, S>>,
}

#[cfg(feature = "serde")]
impl<K, V, S> OrderedMapVisitor<K, V, S> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::de::Visitor<'de> for OrderedMapVisitor<K, V, S>
where
    K: serde::Deserialize<'de> + Hash + Eq + Clone,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Clone + Default,
{
    type Value = OrderedMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = access.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut map = OrderedMap::with_capacity_and_hasher(capacity, S::default());
        while let Some((key, value)) = access.next_entry()? {
            map.set(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for OrderedMap<K, V, S>
where
    K: serde::Deserialize<'de> + Hash + Eq + Clone,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Clone + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
