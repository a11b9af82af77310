//! Enhanced sequence with array-like convenience methods.
//!
//! This module provides [`Sequence`], an owned, growable list of values that
//! adds sampling, chunking, deduplication and a few other conveniences on top
//! of a plain `Vec`.
//!
//! # Overview
//!
//! - Bounds-safe [`first`](Sequence::first) and [`last`](Sequence::last)
//! - In-place removal by value ([`delete`](Sequence::delete)) or by position
//!   ([`delete_at`](Sequence::delete_at))
//! - First-occurrence deduplication with an ignore list
//!   ([`remove_duplicates`](Sequence::remove_duplicates))
//! - Non-mutating [`shuffle`](Sequence::shuffle), [`chunk`](Sequence::chunk)
//!   and [`random`](Sequence::random)
//!
//! # Examples
//!
//! ```rust
//! use orderly::collection::Sequence;
//!
//! let mut sequence: Sequence<i32> = Sequence::from(vec![1, 2, 2, 3, 1]);
//! sequence.remove_duplicates(&[]);
//! assert_eq!(sequence.as_slice(), &[1, 2, 3]);
//!
//! let chunks = sequence.chunk(2).unwrap();
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[1].as_slice(), &[3]);
//! ```

use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;

use rand::Rng;
use rand::seq::SliceRandom;

use super::error::{CollectionError, Result};

/// An ordered list of values with array-like convenience methods.
///
/// Elements have no uniqueness constraint; order is positional.
///
/// # Examples
///
/// ```rust
/// use orderly::collection::Sequence;
///
/// let sequence: Sequence<i32> = (1..=4).collect();
/// assert_eq!(sequence.first(), Some(&1));
/// assert_eq!(sequence.last(), Some(&4));
/// assert_eq!(sequence.average(), Some(2.5));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Sequence<T> {
    elements: Vec<T>,
}

impl<T> Sequence<T> {
    /// Creates a new empty sequence.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates an empty sequence with room for `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends an element to the end.
    #[inline]
    pub fn push(&mut self, element: T) {
        self.elements.push(element);
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// Returns the first element, or `None` if the sequence is empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Returns the last element, or `None` if the sequence is empty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }

    /// Returns an iterator over the elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Returns an iterator that allows modifying each element.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }

    /// Views the sequence as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Consumes the sequence, returning the underlying `Vec`.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    /// Removes the elements at the given positions.
    ///
    /// Duplicate indices are collapsed. Every index is checked before
    /// anything is removed, so on error the sequence is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if any index is not in
    /// `[0, len)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::Sequence;
    ///
    /// let mut sequence = Sequence::from(vec!['a', 'b', 'c', 'd']);
    /// sequence.delete_at(&[3, 0, 3]).unwrap();
    /// assert_eq!(sequence.as_slice(), &['b', 'c']);
    /// ```
    pub fn delete_at(&mut self, indices: &[usize]) -> Result<&mut Self> {
        let length = self.elements.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= length) {
            return Err(CollectionError::IndexOutOfRange { index, length });
        }

        let mut doomed = indices.to_vec();
        doomed.sort_unstable();
        doomed.dedup();

        let mut position = 0;
        self.elements.retain(|_| {
            let keep = doomed.binary_search(&position).is_err();
            position += 1;
            keep
        });
        tracing::trace!(removed = doomed.len(), length = self.elements.len(), "delete_at");
        Ok(self)
    }

    /// Returns a shuffled copy, leaving `self` untouched.
    ///
    /// Uses the thread-local random number generator.
    #[must_use]
    pub fn shuffle(&self) -> Self
    where
        T: Clone,
    {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// Returns a copy permuted with Fisher-Yates using `rng`.
    #[must_use]
    pub fn shuffle_with<R>(&self, rng: &mut R) -> Self
    where
        T: Clone,
        R: Rng + ?Sized,
    {
        let mut shuffled = self.elements.clone();
        shuffled.shuffle(rng);
        Self::from(shuffled)
    }

    /// Splits the sequence into consecutive chunks of at most `size`
    /// elements. Only the last chunk may be shorter.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `size` is zero.
    pub fn chunk(&self, size: usize) -> Result<Sequence<Self>>
    where
        T: Clone,
    {
        if size == 0 {
            return Err(CollectionError::InvalidArgument {
                operation: "chunk",
                reason: "chunk size must be positive",
            });
        }
        Ok(self
            .elements
            .chunks(size)
            .map(|chunk| Self::from(chunk.to_vec()))
            .collect())
    }

    /// Samples up to `quantity` distinct positions without replacement.
    ///
    /// Uses the thread-local random number generator.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `quantity` is zero.
    pub fn random(&self, quantity: usize) -> Result<Self>
    where
        T: Clone,
    {
        self.random_with(quantity, &mut rand::thread_rng())
    }

    /// Samples up to `quantity` distinct positions without replacement,
    /// drawing from `rng`.
    ///
    /// The result holds `min(quantity, len)` elements.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `quantity` is zero.
    pub fn random_with<R>(&self, quantity: usize, rng: &mut R) -> Result<Self>
    where
        T: Clone,
        R: Rng + ?Sized,
    {
        if quantity == 0 {
            return Err(CollectionError::InvalidArgument {
                operation: "random",
                reason: "quantity must be positive",
            });
        }
        Ok(self
            .elements
            .choose_multiple(rng, quantity)
            .cloned()
            .collect())
    }
}

impl<T: PartialEq> Sequence<T> {
    /// Returns `true` if the sequence contains an element equal to `value`.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.elements.contains(value)
    }

    /// Removes every occurrence of each of `values`, compacting in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::Sequence;
    ///
    /// let mut sequence = Sequence::from(vec![1, 2, 3, 2, 4, 1]);
    /// sequence.delete(&[1, 2]);
    /// assert_eq!(sequence.as_slice(), &[3, 4]);
    /// ```
    pub fn delete(&mut self, values: &[T]) -> &mut Self {
        self.elements.retain(|element| !values.contains(element));
        self
    }

    /// Keeps only the first occurrence of each distinct value.
    ///
    /// Values listed in `ignore` skip the "already seen" check, so every
    /// occurrence of them is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orderly::collection::Sequence;
    ///
    /// let mut sequence = Sequence::from(vec![0, 1, 0, 2, 1, 0]);
    /// sequence.remove_duplicates(&[0]);
    /// assert_eq!(sequence.as_slice(), &[0, 1, 0, 2, 0]);
    /// ```
    pub fn remove_duplicates(&mut self, ignore: &[T]) -> &mut Self {
        let source = std::mem::take(&mut self.elements);
        self.elements = keep_first_occurrences(source, ignore);
        self
    }

    /// Replaces the contents with the deduplicated elements of `source`.
    ///
    /// Same rule as [`remove_duplicates`](Self::remove_duplicates), but the
    /// elements are read from `source` instead of `self`.
    pub fn remove_duplicates_from<I>(&mut self, source: I, ignore: &[T]) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.elements = keep_first_occurrences(source, ignore);
        self
    }
}

impl<T: Copy + Into<f64>> Sequence<T> {
    /// Returns the arithmetic mean, or `None` if the sequence is empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> Option<f64> {
        if self.elements.is_empty() {
            return None;
        }
        let total: f64 = self.elements.iter().map(|&element| element.into()).sum();
        Some(total / self.elements.len() as f64)
    }
}

fn keep_first_occurrences<T, I>(source: I, ignore: &[T]) -> Vec<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut kept: Vec<T> = Vec::new();
    for element in source {
        if ignore.contains(&element) || !kept.contains(&element) {
            kept.push(element);
        }
    }
    kept
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for Sequence<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    #[inline]
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(elements: [T; N]) -> Self {
        Self {
            elements: Vec::from(elements),
        }
    }
}

impl<T> From<Sequence<T>> for Vec<T> {
    #[inline]
    fn from(sequence: Sequence<T>) -> Self {
        sequence.elements
    }
}

impl<T> AsRef<[T]> for Sequence<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.elements
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Sequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Sequence<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.elements.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Sequence<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}

// =============================================================================
// Tests
// =============================================================================
