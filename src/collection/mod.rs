//! Enhanced collection types.
//!
//! This module provides two mutable collections with array-like methods:
//!
//! - [`OrderedMap`]: a key-value map that preserves insertion order
//! - [`Sequence`]: an ordered list with sampling, chunking and deduplication
//!
//! `OrderedMap` hands out `Sequence`s whenever it returns derived keys,
//! values or entries. `Sequence` does not depend on `OrderedMap`.
//!
//! # Examples
//!
//! ## `OrderedMap`
//!
//! ```rust
//! use orderly::collection::OrderedMap;
//!
//! let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
//!
//! // Positional access, including negative indices
//! assert_eq!(map.at(-1), Some((&"c", &3)));
//!
//! // Derived collections keep the original order
//! let odd = map.filter(|value, _, _| value % 2 == 1);
//! assert_eq!(odd.collect_keys().into_vec(), vec!["a", "c"]);
//!
//! // In-place splice returns the removed entries
//! let removed = map.splice(0, 1, [("z", 26)]);
//! assert_eq!(removed.first(), Some((&"a", &1)));
//! assert_eq!(map.first(), Some((&"z", &26)));
//! ```
//!
//! ## `Sequence`
//!
//! ```rust
//! use orderly::collection::Sequence;
//!
//! let mut sequence = Sequence::from(vec![3, 1, 3, 2]);
//! sequence.remove_duplicates(&[]);
//! assert_eq!(sequence.as_slice(), &[3, 1, 2]);
//! assert_eq!(sequence.average(), Some(2.0));
//! ```

mod error;
mod hash;
#[cfg(feature = "json")]
mod json;
mod ordered_map;
mod sequence;
mod source;

pub use error::CollectionError;
pub use error::Result;
pub use hash::DefaultBuildHasher;
pub use ordered_map::Iter;
pub use ordered_map::KeyPresence;
pub use ordered_map::OrderedMap;
pub use sequence::Sequence;
pub use source::IndexKey;
pub use source::Source;
