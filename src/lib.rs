//! # orderly
//!
//! Insertion-ordered map and enhanced sequence types with array-like query
//! and transform methods.
//!
//! ## Overview
//!
//! - **`OrderedMap`**: a key-value map that remembers insertion order and
//!   offers `filter`, `map`, `sort`, `slice`, `splice`, `partition`, `find`,
//!   `some`, `every` and friends over its entries
//! - **`Sequence`**: a list with `first`/`last`, delete by value or index,
//!   deduplication, shuffling, chunking, sampling and averaging
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for both collections
//! - `json`: building and merging maps from `serde_json::Value` (default)
//! - `fxhash`: hash keys with `rustc-hash`
//! - `ahash`: hash keys with `ahash`
//!
//! ## Example
//!
//! ```rust
//! use orderly::prelude::*;
//!
//! let mut inventory = OrderedMap::new();
//! inventory.set("bolts", 120).set("nuts", 80).set("washers", 300);
//!
//! let low_stock = inventory.filter(|count, _, _| *count < 150);
//! assert_eq!(low_stock.len(), 2);
//!
//! let counts: Sequence<i32> = inventory.collect_values();
//! assert_eq!(counts.average(), Some(500.0 / 3.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use orderly::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{
        CollectionError, IndexKey, KeyPresence, OrderedMap, Sequence, Source,
    };
}

pub mod collection;
