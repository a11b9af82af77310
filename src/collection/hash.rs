//! Hasher selection for the key index of [`OrderedMap`].
//!
//! The hasher is picked at compile time through Cargo features:
//!
//! | Feature  | Hasher                          |
//! |----------|---------------------------------|
//! | `fxhash` | `rustc_hash::FxBuildHasher`     |
//! | `ahash`  | `ahash::RandomState`            |
//! | (none)   | `std`'s SipHash `RandomState`   |
//!
//! When both `fxhash` and `ahash` are enabled, `fxhash` is used.
//!
//! [`OrderedMap`]: crate::collection::OrderedMap

/// The `BuildHasher` used by [`OrderedMap`](crate::collection::OrderedMap)
/// unless another one is named explicitly.
#[cfg(feature = "fxhash")]
pub type DefaultBuildHasher = rustc_hash::FxBuildHasher;

/// The `BuildHasher` used by [`OrderedMap`](crate::collection::OrderedMap)
/// unless another one is named explicitly.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultBuildHasher = ahash::RandomState;

/// The `BuildHasher` used by [`OrderedMap`](crate::collection::OrderedMap)
/// unless another one is named explicitly.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultBuildHasher = std::collections::hash_map::RandomState;

#[cfg(test)]
mod tests {
    use super::DefaultBuildHasher;
    use rstest::rstest;
    use std::hash::BuildHasher;

    #[rstest]
    fn test_same_builder_hashes_deterministically() {
        let builder = DefaultBuildHasher::default();
        assert_eq!(builder.hash_one("key"), builder.hash_one("key"));
    }

    #[rstest]
    fn test_distinct_keys_usually_hash_differently() {
        let builder = DefaultBuildHasher::default();
        assert_ne!(builder.hash_one(1_u64), builder.hash_one(2_u64));
    }
}
