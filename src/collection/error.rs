//! Error types for the collection types.
//!
//! Every fallible operation in this crate reports a [`CollectionError`].
//! Errors are raised before any mutation begins, so a failed call leaves the
//! receiver exactly as it was.

/// Represents errors that can occur when working with [`OrderedMap`] or
/// [`Sequence`].
///
/// [`OrderedMap`]: crate::collection::OrderedMap
/// [`Sequence`]: crate::collection::Sequence
///
/// # Examples
///
/// ```rust
/// use orderly::collection::{CollectionError, Sequence};
///
/// let mut sequence: Sequence<i32> = Sequence::from(vec![1, 2, 3]);
/// let error = sequence.delete_at(&[5]).unwrap_err();
/// assert_eq!(error, CollectionError::IndexOutOfRange { index: 5, length: 3 });
/// assert_eq!(format!("{error}"), "index 5 is out of range for length 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A key was missing where one is required.
    InvalidKey {
        /// The operation that rejected the key.
        operation: &'static str,
    },
    /// An argument did not satisfy the operation's contract.
    InvalidArgument {
        /// The operation that rejected the argument.
        operation: &'static str,
        /// Why the argument was rejected.
        reason: &'static str,
    },
    /// A positional index was outside `[0, length)`.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The length of the collection at the time of the call.
        length: usize,
    },
    /// The source handed to a constructor has a shape that cannot be
    /// turned into entries.
    UnsupportedSource {
        /// A short name for the shape that was found.
        found: &'static str,
    },
}

impl std::fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey { operation } => {
                write!(formatter, "{operation}: key must not be null")
            }
            Self::InvalidArgument { operation, reason } => {
                write!(formatter, "{operation}: {reason}")
            }
            Self::IndexOutOfRange { index, length } => {
                write!(
                    formatter,
                    "index {index} is out of range for length {length}"
                )
            }
            Self::UnsupportedSource { found } => {
                write!(formatter, "cannot build an ordered map from {found}")
            }
        }
    }
}

impl std::error::Error for CollectionError {}

/// A specialized `Result` type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
