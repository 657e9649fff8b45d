use thiserror::Error;

/// Errors that can occur when accessing the elements of a [`DynamicArray`][crate::DynamicArray].
///
/// Contract violations (such as asking for the front of an empty array) are not reported
/// through this type - they panic, as documented on the relevant methods.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The caller asked for an element at an index that does not hold a live element.
    #[error("index {index} is out of range for a dynamic array of length {len}")]
    OutOfRange {
        /// The index the caller asked for.
        index: usize,

        /// The length of the array at the time of the access.
        len: usize,
    },
}

/// A specialized `Result` type for dynamic array operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
