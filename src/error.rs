use thiserror::Error;

/// The error type for fallible [`SkipList`](crate::SkipList) operations.
///
/// Every variant is raised at the point of violation; mutating operations are
/// all-or-nothing, so a returned error never leaves the list partially
/// spliced.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An argument was malformed (for example, a `copy_to` offset past the
    /// end of the destination, or an unknown snapshot format version).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A rank was outside `[0, len)`.
    #[error("rank {rank} is out of range for a list of length {len}")]
    OutOfRange {
        /// The offending rank.
        rank: usize,
        /// The list length at the time of the call.
        len: usize,
    },

    /// A positional write was attempted; the list maintains sorted order and
    /// does not accept caller-chosen positions.
    #[error("positional writes are not supported by an ordered list")]
    Unsupported,

    /// A cursor observed a structural mutation made after it was created.
    #[error("skip list was modified during iteration")]
    ConcurrentModification,

    /// A destination buffer cannot hold the list's elements.
    #[error("destination can hold {available} elements from the offset, {needed} required")]
    CapacityExceeded {
        /// Number of elements the copy requires.
        needed: usize,
        /// Capacity remaining after the offset.
        available: usize,
    },

    /// A snapshot declared a non-zero length but did not carry a full value
    /// payload.
    #[error("snapshot is missing its value payload")]
    MissingData,
}
