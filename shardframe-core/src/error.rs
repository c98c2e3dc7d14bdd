//! Error types for frame store operations

use alloc::string::String;

/// Errors that can occur while viewing, growing or indexing frame storage
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Index, offset or range outside the valid bounds
    #[cfg_attr(feature = "std", error("Index {index} out of range for length {len}"))]
    OutOfRange {
        /// The offending index (or range end).
        index: u64,
        /// The length it was checked against.
        len: u64,
    },

    /// Malformed construction or call arguments
    #[cfg_attr(feature = "std", error("Invalid argument: {0}"))]
    InvalidArgument(String),

    /// Buffer is full and cannot (or may not) grow to the required size
    #[cfg_attr(
        feature = "std",
        error("Out of memory: {required} bytes required, buffer capacity is {capacity}")
    )]
    OutOfMemory {
        /// The capacity that was requested.
        required: u64,
        /// The capacity at the time of the request.
        capacity: u64,
    },

    /// Frame or bucket length does not fit the 32-bit length field
    #[cfg_attr(feature = "std", error("Frame of {0} bytes exceeds the 32-bit length field"))]
    FrameTooLarge(u64),

    /// A length prefix points past the written data
    #[cfg_attr(feature = "std", error("Corrupt frame header at offset {offset}"))]
    CorruptFrame {
        /// Byte offset of the bad length prefix.
        offset: u64,
    },

    /// The store was disposed and holds no buffer anymore
    #[cfg_attr(feature = "std", error("Frame store has been disposed"))]
    Disposed,
}

impl StoreError {
    pub(crate) fn out_of_range(index: impl TryInto<u64>, len: impl TryInto<u64>) -> Self {
        StoreError::OutOfRange {
            index: index.try_into().unwrap_or(u64::MAX),
            len: len.try_into().unwrap_or(u64::MAX),
        }
    }
}
