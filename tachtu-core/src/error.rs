//! Layout violation errors
//!
//! A result buffer that breaks the binary contract is an engine defect, not a
//! user error. These variants describe exactly which part of the contract was
//! broken so the caller can report it instead of returning wrong tokens.

use thiserror::Error;

/// Ways a result buffer can violate its binary layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutViolation {
    /// The engine returned a null buffer handle
    #[error("engine returned a null result buffer")]
    NullBuffer,

    /// A slice is shorter than the structure read from it
    #[error("{what} truncated: need {needed} bytes, have {actual}")]
    Truncated {
        /// Structure being read
        what: &'static str,
        /// Bytes required
        needed: usize,
        /// Bytes available
        actual: usize,
    },

    /// A count field in the header is negative
    #[error("negative {field} count: {value}")]
    NegativeCount {
        /// Header field name
        field: &'static str,
        /// Raw value read from the buffer
        value: i32,
    },

    /// A table length is not a whole number of records
    #[error("{table} table length {len} is not a multiple of {width}")]
    MisalignedTable {
        /// Table name
        table: &'static str,
        /// Byte length of the table
        len: usize,
        /// Record width in bytes
        width: usize,
    },

    /// A table with a positive count has a null data pointer
    #[error("{table} table has {count} entries but a null data pointer")]
    NullTable {
        /// Table name
        table: &'static str,
        /// Entry count from the header
        count: usize,
    },

    /// A range record is not a valid half-open interval
    #[error("range {index} is invalid: [{start}, {end})")]
    InvalidRange {
        /// Index of the range record
        index: usize,
        /// Start codepoint index
        start: i32,
        /// End codepoint index
        end: i32,
    },

    /// A range record's original offsets are negative or reversed
    #[error("range {index} has invalid original offsets: [{start}, {end})")]
    InvalidOriginalRange {
        /// Index of the range record
        index: usize,
        /// Start offset in the original input
        start: i32,
        /// End offset in the original input
        end: i32,
    },

    /// A codepoint index falls outside the normalized text
    #[error("codepoint index {index} outside normalized text of length {len}")]
    CodepointOutOfBounds {
        /// Requested codepoint index
        index: usize,
        /// Number of codepoints available
        len: usize,
    },

    /// The normalized text holds a value that is not a Unicode scalar value
    #[error("invalid codepoint {value:#x} at index {index}")]
    InvalidCodepoint {
        /// Codepoint index
        index: usize,
        /// Raw 32-bit value
        value: u32,
    },
}

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, LayoutViolation>;
