//! Binary layout of the engine result buffer
//!
//! The header is eight little-endian 8-byte slots:
//!
//! | slot | offset | content |
//! |---|---|---|
//! | 0 | 0 | engine-internal |
//! | 1 | 8 | address of the normalized codepoint array |
//! | 2 | 16 | range count (`i32` in the low 4 bytes) |
//! | 3 | 24 | address of the range table |
//! | 4 | 32 | engine-internal |
//! | 5 | 40 | space-position count (`i32` in the low 4 bytes) |
//! | 6 | 48 | address of the space-position table |
//! | 7 | 56 | engine-internal |
//!
//! All offset arithmetic on the buffer lives in this module.

use crate::error::{LayoutViolation, Result};
use byteorder::{ByteOrder, LittleEndian};

/// Header length in bytes
pub const HEADER_LEN: usize = 8 * 8;

/// Offset of the normalized codepoint array address
pub const NORMALIZED_ADDR_OFFSET: usize = 8;

/// Offset of the range count
pub const RANGES_LEN_OFFSET: usize = 16;

/// Offset of the range table address
pub const RANGES_ADDR_OFFSET: usize = 24;

/// Offset of the space-position count
pub const SPACE_POSITIONS_LEN_OFFSET: usize = 40;

/// Offset of the space-position table address
pub const SPACE_POSITIONS_ADDR_OFFSET: usize = 48;

/// Width of one normalized codepoint
pub const CODEPOINT_WIDTH: usize = 4;

/// Width of one range record
pub const RANGE_RECORD_LEN: usize = 4 * 6;

/// Width of one space-position entry
pub const SPACE_POSITION_WIDTH: usize = 4;

/// Parsed result-buffer header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferHeader {
    normalized_addr: u64,
    ranges_len: usize,
    ranges_addr: u64,
    space_positions_len: usize,
    space_positions_addr: u64,
}

impl BufferHeader {
    /// Parse the header from the first [`HEADER_LEN`] bytes of a buffer
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(LayoutViolation::Truncated {
                what: "header",
                needed: HEADER_LEN,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            normalized_addr: read_addr(bytes, NORMALIZED_ADDR_OFFSET),
            ranges_len: read_count(bytes, RANGES_LEN_OFFSET, "range")?,
            ranges_addr: read_addr(bytes, RANGES_ADDR_OFFSET),
            space_positions_len: read_count(
                bytes,
                SPACE_POSITIONS_LEN_OFFSET,
                "space-position",
            )?,
            space_positions_addr: read_addr(bytes, SPACE_POSITIONS_ADDR_OFFSET),
        })
    }

    /// Address of the normalized codepoint array
    pub fn normalized_addr(&self) -> u64 {
        self.normalized_addr
    }

    /// Number of range records
    pub fn ranges_len(&self) -> usize {
        self.ranges_len
    }

    /// Address of the range table
    pub fn ranges_addr(&self) -> u64 {
        self.ranges_addr
    }

    /// Byte length of the range table
    pub fn ranges_byte_len(&self) -> usize {
        self.ranges_len * RANGE_RECORD_LEN
    }

    /// Number of space-insertion positions
    pub fn space_positions_len(&self) -> usize {
        self.space_positions_len
    }

    /// Address of the space-position table
    pub fn space_positions_addr(&self) -> u64 {
        self.space_positions_addr
    }

    /// Byte length of the space-position table
    pub fn space_positions_byte_len(&self) -> usize {
        self.space_positions_len * SPACE_POSITION_WIDTH
    }
}

fn read_addr(bytes: &[u8], offset: usize) -> u64 {
    LittleEndian::read_u64(&bytes[offset..offset + 8])
}

// Counts occupy the low half of their slot; the high half is padding.
fn read_count(bytes: &[u8], offset: usize, field: &'static str) -> Result<usize> {
    let value = LittleEndian::read_i32(&bytes[offset..offset + 4]);
    usize::try_from(value).map_err(|_| LayoutViolation::NegativeCount { field, value })
}

/// One 24-byte range record
///
/// Only the normalized interval drives reconstruction. The remaining fields
/// are carried through as token metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRecord {
    /// Start codepoint index into the normalized text (inclusive)
    pub normalized_start: i32,
    /// End codepoint index into the normalized text (exclusive)
    pub normalized_end: i32,
    /// Start offset in the original input as reported by the engine
    pub original_start: i32,
    /// End offset in the original input as reported by the engine
    pub original_end: i32,
    /// Raw token kind
    pub kind: i32,
    /// Raw segment type
    pub segment_type: i32,
}

impl RangeRecord {
    /// Decode a record from exactly [`RANGE_RECORD_LEN`] bytes
    pub fn parse(record: &[u8; RANGE_RECORD_LEN]) -> Self {
        let field = |i: usize| LittleEndian::read_i32(&record[i * 4..i * 4 + 4]);
        Self {
            normalized_start: field(0),
            normalized_end: field(1),
            original_start: field(2),
            original_end: field(3),
            kind: field(4),
            segment_type: field(5),
        }
    }

    /// Number of codepoints covered by the record
    pub fn len(&self) -> usize {
        usize::try_from(i64::from(self.normalized_end) - i64::from(self.normalized_start))
            .unwrap_or(0)
    }

    /// Whether the record covers no codepoints
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
