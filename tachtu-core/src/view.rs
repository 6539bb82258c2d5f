//! Bounds-checked view over the tables of a result buffer

use crate::error::{LayoutViolation, Result};
use crate::layout::{RangeRecord, CODEPOINT_WIDTH, RANGE_RECORD_LEN, SPACE_POSITION_WIDTH};
use byteorder::{ByteOrder, LittleEndian};

/// Borrowed view of the three tables a segmentation call produces
///
/// The normalized text is cut to the largest range end, so nothing past
/// `max(endPos)` is reachable through the view.
#[derive(Debug, Clone, Copy)]
pub struct ResultView<'a> {
    normalized: &'a [u8],
    ranges: &'a [u8],
    space_positions: &'a [u8],
}

impl<'a> ResultView<'a> {
    /// Validate the tables and build a view
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutViolation`] when a table is not a whole number of
    /// records, a range or its original offsets do not form a valid
    /// `[start, end)` interval, or the normalized text is shorter than the
    /// largest range end.
    pub fn new(normalized: &'a [u8], ranges: &'a [u8], space_positions: &'a [u8]) -> Result<Self> {
        check_aligned("space-position", space_positions.len(), SPACE_POSITION_WIDTH)?;

        let needed = Self::required_normalized_len(ranges)? * CODEPOINT_WIDTH;
        if normalized.len() < needed {
            return Err(LayoutViolation::Truncated {
                what: "normalized text",
                needed,
                actual: normalized.len(),
            });
        }

        Ok(Self {
            normalized: &normalized[..needed],
            ranges,
            space_positions,
        })
    }

    /// Number of codepoints the normalized text must hold for a range table
    ///
    /// This is the largest `endPos` over all records, after checking that
    /// every record satisfies `0 <= start <= end` for both its normalized
    /// and original offsets.
    pub fn required_normalized_len(ranges: &[u8]) -> Result<usize> {
        check_aligned("range", ranges.len(), RANGE_RECORD_LEN)?;

        let mut max_end = 0usize;
        for (index, chunk) in ranges.chunks_exact(RANGE_RECORD_LEN).enumerate() {
            let record = parse_record(chunk)?;
            let (start, end) = (record.normalized_start, record.normalized_end);
            if start < 0 || end < start {
                return Err(LayoutViolation::InvalidRange { index, start, end });
            }
            let (original_start, original_end) = (record.original_start, record.original_end);
            if original_start < 0 || original_end < original_start {
                return Err(LayoutViolation::InvalidOriginalRange {
                    index,
                    start: original_start,
                    end: original_end,
                });
            }
            // end >= start >= 0
            max_end = max_end.max(end as usize);
        }
        Ok(max_end)
    }

    /// Number of range records
    pub fn range_count(&self) -> usize {
        self.ranges.len() / RANGE_RECORD_LEN
    }

    /// Range record at `index`
    pub fn range(&self, index: usize) -> Option<RangeRecord> {
        let offset = index.checked_mul(RANGE_RECORD_LEN)?;
        let chunk = self.ranges.get(offset..offset + RANGE_RECORD_LEN)?;
        parse_record(chunk).ok()
    }

    /// Iterate over range records in stored order
    pub fn ranges(&self) -> impl Iterator<Item = RangeRecord> + 'a {
        self.ranges
            .chunks_exact(RANGE_RECORD_LEN)
            .filter_map(|chunk| parse_record(chunk).ok())
    }

    /// Largest range end, which is also the visible normalized length
    pub fn max_range_end(&self) -> usize {
        self.normalized.len() / CODEPOINT_WIDTH
    }

    /// Codepoint at normalized index `index`
    pub fn codepoint(&self, index: usize) -> Result<char> {
        let len = self.max_range_end();
        let offset = index
            .checked_mul(CODEPOINT_WIDTH)
            .filter(|_| index < len)
            .ok_or(LayoutViolation::CodepointOutOfBounds { index, len })?;

        let value = LittleEndian::read_u32(&self.normalized[offset..offset + CODEPOINT_WIDTH]);
        char::from_u32(value).ok_or(LayoutViolation::InvalidCodepoint { index, value })
    }

    /// Number of recorded space-insertion positions
    pub fn space_position_count(&self) -> usize {
        self.space_positions.len() / SPACE_POSITION_WIDTH
    }

    /// Iterate over recorded space-insertion positions
    pub fn space_positions(&self) -> impl Iterator<Item = i32> + 'a {
        self.space_positions
            .chunks_exact(SPACE_POSITION_WIDTH)
            .map(LittleEndian::read_i32)
    }
}

fn check_aligned(table: &'static str, len: usize, width: usize) -> Result<()> {
    if len % width != 0 {
        return Err(LayoutViolation::MisalignedTable { table, len, width });
    }
    Ok(())
}

fn parse_record(chunk: &[u8]) -> Result<RangeRecord> {
    let raw: &[u8; RANGE_RECORD_LEN] =
        chunk.try_into().map_err(|_| LayoutViolation::Truncated {
            what: "range record",
            needed: RANGE_RECORD_LEN,
            actual: chunk.len(),
        })?;
    Ok(RangeRecord::parse(raw))
}
