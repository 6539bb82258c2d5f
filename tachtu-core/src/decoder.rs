//! Token reconstruction from a result view
//!
//! Each range record names a half-open codepoint interval of the normalized
//! text. Tokens are rebuilt codepoint by codepoint, and a separator is
//! emitted in front of the codepoint whose index matches the space cursor.
//!
//! The space cursor is never advanced, so only the first recorded
//! space-insertion position can ever produce a separator. This is existing
//! observable output and is kept as is; see
//! `test_space_cursor_is_not_advanced`.

use crate::error::{LayoutViolation, Result};
use crate::options::SegmentationOptions;
use crate::token::Token;
use crate::view::ResultView;

/// Terminates the materialized space-position list
pub const SPACE_SENTINEL: i32 = -1;

/// Rebuilds token text from a [`ResultView`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    for_transforming: bool,
}

impl Decoder {
    /// Create a decoder
    pub fn new(for_transforming: bool) -> Self {
        Self { for_transforming }
    }

    /// Create a decoder for the options a buffer was produced with
    pub fn from_options(options: &SegmentationOptions) -> Self {
        Self::new(options.for_transforming)
    }

    /// Separator inserted at recorded space positions
    pub fn separator(&self) -> char {
        if self.for_transforming {
            '_'
        } else {
            ' '
        }
    }

    /// Recorded space positions followed by [`SPACE_SENTINEL`]
    pub fn space_positions(view: &ResultView<'_>) -> Vec<i32> {
        let mut positions = Vec::with_capacity(view.space_position_count() + 1);
        positions.extend(view.space_positions());
        positions.push(SPACE_SENTINEL);
        positions
    }

    /// Decode every range into a token, in stored order
    ///
    /// Decoding only reads the view, so decoding the same view twice yields
    /// the same tokens.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutViolation`] if a codepoint is out of bounds or not a
    /// Unicode scalar value.
    pub fn decode(&self, view: &ResultView<'_>) -> Result<Vec<Token>> {
        let positions = Self::space_positions(view);
        let separator = self.separator();
        let space_cursor = 0;

        let mut tokens = Vec::with_capacity(view.range_count());
        for (index, record) in view.ranges().enumerate() {
            let mut text = String::with_capacity(record.len() + 1);
            for j in record.normalized_start..record.normalized_end {
                if j == positions[space_cursor] {
                    text.push(separator);
                }
                let at = usize::try_from(j).map_err(|_| LayoutViolation::InvalidRange {
                    index,
                    start: record.normalized_start,
                    end: record.normalized_end,
                })?;
                text.push(view.codepoint(at)?);
            }
            tokens.push(Token::from_record(text, &record));
        }

        Ok(tokens)
    }
}
