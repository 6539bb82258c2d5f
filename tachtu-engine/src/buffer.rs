//! Scoped ownership of one engine result buffer

use crate::gateway::{Engine, RawBuffer};
use std::fmt;
use std::slice;
use tachtu_core::layout::{BufferHeader, CODEPOINT_WIDTH, HEADER_LEN};
use tachtu_core::{Decoder, LayoutViolation, ResultView, Token};

/// Exclusive owner of one result buffer
///
/// The buffer is released exactly once, when the value is dropped. Consuming
/// methods ([`ResultBuffer::into_tokens`], [`ResultBuffer::release`]) make
/// use after release a compile error. The raw pointer inside keeps the type
/// `!Send` and `!Sync`.
pub struct ResultBuffer<'e, E: Engine + ?Sized> {
    engine: &'e E,
    raw: RawBuffer,
}

impl<'e, E: Engine + ?Sized> ResultBuffer<'e, E> {
    /// Take ownership of a buffer returned by `engine`
    ///
    /// # Safety
    ///
    /// `raw` must have been returned by `engine.segment(..)`, must not be
    /// released yet, and must not be owned by any other `ResultBuffer`.
    pub unsafe fn from_raw(engine: &'e E, raw: RawBuffer) -> Self {
        Self { engine, raw }
    }

    /// Borrow the buffer's tables through a bounds-checked view
    ///
    /// The codepoint slice is sized from the largest range end, so nothing
    /// past `max(endPos)` is ever mapped.
    pub fn view(&self) -> Result<ResultView<'_>, LayoutViolation> {
        // SAFETY: the engine contract guarantees a live 64-byte header.
        let header_bytes = unsafe { slice::from_raw_parts(self.raw.as_ptr(), HEADER_LEN) };
        let header = BufferHeader::parse(header_bytes)?;

        // SAFETY: table addresses and counts come from the header of a live
        // buffer; see `Engine`.
        let ranges = unsafe {
            table(
                "range",
                header.ranges_addr(),
                header.ranges_len(),
                header.ranges_byte_len(),
            )?
        };
        let space_positions = unsafe {
            table(
                "space-position",
                header.space_positions_addr(),
                header.space_positions_len(),
                header.space_positions_byte_len(),
            )?
        };

        let codepoints = ResultView::required_normalized_len(ranges)?;
        let normalized = unsafe {
            table(
                "normalized",
                header.normalized_addr(),
                codepoints,
                codepoints * CODEPOINT_WIDTH,
            )?
        };

        ResultView::new(normalized, ranges, space_positions)
    }

    /// Decode the buffer without releasing it
    pub fn decode(&self, for_transforming: bool) -> Result<Vec<Token>, LayoutViolation> {
        let view = self.view()?;
        Decoder::new(for_transforming).decode(&view)
    }

    /// Decode the buffer, then release it
    ///
    /// The buffer is released whether decoding succeeds or not.
    pub fn into_tokens(self, for_transforming: bool) -> Result<Vec<Token>, LayoutViolation> {
        self.decode(for_transforming)
    }

    /// Release the buffer without decoding it
    pub fn release(self) {}

    /// Underlying handle
    pub fn raw(&self) -> RawBuffer {
        self.raw
    }
}

impl<E: Engine + ?Sized> Drop for ResultBuffer<'_, E> {
    fn drop(&mut self) {
        // SAFETY: `from_raw` made this value the sole owner, and drop runs once.
        unsafe { self.engine.release(self.raw) }
    }
}

impl<E: Engine + ?Sized> fmt::Debug for ResultBuffer<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultBuffer")
            .field("address", &format_args!("{:#x}", self.raw.address()))
            .finish()
    }
}

/// Map one table of a live buffer
///
/// A zero count never touches the address: engines publish empty tables with
/// a null data pointer.
///
/// # Safety
///
/// A non-null `address` must point at `byte_len` readable bytes that outlive
/// the returned slice.
unsafe fn table<'a>(
    name: &'static str,
    address: u64,
    count: usize,
    byte_len: usize,
) -> Result<&'a [u8], LayoutViolation> {
    if count == 0 {
        return Ok(&[]);
    }
    if address == 0 {
        return Err(LayoutViolation::NullTable { table: name, count });
    }
    Ok(slice::from_raw_parts(address as usize as *const u8, byte_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{FixtureEngine, FixtureResult};
    use crate::gateway::SegmentRequest;
    use tachtu_core::SegmentationOptions;

    fn acquire<'e>(engine: &'e FixtureEngine, text: &str) -> ResultBuffer<'e, FixtureEngine> {
        let request = SegmentRequest::new(text, SegmentationOptions::default()).unwrap();
        let raw = engine.segment(&request).unwrap();
        unsafe { ResultBuffer::from_raw(engine, raw) }
    }

    #[test]
    fn test_view_reads_fixture_layout() {
        let engine = FixtureEngine::new().script(
            "hello",
            FixtureResult::new("hello").range(0, 5).space_at(2),
        );
        let buffer = acquire(&engine, "hello");

        let view = buffer.view().unwrap();
        assert_eq!(view.range_count(), 1);
        assert_eq!(view.space_positions().collect::<Vec<_>>(), vec![2]);
        assert_eq!(view.max_range_end(), 5);
    }

    #[test]
    fn test_decode_is_repeatable_before_release() {
        let engine = FixtureEngine::new().script(
            "hello",
            FixtureResult::new("hello").range(0, 5).space_at(2),
        );
        let buffer = acquire(&engine, "hello");

        let first = buffer.decode(false).unwrap();
        let second = buffer.decode(false).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].text(), "he llo");
        assert_eq!(buffer.decode(true).unwrap()[0].text(), "he_llo");
        assert_eq!(engine.releases(), 0);
    }

    #[test]
    fn test_into_tokens_releases_once() {
        let engine = FixtureEngine::new();
        let buffer = acquire(&engine, "xin chào");
        assert_eq!(engine.live_buffers(), 1);

        let tokens = buffer.into_tokens(false).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(engine.live_buffers(), 0);
        assert_eq!(engine.releases(), 1);
    }

    #[test]
    fn test_release_without_decoding() {
        let engine = FixtureEngine::new();
        acquire(&engine, "a b c").release();
        assert_eq!(engine.releases(), 1);
        assert_eq!(engine.live_buffers(), 0);
    }

    #[test]
    fn test_empty_tables_use_null_pointers() {
        let engine = FixtureEngine::new().script("   ", FixtureResult::new("   "));
        let buffer = acquire(&engine, "   ");

        let view = buffer.view().unwrap();
        assert_eq!(view.range_count(), 0);
        assert_eq!(view.space_position_count(), 0);
        assert!(buffer.into_tokens(false).unwrap().is_empty());
        assert_eq!(engine.releases(), 1);
    }

    #[test]
    fn test_layout_violation_still_releases() {
        let engine = FixtureEngine::new().script(
            "ab",
            FixtureResult::from_codepoints(vec!['a' as u32, 0xDFFF]).range(0, 2),
        );
        let buffer = acquire(&engine, "ab");

        let err = buffer.into_tokens(false).unwrap_err();
        assert!(matches!(err, LayoutViolation::InvalidCodepoint { index: 1, .. }));
        assert_eq!(engine.releases(), 1);
    }

    #[test]
    fn test_debug_shows_address() {
        let engine = FixtureEngine::new();
        let buffer = acquire(&engine, "x");
        assert!(format!("{buffer:?}").starts_with("ResultBuffer { address: 0x"));
    }
}
