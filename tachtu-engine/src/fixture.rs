//! In-process engine producing real result buffers
//!
//! `FixtureEngine` lays buffers out in Rust memory exactly as a native engine
//! would, so the gateway and decoder run their real code paths without
//! dictionaries. Scripted results are returned for exact inputs. Any other
//! input is split on whitespace.

use crate::gateway::{Engine, RawBuffer, SegmentRequest};
use std::collections::HashMap;
use std::ffi::CStr;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tachtu_core::layout::{
    HEADER_LEN, NORMALIZED_ADDR_OFFSET, RANGES_ADDR_OFFSET, RANGES_LEN_OFFSET,
    SPACE_POSITIONS_ADDR_OFFSET, SPACE_POSITIONS_LEN_OFFSET,
};
use tachtu_core::{RangeRecord, TokenKind};

/// Raw engine output for one input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureResult {
    normalized: Vec<u32>,
    ranges: Vec<RangeRecord>,
    space_positions: Vec<i32>,
}

impl FixtureResult {
    /// Start a result whose normalized text is `normalized`
    pub fn new(normalized: &str) -> Self {
        Self::from_codepoints(normalized.chars().map(u32::from).collect())
    }

    /// Start a result from raw codepoint values, valid or not
    pub fn from_codepoints(normalized: Vec<u32>) -> Self {
        Self {
            normalized,
            ..Self::default()
        }
    }

    /// Add a word range whose original offsets mirror the normalized ones
    pub fn range(self, start: i32, end: i32) -> Self {
        self.record(RangeRecord {
            normalized_start: start,
            normalized_end: end,
            original_start: start,
            original_end: end,
            kind: 0,
            segment_type: 0,
        })
    }

    /// Add a fully specified range record
    pub fn record(mut self, record: RangeRecord) -> Self {
        self.ranges.push(record);
        self
    }

    /// Record a space-insertion position
    pub fn space_at(mut self, position: i32) -> Self {
        self.space_positions.push(position);
        self
    }

    /// Split `text` on whitespace
    ///
    /// Each run becomes one range. Runs without letters or digits are
    /// punctuation and are dropped unless `keep_punctuation` is set. Original
    /// offsets are UTF-8 byte offsets into `text`.
    pub fn whitespace(text: &str, keep_punctuation: bool) -> Self {
        let mut result = Self::new(text);
        let mut run: Option<(usize, usize)> = None;
        let ends = text
            .char_indices()
            .enumerate()
            .map(|(index, (byte, c))| (index, byte, Some(c)))
            .chain(std::iter::once((text.chars().count(), text.len(), None)));

        for (index, byte, c) in ends {
            match (c.filter(|c| !c.is_whitespace()), run) {
                (Some(_), None) => run = Some((index, byte)),
                (None, Some((start, start_byte))) => {
                    let word = &text[start_byte..byte];
                    let kind = classify(word);
                    if kind != TokenKind::Punct || keep_punctuation {
                        result.ranges.push(RangeRecord {
                            normalized_start: clamp(start),
                            normalized_end: clamp(index),
                            original_start: clamp(start_byte),
                            original_end: clamp(byte),
                            kind: raw_kind(kind),
                            segment_type: 0,
                        });
                    }
                    run = None;
                }
                _ => {}
            }
        }
        result
    }
}

fn classify(word: &str) -> TokenKind {
    if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && word.chars().any(|c| c.is_ascii_digit())
    {
        TokenKind::Number
    } else if word.chars().any(char::is_alphanumeric) {
        TokenKind::Word
    } else {
        TokenKind::Punct
    }
}

fn raw_kind(kind: TokenKind) -> i32 {
    match kind {
        TokenKind::Word => 0,
        TokenKind::Number => 1,
        TokenKind::Space => 2,
        TokenKind::Punct => 3,
        TokenKind::Unknown(raw) => raw,
    }
}

fn clamp(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Memory behind one published buffer
///
/// Stored as byte vectors so the layout is little-endian on every target.
#[derive(Debug)]
struct Allocation {
    header: Vec<u8>,
    _normalized: Vec<u8>,
    _ranges: Vec<u8>,
    _space_positions: Vec<u8>,
}

impl Allocation {
    fn publish(result: &FixtureResult) -> Self {
        let normalized: Vec<u8> = result
            .normalized
            .iter()
            .flat_map(|c| c.to_le_bytes())
            .collect();
        let ranges: Vec<u8> = result
            .ranges
            .iter()
            .flat_map(|r| {
                [
                    r.normalized_start,
                    r.normalized_end,
                    r.original_start,
                    r.original_end,
                    r.kind,
                    r.segment_type,
                ]
                .into_iter()
                .flat_map(i32::to_le_bytes)
            })
            .collect();
        let space_positions: Vec<u8> = result
            .space_positions
            .iter()
            .flat_map(|p| p.to_le_bytes())
            .collect();

        let mut header = vec![0u8; HEADER_LEN];
        let mut put = |offset: usize, value: i64| {
            header[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
        };
        put(NORMALIZED_ADDR_OFFSET, address_of(&normalized));
        put(RANGES_LEN_OFFSET, result.ranges.len() as i64);
        put(RANGES_ADDR_OFFSET, address_of(&ranges));
        put(SPACE_POSITIONS_LEN_OFFSET, result.space_positions.len() as i64);
        put(SPACE_POSITIONS_ADDR_OFFSET, address_of(&space_positions));

        Self {
            header,
            _normalized: normalized,
            _ranges: ranges,
            _space_positions: space_positions,
        }
    }

    fn key(&self) -> usize {
        self.header.as_ptr() as usize
    }
}

// Empty tables are published as null, like an empty native vector.
fn address_of(table: &[u8]) -> i64 {
    if table.is_empty() {
        0
    } else {
        table.as_ptr() as usize as i64
    }
}

#[derive(Debug, Default)]
struct FixtureState {
    live: HashMap<usize, Allocation>,
    segment_calls: usize,
    releases: usize,
    dict_path: Option<PathBuf>,
}

/// In-process engine for tests and dictionary-free runs
#[derive(Debug, Default)]
pub struct FixtureEngine {
    init_status: i32,
    scripts: HashMap<String, FixtureResult>,
    state: Mutex<FixtureState>,
}

impl FixtureEngine {
    /// Engine that splits unscripted input on whitespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Status to report from `initialize`
    pub fn with_init_status(mut self, status: i32) -> Self {
        self.init_status = status;
        self
    }

    /// Answer `text` with `result`
    pub fn script(mut self, text: impl Into<String>, result: FixtureResult) -> Self {
        self.scripts.insert(text.into(), result);
        self
    }

    /// Number of `segment` calls so far
    pub fn segment_calls(&self) -> usize {
        self.lock().segment_calls
    }

    /// Number of buffers released so far
    pub fn releases(&self) -> usize {
        self.lock().releases
    }

    /// Number of buffers handed out and not yet released
    pub fn live_buffers(&self) -> usize {
        self.lock().live.len()
    }

    /// Dictionary path of the last `initialize` call
    pub fn dict_path(&self) -> Option<PathBuf> {
        self.lock().dict_path.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

unsafe impl Engine for FixtureEngine {
    fn initialize(&self, dict_path: &CStr) -> i32 {
        self.lock().dict_path = Some(PathBuf::from(dict_path.to_string_lossy().into_owned()));
        self.init_status
    }

    fn segment(&self, request: &SegmentRequest) -> Option<RawBuffer> {
        let text = request.text().to_string_lossy();
        let allocation = match self.scripts.get(text.as_ref()) {
            Some(result) => Allocation::publish(result),
            None => Allocation::publish(&FixtureResult::whitespace(
                &text,
                request.options().keep_punctuation,
            )),
        };

        let raw = RawBuffer::new(allocation.header.as_ptr().cast_mut());
        let mut state = self.lock();
        state.segment_calls += 1;
        state.live.insert(allocation.key(), allocation);
        raw
    }

    unsafe fn release(&self, buffer: RawBuffer) {
        let mut state = self.lock();
        let key = buffer.as_ptr() as usize;
        if state.live.remove(&key).is_none() {
            panic!("buffer {key:#x} released twice or not owned by this engine");
        }
        state.releases += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tachtu_core::SegmentationOptions;

    fn texts(result: &FixtureResult, text: &str) -> Vec<String> {
        result
            .ranges
            .iter()
            .map(|r| {
                text.chars()
                    .skip(r.normalized_start as usize)
                    .take((r.normalized_end - r.normalized_start) as usize)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_whitespace_split() {
        let text = "Tôi  yêu Việt Nam";
        let result = FixtureResult::whitespace(text, false);
        assert_eq!(texts(&result, text), vec!["Tôi", "yêu", "Việt", "Nam"]);

        let viet = &result.ranges[2];
        assert_eq!((viet.normalized_start, viet.normalized_end), (9, 13));
        assert_eq!(&text[viet.original_start as usize..viet.original_end as usize], "Việt");
    }

    #[test]
    fn test_whitespace_punctuation_and_numbers() {
        let text = "giá 1.000 , rẻ !";
        let dropped = FixtureResult::whitespace(text, false);
        assert_eq!(texts(&dropped, text), vec!["giá", "1.000", "rẻ"]);
        assert_eq!(dropped.ranges[1].kind, 1);

        let kept = FixtureResult::whitespace(text, true);
        assert_eq!(texts(&kept, text), vec!["giá", "1.000", ",", "rẻ", "!"]);
        assert_eq!(kept.ranges[2].kind, 3);
    }

    #[test]
    fn test_whitespace_blank_input() {
        assert!(FixtureResult::whitespace(" \t ", true).ranges.is_empty());
    }

    #[test]
    fn test_engine_tracks_calls_and_releases() {
        let engine = FixtureEngine::new();
        let request = SegmentRequest::new("a b", SegmentationOptions::default()).unwrap();

        let first = engine.segment(&request).unwrap();
        let second = engine.segment(&request).unwrap();
        assert_ne!(first, second);
        assert_eq!(engine.segment_calls(), 2);
        assert_eq!(engine.live_buffers(), 2);

        unsafe {
            engine.release(first);
            engine.release(second);
        }
        assert_eq!(engine.releases(), 2);
        assert_eq!(engine.live_buffers(), 0);
    }

    #[test]
    #[should_panic(expected = "released twice")]
    fn test_double_release_panics() {
        let engine = FixtureEngine::new();
        let request = SegmentRequest::new("a", SegmentationOptions::default()).unwrap();
        let raw = engine.segment(&request).unwrap();
        unsafe {
            engine.release(raw);
            engine.release(raw);
        }
    }

    #[test]
    fn test_initialize_records_path_and_status() {
        let engine = FixtureEngine::new().with_init_status(-1);
        let status = engine.initialize(c"/tmp/dicts");
        assert_eq!(status, -1);
        assert_eq!(engine.dict_path(), Some(PathBuf::from("/tmp/dicts")));
    }
}
