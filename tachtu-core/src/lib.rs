//! Result-buffer decoding for Vietnamese word segmentation
//!
//! A segmentation engine answers each call with one binary buffer: a
//! normalized copy of the input as 4-byte codepoints, a table of token
//! ranges over that copy, and a table of positions where a separator must be
//! re-inserted. This crate turns such a buffer into owned [`Token`]s.
//!
//! # Layers
//!
//! - [`layout`]: fixed offsets and record widths of the buffer
//! - [`view`]: a bounds-checked reader over the buffer's tables
//! - [`decoder`]: token reconstruction
//!
//! Acquiring and releasing buffers is the job of `tachtu-engine`.
//!
//! # Example
//!
//! ```rust
//! use tachtu_core::{Decoder, ResultView};
//!
//! let normalized: Vec<u8> = "hello".chars().flat_map(|c| (c as u32).to_le_bytes()).collect();
//! let ranges: Vec<u8> = [0i32, 5, 0, 0, 0, 0].into_iter().flat_map(i32::to_le_bytes).collect();
//! let spaces: Vec<u8> = 2i32.to_le_bytes().to_vec();
//!
//! let view = ResultView::new(&normalized, &ranges, &spaces).unwrap();
//! let tokens = Decoder::new(false).decode(&view).unwrap();
//! assert_eq!(tokens[0].text(), "he llo");
//! ```

#![warn(missing_docs)]

pub mod decoder;
pub mod error;
pub mod layout;
pub mod options;
pub mod token;
pub mod view;

pub use decoder::{Decoder, SPACE_SENTINEL};
pub use error::{LayoutViolation, Result};
pub use layout::{BufferHeader, RangeRecord};
pub use options::{ParseModeError, SegmentationOptions, TokenizeMode};
pub use token::{tokens_to_strings, SegmentType, Token, TokenKind};
pub use view::ResultView;
