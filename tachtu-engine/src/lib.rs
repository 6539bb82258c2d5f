//! Engine gateway and tokenizer facade for Vietnamese word segmentation
//!
//! Segmentation itself happens in an external engine reached through a C
//! ABI. This crate owns the boundary: it marshals requests, takes scoped
//! ownership of each result buffer, decodes it with [`tachtu_core`] and
//! hands the buffer back to the engine exactly once.
//!
//! # Example
//!
//! ```rust
//! use tachtu_engine::{FixtureEngine, Tokenizer};
//!
//! let tokenizer = Tokenizer::initialize(FixtureEngine::new(), "/usr/share/tokenizer/dicts")?;
//! let words = tokenizer.segment_to_strings("Tôi yêu Hà Nội")?;
//! assert_eq!(words, vec!["Tôi", "yêu", "Hà", "Nội"]);
//! # Ok::<(), tachtu_engine::TokenizerError>(())
//! ```
//!
//! With the `native` feature, `NativeEngine` links the real engine.

#![warn(missing_docs)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod fixture;
pub mod gateway;
pub mod init;
#[cfg(feature = "native")]
pub mod native;
pub mod tokenizer;

pub use buffer::ResultBuffer;
pub use config::TokenizerConfig;
pub use error::{Result, TokenizerError};
pub use fixture::{FixtureEngine, FixtureResult};
pub use gateway::{Engine, RawBuffer, SegmentRequest};
pub use init::{InitOnce, STATUS_ALREADY_INITIALIZED};
#[cfg(feature = "native")]
pub use native::NativeEngine;
pub use tokenizer::Tokenizer;

pub use tachtu_core::{
    tokens_to_strings, LayoutViolation, RangeRecord, SegmentType, SegmentationOptions, Token,
    TokenKind, TokenizeMode,
};
