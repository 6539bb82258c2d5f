//! Tokenizer error types

use std::path::PathBuf;
use tachtu_core::LayoutViolation;
use thiserror::Error;

/// Errors surfaced by the tokenizer
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// The engine reported a negative status while loading dictionaries
    #[error("tokenizer cannot be initialized from {dict_path}: status {status}")]
    InitFailed {
        /// Dictionary directory passed to the engine
        dict_path: PathBuf,
        /// Status returned by the engine
        status: i32,
    },

    /// The input cannot cross the engine's C boundary
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The engine returned a buffer that breaks the binary contract
    #[error("engine result buffer violates its layout: {0}")]
    MemoryLayoutViolation(#[from] LayoutViolation),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for TokenizerError {
    fn from(err: toml::de::Error) -> Self {
        TokenizerError::Config(err.to_string())
    }
}

/// Result type for tokenizer operations
pub type Result<T> = std::result::Result<T, TokenizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_failed_display() {
        let err = TokenizerError::InitFailed {
            dict_path: PathBuf::from("/usr/share/tokenizer/dicts"),
            status: -1,
        };
        assert_eq!(
            err.to_string(),
            "tokenizer cannot be initialized from /usr/share/tokenizer/dicts: status -1"
        );
    }

    #[test]
    fn test_layout_violation_converts() {
        let err: TokenizerError = LayoutViolation::NullBuffer.into();
        assert!(matches!(
            err,
            TokenizerError::MemoryLayoutViolation(LayoutViolation::NullBuffer)
        ));
        assert!(err.to_string().contains("null result buffer"));
    }

    #[test]
    fn test_toml_error_converts() {
        let parse = toml::from_str::<toml::Table>("dict_path = ").unwrap_err();
        let err: TokenizerError = parse.into();
        assert!(matches!(err, TokenizerError::Config(_)));
    }
}
