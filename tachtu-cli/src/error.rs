//! Error handling for the CLI application

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// No file matched the given patterns
    #[error("No files found matching: {0}")]
    FileNotFound(String),

    /// Invalid file pattern
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The selected engine is not compiled into this binary
    #[error("Engine '{0}' is not available in this build (rebuild with --features native)")]
    EngineUnavailable(String),
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_display() {
        let error = CliError::FileNotFound("*.txt".to_string());
        assert_eq!(error.to_string(), "No files found matching: *.txt");
    }

    #[test]
    fn test_invalid_pattern_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_engine_unavailable_display() {
        let error = CliError::EngineUnavailable("native".to_string());
        assert!(error.to_string().starts_with("Engine 'native' is not available"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::ConfigError("bad key".to_string()).into());
        let err = failure.unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: bad key");
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_unicode_in_messages() {
        let error = CliError::FileNotFound("dữ liệu/văn bản.txt".to_string());
        assert_eq!(error.to_string(), "No files found matching: dữ liệu/văn bản.txt");
    }
}
