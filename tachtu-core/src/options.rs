//! Per-call segmentation options

use std::fmt;
use std::str::FromStr;

/// How the engine should treat the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenizeMode {
    /// Plain text
    #[default]
    Normal,
    /// Host name
    Host,
    /// URL
    Url,
}

impl TokenizeMode {
    /// All modes, in engine value order
    pub const ALL: [TokenizeMode; 3] = [TokenizeMode::Normal, TokenizeMode::Host, TokenizeMode::Url];

    /// Value passed across the engine boundary
    pub fn as_raw(self) -> i32 {
        match self {
            TokenizeMode::Normal => 0,
            TokenizeMode::Host => 1,
            TokenizeMode::Url => 2,
        }
    }

    /// Lower-case name
    pub fn name(self) -> &'static str {
        match self {
            TokenizeMode::Normal => "normal",
            TokenizeMode::Host => "host",
            TokenizeMode::Url => "url",
        }
    }
}

impl fmt::Display for TokenizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tokenize mode '{0}' (expected normal, host or url)")]
pub struct ParseModeError(String);

impl FromStr for TokenizeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(TokenizeMode::Normal),
            "host" => Ok(TokenizeMode::Host),
            "url" => Ok(TokenizeMode::Url),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Options for one segmentation call
///
/// `for_transforming` changes reconstruction only: separators recorded by the
/// engine are rendered as `_` instead of a space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentationOptions {
    /// Render recorded separators as `_`
    pub for_transforming: bool,
    /// Tokenization mode
    pub mode: TokenizeMode,
    /// Keep punctuation tokens
    pub keep_punctuation: bool,
}

impl SegmentationOptions {
    /// Default options: plain text, spaces as separators, punctuation dropped
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for URL segmentation
    pub fn url() -> Self {
        Self::new().mode(TokenizeMode::Url)
    }

    /// Options for host name segmentation
    pub fn host() -> Self {
        Self::new().mode(TokenizeMode::Host)
    }

    /// Options for transforming output (`_` separators)
    pub fn transforming() -> Self {
        Self::new().for_transforming(true)
    }

    /// Set the transforming flag
    pub fn for_transforming(mut self, enabled: bool) -> Self {
        self.for_transforming = enabled;
        self
    }

    /// Set the tokenization mode
    pub fn mode(mut self, mode: TokenizeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set whether punctuation is kept
    pub fn keep_punctuation(mut self, enabled: bool) -> Self {
        self.keep_punctuation = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_raw_values() {
        assert_eq!(TokenizeMode::Normal.as_raw(), 0);
        assert_eq!(TokenizeMode::Host.as_raw(), 1);
        assert_eq!(TokenizeMode::Url.as_raw(), 2);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("URL".parse::<TokenizeMode>().unwrap(), TokenizeMode::Url);
        assert_eq!("host".parse::<TokenizeMode>().unwrap(), TokenizeMode::Host);
        let err = "sticky".parse::<TokenizeMode>().unwrap_err();
        assert!(err.to_string().contains("sticky"));
    }

    #[test]
    fn test_mode_display_round_trips_names() {
        for mode in TokenizeMode::ALL {
            assert_eq!(mode.to_string().parse::<TokenizeMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_option_presets() {
        let defaults = SegmentationOptions::new();
        assert!(!defaults.for_transforming);
        assert_eq!(defaults.mode, TokenizeMode::Normal);
        assert!(!defaults.keep_punctuation);

        assert_eq!(SegmentationOptions::url().mode, TokenizeMode::Url);
        assert_eq!(SegmentationOptions::host().mode, TokenizeMode::Host);
        assert!(SegmentationOptions::transforming().for_transforming);

        let custom = SegmentationOptions::new()
            .keep_punctuation(true)
            .mode(TokenizeMode::Host);
        assert!(custom.keep_punctuation);
        assert_eq!(custom.mode, TokenizeMode::Host);
    }
}
