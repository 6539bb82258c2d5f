//! Tokenizer configuration

use crate::error::{Result, TokenizerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tachtu_core::SegmentationOptions;

/// Default configuration constants
pub mod defaults {
    /// Dictionary directory used when none is configured
    pub const DICT_PATH: &str = "/usr/share/tokenizer/dicts";

    /// Environment variable overriding [`DICT_PATH`]
    pub const DICT_PATH_ENV: &str = "TACHTU_DICT_PATH";
}

/// Dictionary location and default per-call options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Directory holding the engine's dictionaries
    pub dict_path: PathBuf,

    /// Options used when a call does not pass its own
    pub options: SegmentationOptions,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            dict_path: PathBuf::from(defaults::DICT_PATH),
            options: SegmentationOptions::default(),
        }
    }
}

impl TokenizerConfig {
    /// Default configuration with the dictionary path taken from
    /// `TACHTU_DICT_PATH` when set
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(defaults::DICT_PATH_ENV).filter(|p| !p.is_empty()) {
            config.dict_path = PathBuf::from(path);
        }
        config
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            TokenizerError::Config(msg) => {
                TokenizerError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TokenizerError::Config(e.to_string()))
    }

    /// Set the dictionary path
    pub fn with_dict_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dict_path = path.into();
        self
    }

    /// Set the default options
    pub fn with_options(mut self, options: SegmentationOptions) -> Self {
        self.options = options;
        self
    }

    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> Result<()> {
        if self.dict_path.as_os_str().is_empty() {
            return Err(TokenizerError::Config(
                "dict_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
