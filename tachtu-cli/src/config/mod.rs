//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tachtu_engine::TokenizerConfig;

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Engine used for segmentation
    #[serde(default)]
    pub engine: EngineKind,

    /// Dictionary location and default options
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.output.format()?;
        config.tokenizer.validate()?;
        Ok(config)
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "tsv".to_string(),
            pretty_json: true,
        }
    }
}

impl OutputConfig {
    /// Parsed default format
    pub fn format(&self) -> Result<OutputFormat, CliError> {
        OutputFormat::from_str(&self.default_format, true).map_err(|_| {
            CliError::ConfigError(format!(
                "unknown output format '{}' (expected tsv, original, verbose or json)",
                self.default_format
            ))
        })
    }
}

/// Segmentation engine selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// The linked native engine (needs dictionaries)
    Native,
    /// Split on whitespace; needs no dictionaries
    Whitespace,
}

impl Default for EngineKind {
    fn default() -> Self {
        if cfg!(feature = "native") {
            EngineKind::Native
        } else {
            EngineKind::Whitespace
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Native => f.write_str("native"),
            EngineKind::Whitespace => f.write_str("whitespace"),
        }
    }
}
