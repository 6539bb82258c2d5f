//! Output formatting module

use anyhow::Result;
use std::io::Write;
use tachtu_engine::Token;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the tokens of one input line
    fn format_line(&mut self, input: &str, tokens: &[Token]) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod original;
pub mod tsv;
pub mod verbose;

pub use json::JsonFormatter;
pub use original::OriginalFormatter;
pub use tsv::TsvFormatter;
pub use verbose::VerboseFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tokens separated by TAB
    Tsv,
    /// Input text with `_` joining the syllables of each token
    Original,
    /// Kind, text, segment type and offsets of each token
    Verbose,
    /// JSON array of lines with their tokens
    Json,
}

impl OutputFormat {
    /// Name accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Original => "original",
            OutputFormat::Verbose => "verbose",
            OutputFormat::Json => "json",
        }
    }

    /// One-line description
    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tokens separated by TAB",
            OutputFormat::Original => {
                "spaces inside tokens become underscores, the rest is kept as in the input"
            }
            OutputFormat::Verbose => "kind, text, segment type and offsets of each token",
            OutputFormat::Json => "JSON array of {input, tokens} objects",
        }
    }

    /// Whether tokens must be decoded with `_` separators
    pub fn needs_transforming(self) -> bool {
        matches!(self, OutputFormat::Original)
    }

    /// Build a formatter writing to `writer`
    pub fn formatter<'a, W: Write + 'a>(
        self,
        writer: W,
        pretty_json: bool,
    ) -> Box<dyn OutputFormatter + 'a> {
        match self {
            OutputFormat::Tsv => Box::new(TsvFormatter::new(writer)),
            OutputFormat::Original => Box::new(OriginalFormatter::new(writer)),
            OutputFormat::Verbose => Box::new(VerboseFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        }
    }
}
