//! Verbose output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use tachtu_engine::Token;

/// Verbose formatter
///
/// Each token is written as `KIND text SEGTYPE [orig_start-orig_end]{norm_start-norm_end}`,
/// tokens separated by TAB.
pub struct VerboseFormatter<W: Write> {
    writer: W,
}

impl<W: Write> VerboseFormatter<W> {
    /// Create a new verbose formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn describe(token: &Token) -> String {
    let original = token.original_range();
    let normalized = token.normalized_range();
    format!(
        "{} {} {} [{}-{}]{{{}-{}}}",
        token.kind().label(),
        token.text(),
        token.segment_type().label(),
        original.start,
        original.end,
        normalized.start,
        normalized.end
    )
}

impl<W: Write> OutputFormatter for VerboseFormatter<W> {
    fn format_line(&mut self, _input: &str, tokens: &[Token]) -> Result<()> {
        let line: Vec<String> = tokens.iter().map(describe).collect();
        writeln!(self.writer, "{}", line.join("\t"))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
