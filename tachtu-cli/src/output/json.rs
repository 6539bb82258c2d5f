//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tachtu_engine::Token;

/// JSON formatter - outputs all lines as one JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    lines: Vec<LineData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct LineData {
    /// The input line
    pub input: String,
    /// Tokens of the line, in engine order
    pub tokens: Vec<Token>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            lines: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_line(&mut self, input: &str, tokens: &[Token]) -> Result<()> {
        self.lines.push(LineData {
            input: input.to_string(),
            tokens: tokens.to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.lines)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.lines)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
