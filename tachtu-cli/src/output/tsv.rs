//! TSV output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use tachtu_engine::Token;

/// TSV formatter - one line of TAB-separated tokens per input line
pub struct TsvFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TsvFormatter<W> {
    /// Create a new TSV formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TsvFormatter<W> {
    fn format_line(&mut self, _input: &str, tokens: &[Token]) -> Result<()> {
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b"\t")?;
            }
            self.writer.write_all(token.text().as_bytes())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_joined_by_tab() {
        let mut out = Vec::new();
        let mut formatter = TsvFormatter::new(&mut out);
        formatter
            .format_line("", &[Token::new("sinh viên"), Token::new("học")])
            .unwrap();
        formatter.format_line("", &[]).unwrap();
        formatter.finish().unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "sinh viên\thọc\n\n");
    }
}
