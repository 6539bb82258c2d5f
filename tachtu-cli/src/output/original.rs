//! Original-text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use tachtu_engine::Token;

/// Original formatter
///
/// Reproduces the input line with each token replaced by its text, spaces
/// inside a token turned into underscores. Text between tokens is copied from
/// the input; adjacent tokens get a single space between them.
pub struct OriginalFormatter<W: Write> {
    writer: W,
}

impl<W: Write> OriginalFormatter<W> {
    /// Create a new original-text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

/// Rebuild `input` around `tokens` using their original byte offsets
pub fn render(input: &str, tokens: &[Token]) -> String {
    let mut line = String::with_capacity(input.len() + tokens.len());
    let mut cursor = 0;

    for (i, token) in tokens.iter().enumerate() {
        let original = token.original_range();
        match input.get(cursor..original.start) {
            Some(gap) if !gap.is_empty() => line.push_str(gap),
            _ if i > 0 => line.push(' '),
            _ => {}
        }
        line.push_str(&token.text().replace(' ', "_"));
        cursor = cursor.max(original.end);
    }

    if let Some(rest) = input.get(cursor..) {
        line.push_str(rest);
    }
    line
}

impl<W: Write> OutputFormatter for OriginalFormatter<W> {
    fn format_line(&mut self, input: &str, tokens: &[Token]) -> Result<()> {
        writeln!(self.writer, "{}", render(input, tokens))?;
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
    use tachtu_engine::{FixtureEngine, FixtureResult, RangeRecord, SegmentationOptions, Tokenizer};

    fn segment(engine: FixtureEngine, input: &str) -> Vec<Token> {
        Tokenizer::initialize(engine, "/d")
            .unwrap()
            .segment(input, SegmentationOptions::transforming())
            .unwrap()
    }

    #[test]
    fn test_gaps_copied_verbatim() {
        let input = "Xin  chào , Hà Nội!";
        let tokens = segment(FixtureEngine::new(), input);
        assert_eq!(render(input, &tokens), input);
    }

    #[test]
    fn test_compound_joined_with_underscore() {
        let input = "sinh viên giỏi";
        let engine = FixtureEngine::new().script(
            input,
            FixtureResult::new("sinhviên giỏi")
                .record(RangeRecord {
                    normalized_start: 0,
                    normalized_end: 8,
                    original_start: 0,
                    original_end: 10,
                    kind: 0,
                    segment_type: 0,
                })
                .record(RangeRecord {
                    normalized_start: 9,
                    normalized_end: 13,
                    original_start: 11,
                    original_end: 17,
                    kind: 0,
                    segment_type: 0,
                })
                .space_at(4),
        );

        let tokens = segment(engine, input);
        assert_eq!(render(input, &tokens), "sinh_viên giỏi");
    }

    #[test]
    fn test_adjacent_tokens_get_a_space() {
        let tokens = [with_original("ab", 0..2), with_original("cd", 2..4)];
        assert_eq!(render("abcd", &tokens), "ab cd");
    }

    #[test]
    fn test_no_tokens_keeps_input() {
        assert_eq!(render(" ... ", &[]), " ... ");
    }

    fn with_original(text: &str, range: std::ops::Range<i32>) -> Token {
        Token::from_record(
            text.to_string(),
            &RangeRecord {
                normalized_start: 0,
                normalized_end: 0,
                original_start: range.start,
                original_end: range.end,
                kind: 0,
                segment_type: 0,
            },
        )
    }
}
