//! Segmentation output tokens

use crate::layout::RangeRecord;
use std::fmt;
use std::ops::Range;

/// Lexical class the engine assigned to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenKind {
    /// Word or multi-syllable compound
    Word,
    /// Number, including `1.000` and `3,5`
    Number,
    /// Whitespace
    Space,
    /// Punctuation
    Punct,
    /// Value outside the known set
    Unknown(i32),
}

impl TokenKind {
    /// Map the raw engine value
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => TokenKind::Word,
            1 => TokenKind::Number,
            2 => TokenKind::Space,
            3 => TokenKind::Punct,
            other => TokenKind::Unknown(other),
        }
    }

    /// Upper-case label used in verbose listings
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Word => "WORD",
            TokenKind::Number => "NUMBER",
            TokenKind::Space => "SPACE",
            TokenKind::Punct => "PUNCT",
            TokenKind::Unknown(_) => "UNKNOWN",
        }
    }
}

/// Segment type the engine assigned to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SegmentType {
    /// Ordinary segment
    Other,
    /// Segment the engine marks as skippable
    Skip,
    /// Part of a URL
    Url,
    /// Last part of a URL
    EndUrl,
    /// End of a segment
    EndSegment,
    /// Value outside the known set
    Unknown(i32),
}

impl SegmentType {
    /// Map the raw engine value
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => SegmentType::Other,
            1 => SegmentType::Skip,
            2 => SegmentType::Url,
            3 => SegmentType::EndUrl,
            4 => SegmentType::EndSegment,
            other => SegmentType::Unknown(other),
        }
    }

    /// Upper-case label used in verbose listings
    pub fn label(&self) -> &'static str {
        match self {
            SegmentType::Other => "OTHER",
            SegmentType::Skip => "SKIP",
            SegmentType::Url => "URL",
            SegmentType::EndUrl => "END",
            SegmentType::EndSegment => "END_SEG",
            SegmentType::Unknown(_) => "UNKNOWN",
        }
    }
}

/// One segmented token
///
/// Tokens own their text and keep no reference to the buffer they were
/// decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    text: String,
    kind: TokenKind,
    segment_type: SegmentType,
    normalized: Range<usize>,
    original: Range<usize>,
}

impl Token {
    /// Build a token from reconstructed text and its range record
    ///
    /// Records read through a [`ResultView`](crate::ResultView) have
    /// non-negative offsets; a negative offset in a hand-built record is
    /// clamped to 0.
    pub fn from_record(text: String, record: &RangeRecord) -> Self {
        let offset = |value: i32| usize::try_from(value).unwrap_or(0);
        Self {
            text,
            kind: TokenKind::from_raw(record.kind),
            segment_type: SegmentType::from_raw(record.segment_type),
            normalized: offset(record.normalized_start)..offset(record.normalized_end),
            original: offset(record.original_start)..offset(record.original_end),
        }
    }

    /// Build a plain word token with no position information
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: TokenKind::Word,
            segment_type: SegmentType::Other,
            normalized: 0..0,
            original: 0..0,
        }
    }

    /// Token text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Token text (alias of [`Token::text`])
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the token and return its text
    pub fn into_text(self) -> String {
        self.text
    }

    /// Lexical class
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Segment type
    pub fn segment_type(&self) -> SegmentType {
        self.segment_type
    }

    /// Whether the token belongs to a URL
    pub fn is_url_related(&self) -> bool {
        matches!(self.segment_type, SegmentType::Url | SegmentType::EndUrl)
    }

    /// Codepoint interval in the normalized text
    pub fn normalized_range(&self) -> Range<usize> {
        self.normalized.clone()
    }

    /// Interval in the original input as reported by the engine
    pub fn original_range(&self) -> Range<usize> {
        self.original.clone()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.text
    }
}

/// Collect token texts
pub fn tokens_to_strings(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|t| t.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: i32, segment_type: i32) -> RangeRecord {
        RangeRecord {
            normalized_start: 4,
            normalized_end: 9,
            original_start: 5,
            original_end: 12,
            kind,
            segment_type,
        }
    }

    #[test]
    fn test_token_from_record() {
        let token = Token::from_record("hà nội".to_string(), &record(0, 0));

        assert_eq!(token.text(), "hà nội");
        assert_eq!(token.kind(), TokenKind::Word);
        assert_eq!(token.segment_type(), SegmentType::Other);
        assert_eq!(token.normalized_range(), 4..9);
        assert_eq!(token.original_range(), 5..12);
        assert_eq!(token.to_string(), "hà nội");
    }

    #[test]
    fn test_unknown_raw_values_preserved() {
        let token = Token::from_record("x".to_string(), &record(42, -3));
        assert_eq!(token.kind(), TokenKind::Unknown(42));
        assert_eq!(token.kind().label(), "UNKNOWN");
        assert_eq!(token.segment_type(), SegmentType::Unknown(-3));
    }

    #[test]
    fn test_url_related() {
        assert!(Token::from_record(String::new(), &record(0, 2)).is_url_related());
        assert!(Token::from_record(String::new(), &record(0, 3)).is_url_related());
        assert!(!Token::from_record(String::new(), &record(0, 1)).is_url_related());
    }

    #[test]
    fn test_labels() {
        assert_eq!(TokenKind::from_raw(1).label(), "NUMBER");
        assert_eq!(TokenKind::from_raw(3).label(), "PUNCT");
        assert_eq!(SegmentType::from_raw(3).label(), "END");
        assert_eq!(SegmentType::from_raw(4).label(), "END_SEG");
    }

    #[test]
    fn test_tokens_to_strings() {
        let tokens = vec![Token::new("tách"), Token::new("từ")];
        assert_eq!(tokens_to_strings(&tokens), vec!["tách", "từ"]);
        assert_eq!(String::from(tokens[1].clone()), "từ");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_token_serializes() {
        let token = Token::from_record("3,5".to_string(), &record(1, 1));
        let json = serde_json::to_value(&token).unwrap();

        assert_eq!(json["text"], "3,5");
        assert_eq!(json["kind"], "number");
        assert_eq!(json["segment_type"], "skip");
        assert_eq!(json["original"]["start"], 5);
    }
}
