//! Token and location types produced by the [`Scanner`](super::lexer::Scanner).

use std::fmt;

/// Number of bytes of token text shown by the `Display` preview.
const PREVIEW_LEN: usize = 10;

/// Source location information for error reporting (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Computes the location of byte `offset` within `input`.
    ///
    /// Columns count bytes, not characters. Offsets past the end are clamped.
    pub fn at_offset(input: &[u8], offset: usize) -> Self {
        let prefix = &input[..offset.min(input.len())];
        let line = 1 + prefix.iter().filter(|&&b| b == b'\n').count();
        let line_start = prefix
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);
        Self::new(line, prefix.len() - line_start + 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Classification of a span of source text.
///
/// Line and block comments are distinguished only while scanning; both are
/// emitted as [`TokenKind::Comment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Anything outside comments and string literals.
    Code,
    /// A `// ...` comment (including its newline) or a `/* ... */` comment.
    Comment,
    /// A double-quoted string literal, quotes included.
    String,
    /// Terminal marker. Always empty.
    Eof,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Code => "Code",
            TokenKind::Comment => "Comment",
            TokenKind::String => "String",
            TokenKind::Eof => "EOF",
        }
    }
}

/// A maximal classified span of the scanned input.
///
/// `text` borrows the exact input bytes, delimiters included, so the texts of
/// all tokens of a scan concatenate back to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a [u8],
    /// Byte offset of `text` within the scanned input.
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a [u8], offset: usize) -> Self {
        Self { kind, text, offset }
    }

    /// Returns the location where this token starts in `input`.
    pub fn location(&self, input: &[u8]) -> SourceLocation {
        SourceLocation::at_offset(input, self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            return write!(f, "EOF");
        }
        let shown = &self.text[..self.text.len().min(PREVIEW_LEN)];
        let ellipsis = if self.text.len() > PREVIEW_LEN { "..." } else { "" };
        write!(
            f,
            "{}: {:?}{}",
            self.kind.name(),
            String::from_utf8_lossy(shown),
            ellipsis
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_at_offset() {
        let input = b"int x;\nlong y;\n";
        assert_eq!(SourceLocation::at_offset(input, 0), SourceLocation::new(1, 1));
        assert_eq!(SourceLocation::at_offset(input, 4), SourceLocation::new(1, 5));
        assert_eq!(SourceLocation::at_offset(input, 7), SourceLocation::new(2, 1));
        assert_eq!(SourceLocation::at_offset(input, 12), SourceLocation::new(2, 6));
        assert_eq!(SourceLocation::at_offset(input, 999), SourceLocation::new(3, 1));
    }

    #[test]
    fn test_display_truncates_long_text() {
        let token = Token::new(TokenKind::Code, b"unsigned long long x;", 0);
        assert_eq!(token.to_string(), "Code: \"unsigned l\"...");

        let token = Token::new(TokenKind::String, b"\"%ld\"", 3);
        assert_eq!(token.to_string(), "String: \"\\\"%ld\\\"\"");

        let token = Token::new(TokenKind::Eof, b"", 5);
        assert_eq!(token.to_string(), "EOF");
    }
}
