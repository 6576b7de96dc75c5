//! Scanner for C source text
//!
//! Splits raw source bytes into a lossless sequence of [`Token`]s: maximal
//! runs of code, comments and string literals. Nothing inside a run is
//! interpreted; the scanner only has to know where comments and strings begin
//! and end so that the rewrite rules never touch them.
//!
//! Character literals are not recognised, so the `"` in `'"'` opens a string.

use super::token::{SourceLocation, Token, TokenKind};
use crate::errors::ScanError;

const LINE_COMMENT_START: &[u8] = b"//";
const BLOCK_COMMENT_START: &[u8] = b"/*";
const BLOCK_COMMENT_END: &[u8] = b"*/";
const STRING_QUOTE: u8 = b'"';
const STRING_ESCAPE: u8 = b'\\';

/// Lexical mode of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    LineComment,
    BlockComment,
    StringLiteral,
    /// Input exhausted; the terminal marker is still to be emitted.
    Eof,
    /// Nothing more will be produced.
    Done,
}

/// State-machine scanner over one input buffer.
///
/// Yields `Ok(token)` for every span followed by a single [`TokenKind::Eof`]
/// token, or stops after the first `Err`. A scanner is one-shot: scanning the
/// same input again needs a fresh `Scanner`.
pub struct Scanner<'a> {
    input: &'a [u8],
    /// Start of the pending, not yet emitted span.
    start: usize,
    pos: usize,
    state: ScanState,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner over `input`, starting in code.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            state: ScanState::Code,
        }
    }

    /// Scan the entire input, excluding the terminal marker.
    pub fn tokenize(input: &'a [u8]) -> Result<Vec<Token<'a>>, ScanError> {
        Scanner::new(input)
            .filter(|token| !matches!(token, Ok(t) if t.is_eof()))
            .collect()
    }

    fn rest(&self) -> &'a [u8] {
        &self.input[self.pos.min(self.input.len())..]
    }

    fn emit(&mut self, kind: TokenKind) -> Token<'a> {
        let token = Token::new(kind, &self.input[self.start..self.pos], self.start);
        self.start = self.pos;
        token
    }

    /// Emit the pending code span, unless it is empty.
    fn flush_code(&mut self) -> Option<Token<'a>> {
        (self.pos > self.start).then(|| self.emit(TokenKind::Code))
    }

    fn scan_code(&mut self) -> Option<Token<'a>> {
        while self.pos < self.input.len() {
            let rest = self.rest();
            let next = if rest.starts_with(BLOCK_COMMENT_START) {
                ScanState::BlockComment
            } else if rest.starts_with(LINE_COMMENT_START) {
                ScanState::LineComment
            } else if rest[0] == STRING_QUOTE {
                ScanState::StringLiteral
            } else {
                self.pos += 1;
                continue;
            };
            self.state = next;
            return self.flush_code();
        }
        self.state = ScanState::Eof;
        self.flush_code()
    }

    /// Runs to the end of the line; the newline belongs to the comment.
    fn scan_line_comment(&mut self) -> Token<'a> {
        self.pos += LINE_COMMENT_START.len();
        while let Some(&b) = self.input.get(self.pos) {
            self.pos += 1;
            if b == b'\n' {
                break;
            }
        }
        self.state = ScanState::Code;
        self.emit(TokenKind::Comment)
    }

    fn scan_block_comment(&mut self) -> Result<Token<'a>, ScanError> {
        self.pos += BLOCK_COMMENT_START.len();
        loop {
            if self.rest().starts_with(BLOCK_COMMENT_END) {
                self.pos += BLOCK_COMMENT_END.len();
                break;
            }
            if self.pos >= self.input.len() {
                return Err(ScanError::UnterminatedBlockComment {
                    location: SourceLocation::at_offset(self.input, self.start),
                });
            }
            self.pos += 1;
        }
        self.state = ScanState::Code;
        Ok(self.emit(TokenKind::Comment))
    }

    /// An escape marker skips exactly one following byte, whatever it is.
    fn scan_string(&mut self) -> Result<Token<'a>, ScanError> {
        self.pos += 1;
        loop {
            let Some(&b) = self.input.get(self.pos) else {
                return Err(ScanError::UnterminatedString {
                    location: SourceLocation::at_offset(self.input, self.start),
                });
            };
            self.pos += 1;
            if b == STRING_QUOTE {
                break;
            }
            if b == STRING_ESCAPE {
                self.pos += 1;
            }
        }
        self.state = ScanState::Code;
        Ok(self.emit(TokenKind::String))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match self.state {
                ScanState::Code => Ok(self.scan_code()),
                ScanState::LineComment => Ok(Some(self.scan_line_comment())),
                ScanState::BlockComment => self.scan_block_comment().map(Some),
                ScanState::StringLiteral => self.scan_string().map(Some),
                ScanState::Eof => {
                    self.state = ScanState::Done;
                    let end = self.input.len();
                    Ok(Some(Token::new(TokenKind::Eof, &self.input[end..], end)))
                }
                ScanState::Done => return None,
            };

            match step {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => continue,
                Err(err) => {
                    self.state = ScanState::Done;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}
