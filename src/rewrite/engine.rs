//! Rewriter: drives the scanner and routes each token to its rule table.

use tracing::{debug, trace};

use super::rules::{RuleSet, CODE_RULES, STRING_RULES};
use crate::errors::ScanError;
use crate::scanner::{Scanner, TokenKind};

/// Result of rewriting one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: Vec<u8>,
    /// Whether `text` differs from the input.
    pub changed: bool,
}

/// Applies the code and string rule tables to a scanned source text.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'r> {
    code_rules: &'r RuleSet,
    string_rules: &'r RuleSet,
}

impl<'r> Rewriter<'r> {
    pub fn new(code_rules: &'r RuleSet, string_rules: &'r RuleSet) -> Self {
        Self {
            code_rules,
            string_rules,
        }
    }

    /// Rewrites the full text of one file.
    ///
    /// Comments pass through untouched. Any scan error aborts the whole
    /// rewrite, so no partial output is ever returned.
    pub fn rewrite(&self, source: &[u8]) -> Result<Rewrite, ScanError> {
        let mut text = Vec::with_capacity(source.len());
        let mut tokens = 0usize;

        for token in Scanner::new(source) {
            let token = token?;
            trace!(offset = token.offset, "{}", token);
            let rewritten = match token.kind {
                TokenKind::Code => self.code_rules.apply(token.text),
                TokenKind::String => self.string_rules.apply(token.text),
                TokenKind::Comment | TokenKind::Eof => token.text.into(),
            };
            text.extend_from_slice(&rewritten);
            tokens += 1;
        }

        let changed = text != source;
        debug!(tokens, bytes_in = source.len(), bytes_out = text.len(), changed, "rewrote source");
        Ok(Rewrite { text, changed })
    }
}

impl Default for Rewriter<'static> {
    fn default() -> Self {
        Self::new(&CODE_RULES, &STRING_RULES)
    }
}

/// Rewrites `source` with the built-in rule tables.
pub fn rewrite(source: &[u8]) -> Result<Vec<u8>, ScanError> {
    Rewriter::default().rewrite(source).map(|r| r.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::SourceLocation;
    use pretty_assertions::assert_eq;

    fn rewrite_str(input: &str) -> String {
        String::from_utf8(rewrite(input.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_declaration_and_format_in_sync() {
        let input = "long z = 5;\nprintf(\"%ld\\n\", z);\n";
        let expected = "int z = 5;\nprintf(\"%d\\n\", z);\n";
        assert_eq!(rewrite_str(input), expected);
    }

    #[test]
    fn test_comments_are_opaque() {
        let input = "/* long x; */ long y; // (long) z\n";
        assert_eq!(rewrite_str(input), "/* long x; */ int y; // (long) z\n");
    }

    #[test]
    fn test_strings_only_lose_length_modifiers() {
        let input = "puts(\" long \"); long n;";
        assert_eq!(rewrite_str(input), "puts(\" long \"); int n;");
    }

    #[test]
    fn test_comment_text_keeps_format_specifiers() {
        let input = "// prints %ld\n";
        assert_eq!(rewrite_str(input), input);
    }

    #[test]
    fn test_changed_flag() {
        let rewriter = Rewriter::default();
        assert!(rewriter.rewrite(b"long x;").unwrap().changed);
        assert!(!rewriter.rewrite(b"int x;").unwrap().changed);
        // matched by the string rule but rewritten to the same bytes
        assert!(!rewriter.rewrite(b"printf(\"%d\", x);").unwrap().changed);
    }

    #[test]
    fn test_scan_error_yields_no_output() {
        let err = rewrite(b"long x;\n\"unterminated").unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedString {
                location: SourceLocation::new(2, 1)
            }
        );

        assert!(matches!(
            rewrite(b"long x; /* open"),
            Err(ScanError::UnterminatedBlockComment { .. })
        ));
    }

    #[test]
    fn test_custom_tables() {
        let empty = RuleSet::compile(&[]).unwrap();
        let rewriter = Rewriter::new(&empty, &empty);
        let out = rewriter.rewrite(b"long x; \"%ld\"").unwrap();
        assert_eq!(out.text, b"long x; \"%ld\"".to_vec());
        assert!(!out.changed);
    }
}
