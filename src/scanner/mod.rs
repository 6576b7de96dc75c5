//! Lexical scanner
//!
//! This module classifies every byte of a C source file:
//! - [`lexer`]: the state machine ([`Scanner`]) producing a lazy token stream
//! - [`token`]: [`Token`], [`TokenKind`] and [`SourceLocation`]
//!
//! # Guarantees
//!
//! Concatenating the text of every emitted token reproduces the input exactly:
//! no gaps, no overlaps. Only comments and string literals are recognised; the
//! scanner does no preprocessing and knows nothing about C grammar.

pub mod lexer;
pub mod token;

pub use lexer::Scanner;
pub use token::{SourceLocation, Token, TokenKind};
