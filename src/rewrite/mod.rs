//! Rule-based rewriting of scanned source
//!
//! - [`rules`]: the ordered code and string rule tables
//! - [`engine`]: [`Rewriter`], which applies them token by token
//!
//! # Code rules
//!
//! In order: move `unsigned` in front of `long`/`int` runs, collapse
//! `long int` to `int`, shield `unsigned long long` and `long long` behind
//! sentinels, narrow every remaining bare `long` to `int`, then restore the
//! shielded forms. A keyword only matches when preceded by start of text,
//! whitespace, `(` or `,` and followed by whitespace, `)` or `*`; anything
//! glued to other punctuation is left alone.
//!
//! # String rules
//!
//! The `l` length modifier is removed from `%d`, `%i`, `%o`, `%u`, `%x` and
//! `%X` conversions, keeping flags, width, precision and `$` positions.

pub mod engine;
pub mod rules;

pub use engine::{rewrite, Rewrite, Rewriter};
pub use rules::{Rule, RuleSet, CODE_RULES, STRING_RULES};
