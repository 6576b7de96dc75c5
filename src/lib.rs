//! # Introduction
//!
//! unlongify mechanically rewrites C and C++ sources so that width-dependent
//! `long` declarations become `int`, together with the `l` length modifier of
//! matching `printf`/`scanf` conversions. It is aimed at taking 32-bit x86
//! code, where `int` and `long` are both 32 bits, to code that behaves the
//! same on x86_64.
//!
//! The tool does not understand C. It is a blunt, heuristic text rewriter and
//! its output should be reviewed.
//!
//! ## Pipeline
//!
//! ```text
//! Source bytes → Scanner → Tokens → Rewriter (rule tables) → Rewritten bytes
//! ```
//!
//! 1. [`scanner`] — splits the text losslessly into code, comment and string
//!    tokens.
//! 2. [`rewrite`] — applies the ordered code rules to code tokens and the
//!    format-specifier rule to string tokens; comments pass through.
//! 3. [`driver`] — walks a directory tree and rewrites `.c`, `.h`, `.cpp` and
//!    `.hpp` files in place.
//!
//! ## Example
//!
//! ```
//! let out = unlongify::rewrite(b"long a; long long b; // long\n").unwrap();
//! assert_eq!(out, b"int a; long long b; // long\n");
//! ```

pub mod driver;
pub mod errors;
pub mod rewrite;
pub mod scanner;

pub use errors::{DriverError, ScanError};
pub use rewrite::rewrite;
