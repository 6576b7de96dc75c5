//! Error types
//!
//! [`ScanError`] is the only failure the core can produce: the input has a
//! structural defect that prevents safe tokenization. [`DriverError`] wraps it
//! together with the filesystem failures of a tree walk. Neither is recovered
//! at an intermediate layer; both propagate to the top-level driver.

use std::io;
use std::path::PathBuf;

use crate::scanner::token::SourceLocation;

/// Fatal scanner errors. The file they occur in must not be rewritten.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// A `/*` with no matching `*/` before end of input.
    #[error("unterminated block comment starting at {location}")]
    UnterminatedBlockComment { location: SourceLocation },

    /// A `"` with no closing quote before end of input.
    #[error("unterminated string literal starting at {location}")]
    UnterminatedString { location: SourceLocation },
}

impl ScanError {
    /// Where the unterminated construct began.
    pub fn location(&self) -> SourceLocation {
        match self {
            ScanError::UnterminatedBlockComment { location }
            | ScanError::UnterminatedString { location } => *location,
        }
    }
}

/// Errors raised while walking and rewriting a source tree
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error walking the path: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("error processing file {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: ScanError,
    },

    #[error("invalid skip-directory pattern: {0}")]
    SkipPattern(#[from] regex::Error),
}

impl DriverError {
    /// The file the error is attributed to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            DriverError::Read { path, .. }
            | DriverError::Write { path, .. }
            | DriverError::Scan { path, .. } => Some(path),
            DriverError::Walk(err) => err.path(),
            DriverError::SkipPattern(_) => None,
        }
    }
}
