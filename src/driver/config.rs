// Run configuration for the file driver

use std::path::{Path, PathBuf};

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::errors::DriverError;

/// Extensions (without the dot) of files handed to the rewriter.
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "h", "cpp", "hpp"];

/// What to do when a file cannot be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanErrorPolicy {
    /// Stop the walk at the first unscannable file.
    #[default]
    Abort,
    /// Leave the file untouched, record it, and carry on.
    Skip,
}

/// Settings for one run over a source tree
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub root: PathBuf,
    pub extensions: FxHashSet<String>,
    /// Directories whose path matches any of these are not descended into.
    pub skip_dirs: Vec<Regex>,
    pub on_scan_error: ScanErrorPolicy,
    /// Report what would change without writing anything.
    pub dry_run: bool,
}

impl DriverConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DriverConfig {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            skip_dirs: Vec::new(),
            on_scan_error: ScanErrorPolicy::default(),
            dry_run: false,
        }
    }

    pub fn with_skip_dirs<I, S>(mut self, patterns: I) -> Result<Self, DriverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.skip_dirs.push(Regex::new(pattern.as_ref())?);
        }
        Ok(self)
    }

    pub fn with_policy(mut self, policy: ScanErrorPolicy) -> Self {
        self.on_scan_error = policy;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether `path` has one of the configured extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(ext))
    }

    /// Whether a directory at `path` should be pruned from the walk.
    pub fn is_skipped_dir(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.skip_dirs.iter().any(|re| re.is_match(&path))
    }
}
