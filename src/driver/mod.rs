//! File driver
//!
//! Walks a source tree, feeds every C/C++ source and header to the
//! [`Rewriter`] and overwrites it in place with the result.
//!
//! # Failure model
//!
//! I/O and walk errors abort the run. Scan errors abort it too unless the
//! config asks for [`ScanErrorPolicy::Skip`]; a file that fails to scan is
//! never written. Files already rewritten earlier in the run are not rolled
//! back, and no backups are taken.

pub mod config;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub use config::{DriverConfig, ScanErrorPolicy, DEFAULT_EXTENSIONS};

use crate::errors::{DriverError, ScanError};
use crate::rewrite::Rewriter;

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Contents changed (and were written, unless dry-running).
    Rewritten,
    Unchanged,
}

/// Totals for a completed run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_rewritten: usize,
    /// Files left untouched under [`ScanErrorPolicy::Skip`].
    pub skipped: Vec<(PathBuf, ScanError)>,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Rewrites one file in place.
///
/// The file is only written when the rewrite succeeds and its contents
/// actually change.
pub fn process_file(
    path: &Path,
    rewriter: &Rewriter<'_>,
    dry_run: bool,
) -> Result<FileOutcome, DriverError> {
    let source = fs::read(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let rewrite = rewriter
        .rewrite(&source)
        .map_err(|source| DriverError::Scan {
            path: path.to_path_buf(),
            source,
        })?;

    if !rewrite.changed {
        debug!(path = %path.display(), "unchanged");
        return Ok(FileOutcome::Unchanged);
    }

    if dry_run {
        info!(path = %path.display(), "would rewrite");
    } else {
        fs::write(path, &rewrite.text).map_err(|source| DriverError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "rewrote");
    }
    Ok(FileOutcome::Rewritten)
}

/// Walks `config.root` and rewrites every matching file.
///
/// Entries are visited in file-name order. Skipped directories are pruned,
/// but the root itself is always visited. Symlinks are not followed.
pub fn run(config: &DriverConfig) -> Result<RunSummary, DriverError> {
    let rewriter = Rewriter::default();
    let mut summary = RunSummary::default();

    let walker = WalkDir::new(&config.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let prune = entry.depth() > 0
                && entry.file_type().is_dir()
                && config.is_skipped_dir(entry.path());
            if prune {
                debug!(path = %entry.path().display(), "skipping directory");
            }
            !prune
        });

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !config.is_source_file(path) {
            continue;
        }

        summary.files_scanned += 1;
        match process_file(path, &rewriter, config.dry_run) {
            Ok(FileOutcome::Rewritten) => summary.files_rewritten += 1,
            Ok(FileOutcome::Unchanged) => {}
            Err(DriverError::Scan { path, source })
                if config.on_scan_error == ScanErrorPolicy::Skip =>
            {
                warn!(path = %path.display(), error = %source, "left untouched");
                summary.skipped.push((path, source));
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        scanned = summary.files_scanned,
        rewritten = summary.files_rewritten,
        skipped = summary.skipped.len(),
        dry_run = config.dry_run,
        "run complete"
    );
    Ok(summary)
}
