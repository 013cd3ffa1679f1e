//! User-visible output and the end-of-run summary.
//!
//! Every line goes to stderr; nothing is written to stdout.

use crate::error::ScrubError;
use colored::Colorize;
use humansize::{format_size, BINARY};
use std::error::Error as _;
use std::fmt::Display;
use std::path::Path;
use tracing::{info, warn};

/// What happened to a single file
#[derive(Debug)]
pub enum FileOutcome {
    /// Extension not on the allow-list; the file was never read
    Skipped,
    /// Content was rewritten in place
    Cleaned { bytes_removed: u64 },
    /// Reading or writing failed; the file was abandoned
    Failed(ScrubError),
}

/// Totals for one run. Only ever logged; it never affects the exit code.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub cleaned: usize,
    pub skipped: usize,
    pub failed: usize,
    pub walk_errors: usize,
    pub bytes_removed: u64,
}

impl RunSummary {
    pub fn record(mut self, outcome: &FileOutcome) -> Self {
        match outcome {
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Cleaned { bytes_removed } => {
                self.cleaned += 1;
                self.bytes_removed += bytes_removed;
            }
            FileOutcome::Failed(_) => self.failed += 1,
        }
        self
    }

    pub fn merge(mut self, other: RunSummary) -> Self {
        self.cleaned += other.cleaned;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.walk_errors += other.walk_errors;
        self.bytes_removed += other.bytes_removed;
        self
    }

    pub fn log(&self) {
        if self.failed > 0 || self.walk_errors > 0 {
            warn!(
                failed = self.failed,
                walk_errors = self.walk_errors,
                "Some files or directories could not be cleaned"
            );
        }
        info!(
            cleaned = self.cleaned,
            skipped = self.skipped,
            failed = self.failed,
            walk_errors = self.walk_errors,
            "Run complete: {} removed",
            format_size(self.bytes_removed, BINARY)
        );
    }
}

/// Confirmation line for a file that was rewritten
pub fn processed(path: &Path) {
    eprintln!("{} {}", "Processed:".green(), path.display());
}

/// Error line for a file that was abandoned
pub fn file_error(err: &ScrubError) {
    eprintln!("{}", err.to_string().red());
}

/// Error line for a directory that could not be listed
pub fn walk_error(err: &ignore::Error) {
    eprintln!("{}", describe_walk_error(err).red());
}

/// Render a traversal error with its path printed once
fn describe_walk_error(err: &ignore::Error) -> String {
    match err {
        ignore::Error::WithDepth { err, .. } => describe_walk_error(err),
        ignore::Error::WithPath { path, err } => {
            format!("Error reading directory {}: {}", path.display(), cause(err))
        }
        other => format!("Error reading directory: {}", other),
    }
}

/// Innermost message, without any path the traversal layer already prepended
fn cause(err: &ignore::Error) -> String {
    match err {
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithPath { err, .. } => cause(err),
        // Directory walk errors wrap an error whose own source is the bare OS error
        ignore::Error::Io(io_err) => match io_err.get_ref().and_then(|inner| inner.source()) {
            Some(source) => source.to_string(),
            None => io_err.to_string(),
        },
        other => other.to_string(),
    }
}

/// Error line for a fatal problem before the walk starts
pub fn fatal(err: impl Display) {
    eprintln!("{}", err.to_string().red().bold());
}
