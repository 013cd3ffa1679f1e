//! Conditional in-place rewrite of a single file.

use crate::cleaner::TextCleaner;
use crate::config::CleanConfig;
use crate::error::ScrubError;
use crate::report::{self, FileOutcome};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Rewrites allowed files through a [`TextCleaner`].
pub struct Processor<'a> {
    config: &'a CleanConfig,
    cleaner: TextCleaner,
}

impl<'a> Processor<'a> {
    pub fn new(config: &'a CleanConfig) -> Self {
        Processor {
            config,
            cleaner: TextCleaner::new(config.debug_call()),
        }
    }

    /// Clean one file and report the result on stderr.
    /// Failures are reported and returned as an outcome, never propagated.
    pub fn process(&self, path: &Path) -> FileOutcome {
        let outcome = self.rewrite(path);
        match &outcome {
            FileOutcome::Skipped => debug!("Skipping {}: extension not allowed", path.display()),
            FileOutcome::Cleaned { .. } => report::processed(path),
            FileOutcome::Failed(err) => report::file_error(err),
        }
        outcome
    }

    fn rewrite(&self, path: &Path) -> FileOutcome {
        if !self.config.is_target_file(path) {
            return FileOutcome::Skipped;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) => {
                return FileOutcome::Failed(ScrubError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let cleaned = self.cleaner.clean(&content);

        // Unchanged files are still written back
        if let Err(source) = fs::write(path, &cleaned) {
            return FileOutcome::Failed(ScrubError::Write {
                path: path.to_path_buf(),
                source,
            });
        }

        let bytes_removed = (content.len() - cleaned.len()) as u64;
        debug!("Cleaned {} ({} bytes removed)", path.display(), bytes_removed);
        FileOutcome::Cleaned { bytes_removed }
    }
}
