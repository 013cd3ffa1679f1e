//! Error types for argument validation, configuration and per-file processing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the command-line input. Each one ends the run with exit code 1.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Please provide the path of the directory to process.")]
    MissingPath,

    #[error("Error accessing path {}: {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("The provided path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Rejected cleaning rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one file extension is required")]
    NoExtensions,

    #[error("invalid extension '{0}': expected a leading '.' followed by a suffix")]
    InvalidExtension(String),

    #[error("excluded directory names must not be empty")]
    EmptyExcludedDir,

    #[error("debug call name must not be empty")]
    EmptyDebugCall,
}

/// A failure confined to a single file. The walk carries on with the next one.
#[derive(Debug, Error)]
pub enum ScrubError {
    #[error("Error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScrubError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ScrubError::Read { path, .. } | ScrubError::Write { path, .. } => path,
        }
    }
}
