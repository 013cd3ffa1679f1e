//! sourcescrub - in-place cleanup for web source files
//!
//! Walks a directory tree and rewrites every `.js`, `.ts`, `.html` and `.css`
//! file: runs of blank lines are collapsed and single-line `console.log(...)`
//! calls are removed. `node_modules` and `public` directories are never entered.
//!
//! ## Pipeline
//!
//! - [`walker`] streams file paths from a traversal thread to rayon workers
//! - [`processor`] filters by extension and rewrites one file
//! - [`cleaner`] holds the pure text transforms
//! - [`config`] carries the rules, loaded from the embedded `defaults.toml`

pub mod cleaner;
pub mod config;
pub mod error;
pub mod logging;
pub mod processor;
pub mod report;
pub mod walker;

// Re-export commonly used items
pub use cleaner::{collapse_blank_lines, strip_debug_calls, TextCleaner};
pub use config::CleanConfig;
pub use error::{ConfigError, ScrubError, UsageError};
pub use processor::Processor;
pub use report::{FileOutcome, RunSummary};
pub use walker::{run, validate_root};

/// Process exit statuses
pub mod exit_codes {
    /// Walk completed, regardless of per-file failures
    pub const OK: u8 = 0;
    /// Bad or missing directory argument, or unusable built-in rules
    pub const USAGE: u8 = 1;
    /// The walk itself could not complete (walker thread failure)
    pub const FAILURE: u8 = 1;
}
