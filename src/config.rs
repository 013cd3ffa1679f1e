//! Cleaning rules: which files are rewritten, which directories are skipped,
//! and which debug call is stripped.

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// Embed the defaults directly in the binary at compile time
const DEFAULTS_TOML: &str = include_str!("../defaults.toml");

/// Explicit rule set handed to the walker and the processor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CleanConfig {
    /// Allowed file suffixes, leading dot included (e.g. ".js")
    extensions: Vec<String>,
    /// Directory names never descended into, matched exactly at any depth
    excluded_dirs: Vec<String>,
    /// Name of the debug call to strip, without the opening parenthesis
    debug_call: String,
}

impl CleanConfig {
    /// Build a validated rule set from explicit values.
    pub fn new<E, D>(extensions: E, excluded_dirs: D, debug_call: &str) -> Result<Self, ConfigError>
    where
        E: IntoIterator,
        E::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let config = CleanConfig {
            extensions: extensions.into_iter().map(Into::into).collect(),
            excluded_dirs: excluded_dirs.into_iter().map(Into::into).collect(),
            debug_call: debug_call.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the built-in rules from the embedded defaults.toml
    pub fn builtin() -> Result<Self> {
        let config: CleanConfig =
            toml::from_str(DEFAULTS_TOML).context("Failed to parse embedded defaults.toml")?;
        config
            .validate()
            .context("Embedded defaults.toml contains invalid rules")?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        for ext in &self.extensions {
            match ext.strip_prefix('.') {
                Some(suffix) if !suffix.is_empty() && !suffix.contains('.') => {}
                _ => return Err(ConfigError::InvalidExtension(ext.clone())),
            }
        }
        if self.excluded_dirs.iter().any(|d| d.is_empty()) {
            return Err(ConfigError::EmptyExcludedDir);
        }
        if self.debug_call.is_empty() {
            return Err(ConfigError::EmptyDebugCall);
        }
        Ok(())
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn excluded_dirs(&self) -> &[String] {
        &self.excluded_dirs
    }

    pub fn debug_call(&self) -> &str {
        &self.debug_call
    }

    /// Check whether a file's extension is on the allow-list.
    /// Matching is exact and case-sensitive; a name like ".js" has no extension.
    pub fn is_target_file(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };

        self.extensions
            .iter()
            .any(|allowed| allowed.strip_prefix('.') == Some(ext))
    }

    /// Check whether a directory name is excluded from traversal
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|excluded| excluded == name)
    }
}
