//! Directory traversal and the parallel processing pipeline.

use crate::config::CleanConfig;
use crate::error::UsageError;
use crate::processor::Processor;
use crate::report::{self, RunSummary};

use anyhow::Result;
use crossbeam_channel::{bounded, Sender};
use ignore::{DirEntry, WalkBuilder};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::debug;

/// Capacity of the channel between the walker thread and the workers
const PATH_QUEUE_CAPACITY: usize = 256;

/// Check that the command-line argument names an existing directory
pub fn validate_root(arg: Option<&Path>) -> Result<PathBuf, UsageError> {
    let path = arg.ok_or(UsageError::MissingPath)?;

    let metadata = fs::metadata(path).map_err(|source| UsageError::Inaccessible {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(UsageError::NotADirectory(path.to_path_buf()));
    }

    Ok(path.to_path_buf())
}

/// Decide whether the walker may descend into or yield an entry.
/// The root is always kept, even if its own name is excluded.
fn keep_entry(entry: &DirEntry, config: &CleanConfig) -> bool {
    if entry.depth() == 0 {
        return true;
    }

    if entry.file_type().is_some_and(|ft| ft.is_dir()) {
        if let Some(name) = entry.file_name().to_str() {
            if config.is_excluded_dir(name) {
                debug!("Skipping excluded directory: {}", entry.path().display());
                return false;
            }
        }
    }

    true
}

/// Walk `root` depth-first and send every regular file to `sender`.
/// Returns the number of entries that could not be read.
fn walk_files(root: &Path, config: &CleanConfig, sender: Sender<PathBuf>) -> usize {
    let filter_config = config.clone();
    let mut walk_errors = 0;

    let walker = WalkBuilder::new(root)
        .hidden(false)
        // Process every file on disk; ignore files play no part in selection
        .git_ignore(false)
        .ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(false)
        .filter_entry(move |entry| keep_entry(entry, &filter_config))
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                // The unreadable subtree is dropped; siblings continue
                report::walk_error(&err);
                walk_errors += 1;
                continue;
            }
        };

        // Symlinks and special files are neither followed nor processed
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if sender.send(entry.into_path()).is_err() {
            // Receiver dropped, stop walking
            break;
        }
    }

    walk_errors
}

/// Clean every allowed file under `root`.
///
/// A dedicated thread walks the tree and streams file paths through a bounded
/// channel while rayon workers rewrite them. The call returns only after the
/// walk has finished and every file has been handled.
pub fn run(root: &Path, config: &CleanConfig) -> Result<RunSummary> {
    debug!("Cleaning directory {}", root.display());

    let (sender, receiver) = bounded::<PathBuf>(PATH_QUEUE_CAPACITY);

    let root_clone = root.to_path_buf();
    let config_clone = config.clone();
    let producer_handle = thread::spawn(move || walk_files(&root_clone, &config_clone, sender));

    let processor = Processor::new(config);
    let summary = receiver
        .into_iter()
        .par_bridge()
        .map(|path| processor.process(&path))
        .fold(RunSummary::default, |summary, outcome| summary.record(&outcome))
        .reduce(RunSummary::default, RunSummary::merge);

    let walk_errors = producer_handle
        .join()
        .map_err(|_| anyhow::anyhow!("Walker thread panicked"))?;

    Ok(RunSummary {
        walk_errors,
        ..summary
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn collect_files(root: &Path, config: &CleanConfig) -> Vec<PathBuf> {
        let (sender, receiver) = bounded(PATH_QUEUE_CAPACITY);
        let errors = walk_files(root, config, sender);
        assert_eq!(errors, 0);
        let mut files: Vec<PathBuf> = receiver.into_iter().collect();
        files.sort();
        files
    }

    // ============ validate_root tests ============

    #[test]
    fn test_validate_root_missing_argument() {
        assert!(matches!(validate_root(None), Err(UsageError::MissingPath)));
    }

    #[test]
    fn test_validate_root_nonexistent_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = validate_root(Some(&missing)).unwrap_err();
        assert!(matches!(err, UsageError::Inaccessible { .. }));
        assert!(err.to_string().contains("Error accessing path"));
    }

    #[test]
    fn test_validate_root_regular_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("app.js");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            validate_root(Some(&file)),
            Err(UsageError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_validate_root_directory() {
        let dir = tempdir().unwrap();
        assert_eq!(validate_root(Some(dir.path())).unwrap(), dir.path());
    }

    // ============ walk_files tests ============

    #[test]
    fn test_walk_yields_files_only() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();
        fs::write(dir.path().join("src/b.txt"), "").unwrap();
        fs::write(dir.path().join("src/nested/c.css"), "").unwrap();

        let config = CleanConfig::builtin().unwrap();
        let files = collect_files(dir.path(), &config);

        assert_eq!(
            files,
            vec![
                dir.path().join("a.js"),
                dir.path().join("src/b.txt"),
                dir.path().join("src/nested/c.css"),
            ]
        );
    }

    #[test]
    fn test_walk_skips_excluded_dirs_at_any_depth() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::create_dir_all(dir.path().join("app/deep/public")).unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), "").unwrap();
        fs::write(dir.path().join("app/deep/public/site.js"), "").unwrap();
        fs::write(dir.path().join("app/deep/main.js"), "").unwrap();

        let config = CleanConfig::builtin().unwrap();
        let files = collect_files(dir.path(), &config);

        assert_eq!(files, vec![dir.path().join("app/deep/main.js")]);
    }

    #[test]
    fn test_walk_does_not_exclude_files_named_like_dirs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("public"), "").unwrap();

        let config = CleanConfig::builtin().unwrap();
        let files = collect_files(dir.path(), &config);

        assert_eq!(files, vec![dir.path().join("public")]);
    }

    #[test]
    fn test_walk_root_named_like_excluded_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("public");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.js"), "").unwrap();

        let config = CleanConfig::builtin().unwrap();
        let files = collect_files(&root, &config);

        assert_eq!(files, vec![root.join("a.js")]);
    }

    #[test]
    fn test_walk_visits_hidden_and_ignored_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".hidden")).unwrap();
        fs::write(dir.path().join(".hidden/x.js"), "").unwrap();
        fs::write(dir.path().join(".gitignore"), "*.js\n").unwrap();
        fs::write(dir.path().join("y.js"), "").unwrap();

        let config = CleanConfig::builtin().unwrap();
        let files = collect_files(dir.path(), &config);

        assert!(files.contains(&dir.path().join(".hidden/x.js")));
        assert!(files.contains(&dir.path().join("y.js")));
    }

    #[test]
    fn test_walk_with_injected_exclusions() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("vendor")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("vendor/lib.js"), "").unwrap();
        fs::write(dir.path().join("node_modules/dep.js"), "").unwrap();

        let config = CleanConfig::new([".js"], ["vendor"], "console.log").unwrap();
        let files = collect_files(dir.path(), &config);

        assert_eq!(files, vec![dir.path().join("node_modules/dep.js")]);
    }

    // ============ run tests ============

    #[test]
    fn test_run_cleans_tree_and_summarizes() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("src/app.js"), "a\n\n\nb\nconsole.log('x');\nc\n").unwrap();
        fs::write(dir.path().join("src/style.css"), "p {}\n\n\n").unwrap();
        fs::write(dir.path().join("package.json"), "{\n\n}\n").unwrap();
        fs::write(dir.path().join("node_modules/dep.js"), "x\n\n\ny\n").unwrap();

        let config = CleanConfig::builtin().unwrap();
        let summary = run(dir.path(), &config).unwrap();

        assert_eq!(summary.cleaned, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.walk_errors, 0);
        assert_eq!(summary.bytes_removed, 19 + 2);

        assert_eq!(
            fs::read_to_string(dir.path().join("src/app.js")).unwrap(),
            "a\nb\n\nc\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("src/style.css")).unwrap(),
            "p {}\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("package.json")).unwrap(),
            "{\n\n}\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("node_modules/dep.js")).unwrap(),
            "x\n\n\ny\n"
        );
    }

    #[test]
    fn test_run_empty_directory() {
        let dir = tempdir().unwrap();
        let config = CleanConfig::builtin().unwrap();
        assert_eq!(run(dir.path(), &config).unwrap(), RunSummary::default());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_unreadable_directory_drops_only_that_subtree() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::create_dir_all(dir.path().join("ok")).unwrap();
        fs::write(locked.join("hidden.js"), "x\n\n\ny\n").unwrap();
        fs::write(dir.path().join("ok/x.js"), "a\n\n\nb\n").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can list the directory anyway
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let config = CleanConfig::builtin().unwrap();
        let summary = run(dir.path(), &config);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let summary = summary.unwrap();

        assert_eq!(summary.walk_errors, 1);
        assert_eq!(summary.cleaned, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(
            fs::read_to_string(dir.path().join("ok/x.js")).unwrap(),
            "a\nb\n"
        );
        assert_eq!(
            fs::read_to_string(locked.join("hidden.js")).unwrap(),
            "x\n\n\ny\n"
        );
    }
}
