//! package.json discovery
//!
//! Features:
//! - Recursive search under one or more include roots
//! - Prunes dependency caches and test directories at any depth
//! - Prunes caller-supplied exclude directories
//! - Symlinked package.json files are found; symlinked directories are not entered
//! - Deduplicated, lexicographically ordered results

use crate::error::ManifestError;
use crate::paths::{is_within, resolve_dirs};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File name searched for
pub const MANIFEST_FILENAME: &str = "package.json";

/// Directory names never descended into
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "bower_components",
    "test",
    "tests",
    "__tests__",
];

/// Search roots for a run: `root` itself, or each include dir resolved against it
pub fn search_roots<S: AsRef<str>>(root: &Path, include_dirs: &[S]) -> Vec<PathBuf> {
    if include_dirs.is_empty() {
        vec![crate::paths::normalize(root)]
    } else {
        resolve_dirs(root, include_dirs)
    }
}

/// Find every package.json below the include roots
///
/// Relative include/exclude entries are resolved against `root`. Missing
/// include roots are skipped with a warning. An empty result is returned as
/// such; deciding whether that is an error is up to the caller.
pub fn find_manifests<S: AsRef<str>>(
    root: &Path,
    include_dirs: &[S],
    exclude_dirs: &[S],
) -> Result<Vec<PathBuf>, ManifestError> {
    let roots = search_roots(root, include_dirs);
    let excludes = resolve_dirs(root, exclude_dirs);
    let mut found = BTreeSet::new();

    for search_root in &roots {
        if !search_root.is_dir() {
            warn!("Skipping missing directory: {}", search_root.display());
            continue;
        }
        debug!("Searching {}", search_root.display());

        let walker = WalkDir::new(search_root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_pruned(entry, &excludes));

        for entry in walker {
            let entry = entry.map_err(|e| ManifestError::WalkError {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| search_root.clone()),
                message: e.to_string(),
            })?;

            if entry.file_name() == MANIFEST_FILENAME && is_manifest_file(&entry) {
                found.insert(entry.into_path());
            }
        }
    }

    debug!("Found manifests: {:?}", found);
    Ok(found.into_iter().collect())
}

/// Regular files, and symlinks that resolve to one
fn is_manifest_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink() && entry.path().is_file()
}

/// Whether the walk should skip this entry (and everything below it)
fn is_pruned(entry: &DirEntry, excludes: &[PathBuf]) -> bool {
    if excludes.iter().any(|dir| is_within(entry.path(), dir)) {
        return true;
    }

    // An explicitly requested root is searched even if its name is ignored
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| DEFAULT_IGNORED_DIRS.contains(&name))
            .unwrap_or(false)
}
