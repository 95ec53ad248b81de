//! Path helpers for include/exclude directory lists
//!
//! All resolution is lexical and relative to an explicit root so the core
//! never consults the process working directory.

use std::path::{Component, Path, PathBuf};

/// Split a comma-separated directory list into its entries
///
/// Entries are trimmed; empty entries and repeats are dropped while the
/// first-seen order is kept.
pub fn parse_dir_list(value: &str) -> Vec<String> {
    let mut dirs: Vec<String> = Vec::new();
    for entry in value.split(',').map(str::trim) {
        if !entry.is_empty() && !dirs.iter().any(|d| d == entry) {
            dirs.push(entry.to_string());
        }
    }
    dirs
}

/// Resolve a list of (usually relative) directories against `root`
pub fn resolve_dirs<S: AsRef<str>>(root: &Path, dirs: &[S]) -> Vec<PathBuf> {
    let mut resolved: Vec<PathBuf> = Vec::new();
    for dir in dirs {
        let path = resolve_dir(root, dir.as_ref());
        if !resolved.contains(&path) {
            resolved.push(path);
        }
    }
    resolved
}

/// Resolve a single directory against `root`
pub fn resolve_dir(root: &Path, dir: &str) -> PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&root.join(path))
    }
}

/// Remove `.` and `..` components without touching the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// True if `path` is `dir` itself or lies somewhere below it
pub fn is_within(path: &Path, dir: &Path) -> bool {
    path.starts_with(dir)
}
