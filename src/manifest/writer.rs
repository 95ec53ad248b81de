//! Manifest file reading and writing
//!
//! Writes go to a sibling temporary file which is then renamed over the
//! original, so a manifest is either fully old or fully new. A symlinked
//! manifest is written through to its target; the link itself is kept.

use crate::error::ManifestError;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a manifest file content
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))
}

/// Replace a manifest file's content atomically
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    let target = resolve_target(path)?;
    let tmp = temp_path(&target);

    if let Err(e) = fs::write(&tmp, content) {
        let _ = fs::remove_file(&tmp);
        return Err(ManifestError::write_error(path, e));
    }

    fs::rename(&tmp, &target).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        ManifestError::write_error(path, e)
    })
}

/// The file that actually holds the content of `path`
fn resolve_target(path: &Path) -> Result<PathBuf, ManifestError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).map_err(|e| ManifestError::write_error(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest".to_string());
    path.with_file_name(format!(".{}.bumpdep-tmp", name))
}
