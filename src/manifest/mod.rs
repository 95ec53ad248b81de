//! package.json discovery, parsing and writing
//!
//! This module provides functionality to:
//! - Locate manifests under include roots, honoring exclusions
//! - Parse a manifest and edit one dependency entry
//! - Write manifests back atomically

mod detector;
mod package_json;
mod writer;

pub use detector::{find_manifests, search_roots, DEFAULT_IGNORED_DIRS, MANIFEST_FILENAME};
pub use package_json::{DependencyEntry, ManifestFile};
pub use writer::{read_manifest, write_manifest};

use crate::error::ManifestError;
use std::path::Path;

/// Read and parse the manifest at `path`
pub fn load_manifest(path: &Path) -> Result<ManifestFile, ManifestError> {
    let content = read_manifest(path)?;
    ManifestFile::parse(path, &content)
}

/// Serialize and write `manifest` back to its path
pub fn save_manifest(manifest: &ManifestFile) -> Result<(), ManifestError> {
    write_manifest(manifest.path(), &manifest.to_json_string()?)
}
