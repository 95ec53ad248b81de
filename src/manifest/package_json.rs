//! package.json document model
//!
//! Handles:
//! - parsing into an order-preserving JSON object
//! - locating a package in `dependencies` / `devDependencies`
//! - replacing a single version entry
//! - stable serialization (2-space indent, trailing newline)

use crate::domain::DependencyKind;
use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A parsed package.json, owned for the duration of one update
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestFile {
    path: PathBuf,
    content: Map<String, Value>,
}

/// Where a package is listed and with which range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    /// Map that holds the package
    pub kind: DependencyKind,
    /// Range string as written, e.g. `~1.2.0`
    pub range: String,
}

impl ManifestFile {
    /// Parse manifest text read from `path`
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ManifestError> {
        let path = path.into();
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(&path, e.to_string()))?;

        match json {
            Value::Object(content) => Ok(Self { path, content }),
            _ => Err(ManifestError::invalid_structure(
                &path,
                "top-level value is not an object",
            )),
        }
    }

    /// Absolute path of the manifest
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// The parsed JSON object
    pub fn content(&self) -> &Map<String, Value> {
        &self.content
    }

    fn section(&self, kind: DependencyKind) -> Option<&Map<String, Value>> {
        self.content.get(kind.section()).and_then(Value::as_object)
    }

    /// Find `package`, checking `dependencies` before `devDependencies`
    ///
    /// A section that is missing or not an object counts as empty. A listed
    /// package whose version is not a string makes the manifest invalid.
    pub fn find_dependency(&self, package: &str) -> Result<Option<DependencyEntry>, ManifestError> {
        for kind in DependencyKind::precedence() {
            let Some(value) = self.section(*kind).and_then(|deps| deps.get(package)) else {
                continue;
            };

            return match value.as_str() {
                Some(range) => Ok(Some(DependencyEntry {
                    kind: *kind,
                    range: range.to_string(),
                })),
                None => Err(ManifestError::invalid_structure(
                    &self.path,
                    format!("version of '{}' in {} is not a string", package, kind),
                )),
            };
        }
        Ok(None)
    }

    /// Replace the range of an existing entry, keeping its position
    ///
    /// Returns false if the package is not listed in that section.
    pub fn set_dependency(&mut self, kind: DependencyKind, package: &str, range: &str) -> bool {
        match self
            .content
            .get_mut(kind.section())
            .and_then(Value::as_object_mut)
            .and_then(|deps| deps.get_mut(package))
        {
            Some(slot) => {
                *slot = Value::String(range.to_string());
                true
            }
            None => false,
        }
    }

    /// Serialize with 2-space indentation and one trailing newline
    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        let mut text = serde_json::to_string_pretty(&self.content)
            .map_err(|e| ManifestError::invalid_structure(&self.path, e.to_string()))?;
        text.push('\n');
        Ok(text)
    }
}
