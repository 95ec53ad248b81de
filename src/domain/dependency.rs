//! Dependency sections of a package.json

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which dependency map holds the target package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// `dependencies`
    Runtime,
    /// `devDependencies`
    Dev,
}

impl DependencyKind {
    /// The package.json key for this map
    pub fn section(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Dev => "devDependencies",
        }
    }

    /// Lookup order; runtime wins when a package is listed in both maps
    pub fn precedence() -> &'static [DependencyKind] {
        &[DependencyKind::Runtime, DependencyKind::Dev]
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}
