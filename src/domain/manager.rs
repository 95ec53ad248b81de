//! Package manager selection

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported Node.js package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// npm (default)
    #[default]
    Npm,
    /// Yarn classic
    Yarn,
}

impl PackageManager {
    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Arguments that install a project's dependencies
    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    /// Arguments that run a project's tests, tolerating an empty test suite
    pub fn test_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Npm => &["test", "--", "--passWithNoTests"],
            PackageManager::Yarn => &["test", "--passWithNoTests"],
        }
    }

    /// Arguments that print the latest published version of `package`
    pub fn view_version_args<'a>(&self, package: &'a str) -> Vec<&'a str> {
        match self {
            PackageManager::Npm => vec!["view", package, "version"],
            PackageManager::Yarn => vec!["info", package, "version", "--silent"],
        }
    }
}

impl FromStr for PackageManager {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            _ => Err(ConfigError::invalid_package_manager(s)),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}
