//! Project configuration file reader
//!
//! Reads optional defaults from `.bumpdep.toml` in the root directory:
//!
//! ```toml
//! package-manager = "yarn"
//! exclude = ["legacy", "examples"]
//! registry = "https://npm.example.com"
//! ```
//!
//! Values given on the command line always take priority.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Configuration file name
pub const CONFIG_FILENAME: &str = ".bumpdep.toml";

/// Defaults read from `.bumpdep.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Package manager name (`npm` or `yarn`)
    pub package_manager: Option<String>,
    /// Directories excluded from discovery
    pub exclude: Option<Vec<String>>,
    /// Registry base URL for HTTP version lookup
    pub registry: Option<String>,
}

impl ProjectConfig {
    /// Read the configuration from a directory
    ///
    /// A missing file yields the empty configuration; an unreadable or
    /// malformed one is an error.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::invalid_config_file(&path, e.to_string()))?;
        Self::parse(&content).map_err(|message| ConfigError::invalid_config_file(&path, message))
    }

    /// Parse configuration text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}
