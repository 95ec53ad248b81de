//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: invalid request or configuration file
//! - RegistryError: latest-version lookup failures
//! - ManifestError: discovery, parsing and writing of package.json files
//! - CommandError: install/test invocations that failed

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Package manager is neither npm nor yarn
    #[error("invalid package manager '{value}': expected 'npm' or 'yarn'")]
    InvalidPackageManager { value: String },

    /// Package name missing
    #[error("package name must not be empty")]
    EmptyPackageName,

    /// .bumpdep.toml could not be read or parsed
    #[error("invalid configuration file {path}: {message}")]
    InvalidConfigFile { path: PathBuf, message: String },
}

/// Errors related to querying the package registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// The query command could not be run or exited unsuccessfully
    #[error("failed to query latest version of '{package}' via {command}: {message}")]
    QueryFailed {
        package: String,
        command: String,
        message: String,
    },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No package.json found under any search root
    #[error("no package.json found under {}", display_roots(.roots))]
    NotFound { roots: Vec<PathBuf> },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid JSON
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Manifest is valid JSON but not shaped like a package.json
    #[error("invalid manifest {path}: {message}")]
    InvalidStructure { path: PathBuf, message: String },

    /// Directory traversal failed
    #[error("failed to scan {path}: {message}")]
    WalkError { path: PathBuf, message: String },
}

/// Errors raised by install/test invocations
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started
    #[error("failed to run '{command}' in {dir}: {source}")]
    Spawn {
        command: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("'{command}' failed in {dir} ({status})")]
    Failed {
        command: String,
        dir: PathBuf,
        status: String,
        stderr: String,
    },
}

fn display_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConfigError {
    /// Creates a new InvalidPackageManager error
    pub fn invalid_package_manager(value: impl Into<String>) -> Self {
        ConfigError::InvalidPackageManager {
            value: value.into(),
        }
    }

    /// Creates a new InvalidConfigFile error
    pub fn invalid_config_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::InvalidConfigFile {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new QueryFailed error
    pub fn query_failed(
        package: impl Into<String>,
        command: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::QueryFailed {
            package: package.into(),
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(roots: Vec<PathBuf>) -> Self {
        ManifestError::NotFound { roots }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidStructure error
    pub fn invalid_structure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::InvalidStructure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for errors that mean the file is not a usable package.json
    pub fn is_invalid_manifest(&self) -> bool {
        matches!(
            self,
            ManifestError::JsonParseError { .. } | ManifestError::InvalidStructure { .. }
        )
    }
}

impl CommandError {
    /// Captured stderr of a failed command, empty for spawn failures
    pub fn stderr(&self) -> &str {
        match self {
            CommandError::Spawn { .. } => "",
            CommandError::Failed { stderr, .. } => stderr,
        }
    }
}
