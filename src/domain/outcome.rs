//! Per-manifest outcome types

use super::DependencyKind;
use crate::error::{CommandError, ManifestError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason why a manifest was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Package is in neither `dependencies` nor `devDependencies`
    PackageNotListed,
    /// Stripped current version already equals the target
    AlreadyUpToDate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PackageNotListed => write!(f, "package not listed"),
            SkipReason::AlreadyUpToDate => write!(f, "already up to date"),
        }
    }
}

/// Reason why processing a manifest failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// Unparseable or wrongly shaped package.json
    InvalidManifest { message: String },
    /// The manifest could not be read or written
    Io { message: String },
    /// Install or test command failed
    ExternalCommand {
        command: String,
        message: String,
        stderr: String,
    },
}

impl From<ManifestError> for FailureReason {
    fn from(err: ManifestError) -> Self {
        if err.is_invalid_manifest() {
            FailureReason::InvalidManifest {
                message: err.to_string(),
            }
        } else {
            FailureReason::Io {
                message: err.to_string(),
            }
        }
    }
}

impl From<CommandError> for FailureReason {
    fn from(err: CommandError) -> Self {
        let command = match &err {
            CommandError::Spawn { command, .. } | CommandError::Failed { command, .. } => {
                command.clone()
            }
        };
        FailureReason::ExternalCommand {
            command,
            stderr: err.stderr().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::InvalidManifest { message } => write!(f, "invalid manifest: {}", message),
            FailureReason::Io { message } => write!(f, "{}", message),
            FailureReason::ExternalCommand { message, .. } => write!(f, "{}", message),
        }
    }
}

/// Result of processing a single manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The manifest was (or, in dry-run mode, would be) rewritten
    Updated {
        /// Map that held the package
        kind: DependencyKind,
        /// Range before the update, e.g. `^1.0.0`
        previous: String,
        /// Range after the update, e.g. `^2.0.0`
        current: String,
        /// Install ran successfully
        installed: bool,
        /// Tests ran successfully
        tested: bool,
    },
    /// Nothing to do
    Skipped { reason: SkipReason },
    /// Processing failed; other manifests are unaffected
    Failed { reason: FailureReason },
}

impl FileOutcome {
    /// Creates a Skipped outcome
    pub fn skipped(reason: SkipReason) -> Self {
        FileOutcome::Skipped { reason }
    }

    /// Creates a Failed outcome
    pub fn failed(reason: impl Into<FailureReason>) -> Self {
        FileOutcome::Failed {
            reason: reason.into(),
        }
    }

    /// Returns true if this is an Updated outcome
    pub fn is_updated(&self) -> bool {
        matches!(self, FileOutcome::Updated { .. })
    }

    /// Returns true if this is a Skipped outcome
    pub fn is_skipped(&self) -> bool {
        matches!(self, FileOutcome::Skipped { .. })
    }

    /// Returns true if this is a Failed outcome
    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }

    /// Skip reason, if skipped
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            FileOutcome::Skipped { reason } => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Updated {
                kind,
                previous,
                current,
                ..
            } => write!(f, "{}: {} → {}", kind, previous, current),
            FileOutcome::Skipped { reason } => write!(f, "skipped ({})", reason),
            FileOutcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}
