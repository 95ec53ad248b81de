//! Run summary types
//!
//! Provides structures for tracking outcomes at file and run level.

use super::{FileOutcome, PackageManager, SkipReason, VersionSpec};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome for a single manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestResult {
    /// Absolute path to the package.json
    pub path: PathBuf,
    /// What happened to it
    pub outcome: FileOutcome,
}

impl ManifestResult {
    /// Creates a new ManifestResult
    pub fn new(path: impl Into<PathBuf>, outcome: FileOutcome) -> Self {
        Self {
            path: path.into(),
            outcome,
        }
    }
}

/// Overall summary of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    /// Package that was updated
    pub package: String,
    /// Version every manifest was brought to
    pub target_version: VersionSpec,
    /// Package manager used for side effects
    pub package_manager: PackageManager,
    /// Results for each manifest discovered, in discovery order
    pub manifests: Vec<ManifestResult>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl UpdateSummary {
    /// Creates an empty summary
    pub fn new(
        package: impl Into<String>,
        target_version: VersionSpec,
        package_manager: PackageManager,
        dry_run: bool,
    ) -> Self {
        Self {
            package: package.into(),
            target_version,
            package_manager,
            manifests: Vec::new(),
            dry_run,
        }
    }

    /// Adds a manifest result
    pub fn add_manifest(&mut self, result: ManifestResult) {
        self.manifests.push(result);
    }

    /// Number of manifests discovered (the run's terminal count)
    pub fn files_discovered(&self) -> usize {
        self.manifests.len()
    }

    /// Number of manifests rewritten
    pub fn files_updated(&self) -> usize {
        self.manifests.iter().filter(|m| m.outcome.is_updated()).count()
    }

    /// Number of manifests left untouched
    pub fn files_skipped(&self) -> usize {
        self.manifests.iter().filter(|m| m.outcome.is_skipped()).count()
    }

    /// Number of manifests that failed
    pub fn files_failed(&self) -> usize {
        self.manifests.iter().filter(|m| m.outcome.is_failed()).count()
    }

    /// Number of manifests skipped for a given reason
    pub fn skipped_because(&self, reason: SkipReason) -> usize {
        self.manifests
            .iter()
            .filter(|m| m.outcome.skip_reason() == Some(reason))
            .count()
    }

    /// Returns true if any manifest failed
    pub fn has_failures(&self) -> bool {
        self.files_failed() > 0
    }

    /// Returns all updated manifests
    pub fn updated(&self) -> impl Iterator<Item = &ManifestResult> {
        self.manifests.iter().filter(|m| m.outcome.is_updated())
    }

    /// Returns all failed manifests
    pub fn failed(&self) -> impl Iterator<Item = &ManifestResult> {
        self.manifests.iter().filter(|m| m.outcome.is_failed())
    }
}
