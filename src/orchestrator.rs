//! Update orchestrator for coordinating one run
//!
//! This module provides:
//! - Workflow coordination: resolve version → locate manifests → update each
//! - Sequential processing with per-file failure isolation
//! - Dry-run mode support

use crate::domain::{ManifestResult, UpdateRequest, UpdateSummary};
use crate::error::{AppError, ManifestError};
use crate::manifest::{find_manifests, search_roots};
use crate::package_manager::PackageManagerRunner;
use crate::progress::Progress;
use crate::registry::VersionSource;
use crate::update::{resolve_version, ManifestUpdater};
use log::{debug, info};

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    /// Latest-version lookup
    source: Box<dyn VersionSource>,
    /// Install/test runner
    runner: Box<dyn PackageManagerRunner>,
    /// Whether to show spinners
    show_progress: bool,
}

impl Orchestrator {
    /// Create an orchestrator with its collaborators
    pub fn new(source: Box<dyn VersionSource>, runner: Box<dyn PackageManagerRunner>) -> Self {
        Self {
            source,
            runner,
            show_progress: false,
        }
    }

    /// Enable or disable progress display
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run the update workflow
    ///
    /// Fails as a whole only when the version cannot be resolved, discovery
    /// blows up, or no manifest is found. Per-file problems end up in the
    /// summary.
    pub async fn run(&self, request: &UpdateRequest) -> Result<UpdateSummary, AppError> {
        let mut progress = Progress::new(self.show_progress);

        // Step 1: Resolve the target version once for the whole run
        progress.spinner(&format!("Resolving version of {}...", request.package_name));
        let target = resolve_version(
            self.source.as_ref(),
            &request.package_name,
            request.new_version.as_deref(),
        )
        .await;
        progress.finish_and_clear();
        let target = target?;

        // Step 2: Locate manifests
        progress.spinner("Searching for package.json files...");
        let manifests = find_manifests(&request.root, &request.include_dirs, &request.exclude_dirs);
        progress.finish_and_clear();
        let manifests = manifests?;

        if manifests.is_empty() {
            let roots = search_roots(&request.root, &request.include_dirs);
            return Err(ManifestError::not_found(roots).into());
        }
        info!(
            "Updating {} to {} in {} manifest(s)",
            request.package_name,
            target,
            manifests.len()
        );

        // Step 3: Update each manifest in turn
        let updater = ManifestUpdater::new(request, &target, self.runner.as_ref());
        let mut summary = UpdateSummary::new(
            &request.package_name,
            target.clone(),
            request.package_manager,
            request.dry_run,
        );

        progress.start(manifests.len() as u64, "Updating manifests");
        for path in manifests {
            progress.set_message(&path.display().to_string());
            let outcome = updater.update_one(&path);
            debug!("{}: {}", path.display(), outcome);
            summary.add_manifest(ManifestResult::new(path, outcome));
            progress.inc();
        }
        progress.finish_and_clear();

        Ok(summary)
    }
}
