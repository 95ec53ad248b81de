//! Version resolution and per-manifest update logic
//!
//! This module provides:
//! - Target version resolution (requested version or registry latest)
//! - The single-file update step: parse → compare → rewrite → install/test

mod resolver;

pub use resolver::resolve_version;

use crate::domain::{FileOutcome, SkipReason, UpdateRequest, VersionSpec};
use crate::manifest::{load_manifest, save_manifest};
use crate::package_manager::PackageManagerRunner;
use log::{debug, warn};
use std::path::Path;

/// Applies one run's target version to individual manifests
pub struct ManifestUpdater<'a, R: PackageManagerRunner + ?Sized> {
    request: &'a UpdateRequest,
    target: &'a VersionSpec,
    runner: &'a R,
}

impl<'a, R: PackageManagerRunner + ?Sized> ManifestUpdater<'a, R> {
    /// Create an updater for `request` bringing manifests to `target`
    pub fn new(request: &'a UpdateRequest, target: &'a VersionSpec, runner: &'a R) -> Self {
        Self {
            request,
            target,
            runner,
        }
    }

    /// Process a single manifest
    ///
    /// Never returns an error: every failure is captured in the outcome so
    /// the caller can move on to the next file. A manifest is written only
    /// when the package is listed and its stripped range differs from the
    /// target; install/test only follow such a write.
    pub fn update_one(&self, path: &Path) -> FileOutcome {
        let package = self.request.package_name.as_str();

        let mut manifest = match load_manifest(path) {
            Ok(m) => m,
            Err(e) => {
                warn!("{}", e);
                return FileOutcome::failed(e);
            }
        };

        let entry = match manifest.find_dependency(package) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!("{}: {} not listed", path.display(), package);
                return FileOutcome::skipped(SkipReason::PackageNotListed);
            }
            Err(e) => {
                warn!("{}", e);
                return FileOutcome::failed(e);
            }
        };

        if self.target.matches_range(&entry.range) {
            debug!("{}: {} already at {}", path.display(), package, entry.range);
            return FileOutcome::skipped(SkipReason::AlreadyUpToDate);
        }

        let new_range = self.target.to_range();
        manifest.set_dependency(entry.kind, package, &new_range);
        debug!(
            "{}: {} {} → {} in {}",
            path.display(),
            package,
            entry.range,
            new_range,
            entry.kind
        );

        let mut installed = false;
        let mut tested = false;

        if !self.request.dry_run {
            if let Err(e) = save_manifest(&manifest) {
                warn!("{}", e);
                return FileOutcome::failed(e);
            }

            if self.request.wants_install() {
                let dir = manifest.directory();
                let package_manager = self.request.package_manager;

                if let Err(e) = self.runner.run_install(package_manager, dir) {
                    warn!("{}", e);
                    return FileOutcome::failed(e);
                }
                installed = true;

                if self.request.test {
                    if let Err(e) = self.runner.run_test(package_manager, dir) {
                        warn!("{}", e);
                        return FileOutcome::failed(e);
                    }
                    tested = true;
                }
            }
        }

        FileOutcome::Updated {
            kind: entry.kind,
            previous: entry.range,
            current: new_range,
            installed,
            tested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyKind, FailureReason, PackageManager};
    use crate::error::CommandError;
    use crate::package_manager::CommandOutput;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRunner {
        fail_install: bool,
        fail_test: bool,
        calls: RefCell<Vec<(&'static str, PathBuf)>>,
    }

    impl RecordingRunner {
        fn record(
            &self,
            what: &'static str,
            dir: &Path,
            fail: bool,
        ) -> Result<CommandOutput, CommandError> {
            self.calls.borrow_mut().push((what, dir.to_path_buf()));
            if fail {
                Err(CommandError::Failed {
                    command: format!("npm {}", what),
                    dir: dir.to_path_buf(),
                    status: "exit status: 1".to_string(),
                    stderr: String::new(),
                })
            } else {
                Ok(CommandOutput {
                    command: format!("npm {}", what),
                    stdout: String::new(),
                    stderr: String::new(),
                })
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().iter().map(|(c, _)| *c).collect()
        }
    }

    impl PackageManagerRunner for RecordingRunner {
        fn run_install(
            &self,
            _package_manager: PackageManager,
            working_dir: &Path,
        ) -> Result<CommandOutput, CommandError> {
            self.record("install", working_dir, self.fail_install)
        }

        fn run_test(
            &self,
            _package_manager: PackageManager,
            working_dir: &Path,
        ) -> Result<CommandOutput, CommandError> {
            self.record("test", working_dir, self.fail_test)
        }
    }

    fn write_manifest(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("package.json");
        fs::write(&path, content).unwrap();
        path
    }

    fn request(dir: &TempDir) -> UpdateRequest {
        UpdateRequest::new("foo", dir.path()).unwrap()
    }

    fn target(v: &str) -> VersionSpec {
        VersionSpec::parse(v).unwrap()
    }

    #[test]
    fn test_updates_runtime_dependency() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"dependencies":{"foo":"^1.0.0"}}"#);
        let request = request(&dir);
        let target = target("2.0.0");
        let runner = RecordingRunner::default();

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        assert_eq!(
            outcome,
            FileOutcome::Updated {
                kind: DependencyKind::Runtime,
                previous: "^1.0.0".to_string(),
                current: "^2.0.0".to_string(),
                installed: false,
                tested: false,
            }
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"dependencies\": {\n    \"foo\": \"^2.0.0\"\n  }\n}\n"
        );
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_already_up_to_date_with_tilde() {
        let dir = TempDir::new().unwrap();
        let original = r#"{"devDependencies":{"foo":"~2.0.0"}}"#;
        let path = write_manifest(&dir, original);
        let request = request(&dir).with_apply(true).with_test(true);
        let target = target("2.0.0");
        let runner = RecordingRunner::default();

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        assert_eq!(outcome, FileOutcome::skipped(SkipReason::AlreadyUpToDate));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_package_not_listed_leaves_bytes_untouched() {
        let dir = TempDir::new().unwrap();
        let original = "{ \"name\":\"x\",\n\"dependencies\":{\"bar\":\"1.0.0\"} }";
        let path = write_manifest(&dir, original);
        let request = request(&dir).with_apply(true);
        let target = target("2.0.0");
        let runner = RecordingRunner::default();

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        assert_eq!(outcome, FileOutcome::skipped(SkipReason::PackageNotListed));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_invalid_json_is_failed() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "{ nope");
        let request = request(&dir);
        let target = target("2.0.0");
        let runner = RecordingRunner::default();

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        assert!(matches!(
            outcome,
            FileOutcome::Failed {
                reason: FailureReason::InvalidManifest { .. }
            }
        ));
    }

    #[test]
    fn test_only_runtime_entry_updated_when_listed_twice() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            r#"{"dependencies":{"foo":"^1.0.0"},"devDependencies":{"foo":"^0.9.0"}}"#,
        );
        let request = request(&dir);
        let target = target("2.0.0");
        let runner = RecordingRunner::default();

        ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["dependencies"]["foo"], "^2.0.0");
        assert_eq!(json["devDependencies"]["foo"], "^0.9.0");
    }

    #[test]
    fn test_apply_runs_install_in_manifest_dir() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"dependencies":{"foo":"^1.0.0"}}"#);
        let request = request(&dir).with_apply(true);
        let target = target("2.0.0");
        let runner = RecordingRunner::default();

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        assert!(matches!(
            outcome,
            FileOutcome::Updated {
                installed: true,
                tested: false,
                ..
            }
        ));
        assert_eq!(runner.calls(), vec!["install"]);
        assert_eq!(runner.calls.borrow()[0].1, dir.path());
    }

    #[test]
    fn test_test_implies_install_first() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"dependencies":{"foo":"^1.0.0"}}"#);
        let request = request(&dir).with_test(true);
        let target = target("2.0.0");
        let runner = RecordingRunner::default();

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        assert!(matches!(
            outcome,
            FileOutcome::Updated {
                installed: true,
                tested: true,
                ..
            }
        ));
        assert_eq!(runner.calls(), vec!["install", "test"]);
    }

    #[test]
    fn test_install_failure_skips_test_and_fails_file() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"dependencies":{"foo":"^1.0.0"}}"#);
        let request = request(&dir).with_test(true);
        let target = target("2.0.0");
        let runner = RecordingRunner {
            fail_install: true,
            ..Default::default()
        };

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        assert!(matches!(
            outcome,
            FileOutcome::Failed {
                reason: FailureReason::ExternalCommand { .. }
            }
        ));
        assert_eq!(runner.calls(), vec!["install"]);
        // the manifest was already rewritten before install ran
        assert!(fs::read_to_string(&path).unwrap().contains("^2.0.0"));
    }

    #[test]
    fn test_test_failure_fails_file() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"dependencies":{"foo":"^1.0.0"}}"#);
        let request = request(&dir).with_test(true);
        let target = target("2.0.0");
        let runner = RecordingRunner {
            fail_test: true,
            ..Default::default()
        };

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        assert!(outcome.is_failed());
        assert_eq!(runner.calls(), vec!["install", "test"]);
    }

    #[test]
    fn test_dry_run_writes_and_runs_nothing() {
        let dir = TempDir::new().unwrap();
        let original = r#"{"dependencies":{"foo":"^1.0.0"}}"#;
        let path = write_manifest(&dir, original);
        let request = request(&dir).with_test(true).with_dry_run(true);
        let target = target("2.0.0");
        let runner = RecordingRunner::default();

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        assert!(outcome.is_updated());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_pinned_version_is_updated_to_caret() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"devDependencies":{"foo":"1.0.0"}}"#);
        let request = request(&dir);
        let target = target("1.1.0");
        let runner = RecordingRunner::default();

        let outcome = ManifestUpdater::new(&request, &target, &runner).update_one(&path);

        match outcome {
            FileOutcome::Updated { kind, current, .. } => {
                assert_eq!(kind, DependencyKind::Dev);
                assert_eq!(current, "^1.1.0");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
