//! Validated description of one update run

use super::PackageManager;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Everything the core needs to know about a run
///
/// Built once at the boundary with [`UpdateRequest::new`] and the `with_*`
/// methods, then only borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Name of the dependency to update
    pub package_name: String,
    /// Requested target version; ignored unless it is a bare `X.Y.Z`
    pub new_version: Option<String>,
    /// Directory the relative include/exclude entries are resolved against
    pub root: PathBuf,
    /// Search roots relative to `root`; empty means `root` itself
    pub include_dirs: Vec<String>,
    /// Directories relative to `root` that are never searched
    pub exclude_dirs: Vec<String>,
    /// Run install after a manifest is rewritten
    pub apply: bool,
    /// Run install and then tests after a manifest is rewritten
    pub test: bool,
    /// Package manager used for install, test and version lookup
    pub package_manager: PackageManager,
    /// Report what would change without writing or running anything
    pub dry_run: bool,
}

impl UpdateRequest {
    /// Creates a request for `package_name` rooted at `root`
    pub fn new(package_name: impl Into<String>, root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let package_name = package_name.into().trim().to_string();
        if package_name.is_empty() {
            return Err(ConfigError::EmptyPackageName);
        }

        Ok(Self {
            package_name,
            new_version: None,
            root: root.into(),
            include_dirs: Vec::new(),
            exclude_dirs: Vec::new(),
            apply: false,
            test: false,
            package_manager: PackageManager::default(),
            dry_run: false,
        })
    }

    /// Set the requested version
    pub fn with_new_version(mut self, version: Option<String>) -> Self {
        self.new_version = version;
        self
    }

    /// Set the include directories
    pub fn with_include_dirs(mut self, dirs: Vec<String>) -> Self {
        self.include_dirs = dirs;
        self
    }

    /// Set the exclude directories
    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    /// Enable install after update
    pub fn with_apply(mut self, apply: bool) -> Self {
        self.apply = apply;
        self
    }

    /// Enable install and test after update
    pub fn with_test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    /// Select the package manager by name
    pub fn with_package_manager_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.package_manager = name.parse()?;
        Ok(self)
    }

    /// Enable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether an install has to follow a rewrite; testing implies installing
    pub fn wants_install(&self) -> bool {
        self.apply || self.test
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let request = UpdateRequest::new("react", "/repo").unwrap();
        assert_eq!(request.package_name, "react");
        assert_eq!(request.root(), Path::new("/repo"));
        assert!(request.new_version.is_none());
        assert!(request.include_dirs.is_empty());
        assert!(request.exclude_dirs.is_empty());
        assert!(!request.apply);
        assert!(!request.test);
        assert!(!request.dry_run);
        assert_eq!(request.package_manager, PackageManager::Npm);
    }

    #[test]
    fn test_new_rejects_empty_name() {
        assert!(matches!(
            UpdateRequest::new("  ", "/repo"),
            Err(ConfigError::EmptyPackageName)
        ));
    }

    #[test]
    fn test_invalid_package_manager_name() {
        let result = UpdateRequest::new("react", "/repo")
            .unwrap()
            .with_package_manager_name("bun");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPackageManager { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let request = UpdateRequest::new("@scope/pkg", "/repo")
            .unwrap()
            .with_new_version(Some("1.2.3".to_string()))
            .with_include_dirs(vec!["apps".to_string()])
            .with_exclude_dirs(vec!["apps/legacy".to_string()])
            .with_apply(true)
            .with_package_manager_name("yarn")
            .unwrap();
        assert_eq!(request.new_version.as_deref(), Some("1.2.3"));
        assert_eq!(request.include_dirs, vec!["apps"]);
        assert_eq!(request.exclude_dirs, vec!["apps/legacy"]);
        assert_eq!(request.package_manager, PackageManager::Yarn);
        assert!(request.wants_install());
    }

    #[test]
    fn test_test_implies_install() {
        let request = UpdateRequest::new("react", "/repo").unwrap().with_test(true);
        assert!(!request.apply);
        assert!(request.wants_install());
    }

    #[test]
    fn test_no_install_by_default() {
        let request = UpdateRequest::new("react", "/repo").unwrap();
        assert!(!request.wants_install());
    }
}
