//! Latest-version lookup through the package manager CLI
//!
//! Runs `npm view <pkg> version` or `yarn info <pkg> version --silent` and
//! reads the version from stdout. The command runs in the request root so
//! that project `.npmrc` / `.yarnrc` registry settings apply.

use crate::domain::PackageManager;
use crate::error::RegistryError;
use crate::registry::VersionSource;
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Version source backed by the package manager executable
#[derive(Debug, Clone)]
pub struct CommandVersionSource {
    package_manager: PackageManager,
    program: String,
    working_dir: PathBuf,
}

impl CommandVersionSource {
    /// Create a source that shells out to `package_manager` in `working_dir`
    pub fn new(package_manager: PackageManager, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_manager,
            program: package_manager.program().to_string(),
            working_dir: working_dir.into(),
        }
    }

    #[cfg(test)]
    fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Directory the query runs in
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn command(&self, package: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(self.package_manager.view_version_args(package))
            .current_dir(&self.working_dir);
        command
    }

    fn command_line(&self, package: &str) -> String {
        let mut parts = vec![self.package_manager.program()];
        parts.extend(self.package_manager.view_version_args(package));
        parts.join(" ")
    }
}

#[async_trait]
impl VersionSource for CommandVersionSource {
    fn registry_name(&self) -> &str {
        self.package_manager.program()
    }

    async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
        let command_line = self.command_line(package);
        debug!("Querying latest version: {}", command_line);

        let output = self
            .command(package)
            .output()
            .await
            .map_err(|e| RegistryError::query_failed(package, &command_line, e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            if stderr.contains("E404") || stderr.contains("404 Not Found") {
                return Err(RegistryError::package_not_found(
                    package,
                    self.registry_name(),
                ));
            }
            return Err(RegistryError::query_failed(
                package,
                &command_line,
                last_line(&stderr).unwrap_or("command exited unsuccessfully"),
            ));
        }

        parse_view_output(package, &command_line, &stdout)
    }
}

/// Extract the version printed by a view/info command
///
/// The version is the last non-empty stdout line; empty output means the
/// registry returned nothing for the package.
pub fn parse_view_output(
    package: &str,
    command_line: &str,
    stdout: &str,
) -> Result<String, RegistryError> {
    match last_line(stdout) {
        Some(line) => Ok(line.trim_matches('"').to_string()),
        None => Err(RegistryError::query_failed(
            package,
            command_line,
            "no version printed",
        )),
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_npm() {
        let source = CommandVersionSource::new(PackageManager::Npm, "/repo");
        assert_eq!(source.command_line("react"), "npm view react version");
        assert_eq!(source.registry_name(), "npm");
    }

    #[test]
    fn test_command_line_yarn() {
        let source = CommandVersionSource::new(PackageManager::Yarn, "/repo");
        assert_eq!(
            source.command_line("@scope/pkg"),
            "yarn info @scope/pkg version --silent"
        );
    }

    #[test]
    fn test_query_runs_in_working_dir() {
        let source = CommandVersionSource::new(PackageManager::Npm, "/work/monorepo");
        let command = source.command("@corp/foo");
        let std_command = command.as_std();

        assert_eq!(source.working_dir(), Path::new("/work/monorepo"));
        assert_eq!(
            std_command.get_current_dir(),
            Some(Path::new("/work/monorepo"))
        );
        assert_eq!(std_command.get_program(), "npm");
        let args: Vec<_> = std_command.get_args().collect();
        assert_eq!(args, ["view", "@corp/foo", "version"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_query_reads_project_settings() {
        use std::os::unix::fs::PermissionsExt;

        // A stand-in npm that only answers when the project settings are
        // in its working directory
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("fake-npm");
        std::fs::write(
            &script,
            "#!/bin/sh\nif [ -f .npmrc ]; then echo 3.0.0; else echo 'npm ERR! code E404' >&2; exit 1; fi\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        let project = dir.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join(".npmrc"), "@corp:registry=https://npm.corp.example\n").unwrap();

        let source = CommandVersionSource::new(PackageManager::Npm, &project)
            .with_program(script.display().to_string());
        assert_eq!(source.latest_version("@corp/foo").await.unwrap(), "3.0.0");

        let elsewhere = CommandVersionSource::new(PackageManager::Npm, dir.path())
            .with_program(script.display().to_string());
        let err = elsewhere.latest_version("@corp/foo").await.unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound { .. }));
    }

    #[test]
    fn test_parse_view_output_plain() {
        assert_eq!(
            parse_view_output("react", "npm view react version", "18.3.1\n").unwrap(),
            "18.3.1"
        );
    }

    #[test]
    fn test_parse_view_output_takes_last_line() {
        let stdout = "warning something\n\n4.17.21\n";
        assert_eq!(parse_view_output("lodash", "cmd", stdout).unwrap(), "4.17.21");
    }

    #[test]
    fn test_parse_view_output_strips_quotes() {
        assert_eq!(parse_view_output("x", "cmd", "\"1.0.0\"").unwrap(), "1.0.0");
    }

    #[test]
    fn test_parse_view_output_empty() {
        let err = parse_view_output("ghost", "npm view ghost version", "  \n").unwrap_err();
        assert!(matches!(err, RegistryError::QueryFailed { .. }));
    }
}
