//! Package manager integration for installing and testing updated projects
//!
//! This module provides:
//! - The `PackageManagerRunner` port used by the manifest updater
//! - A system runner executing `npm`/`yarn` in the project directory
//!
//! Commands run synchronously: the caller is blocked until the process
//! exits, and there is no timeout.

use crate::domain::PackageManager;
use crate::error::CommandError;
use log::info;
use std::path::Path;
use std::process::{Command, Output};

/// Captured output of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// The command that was executed
    pub command: String,
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command
    pub stderr: String,
}

/// Trait for running package manager commands in a project directory
pub trait PackageManagerRunner {
    /// Install the project's dependencies
    fn run_install(
        &self,
        package_manager: PackageManager,
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError>;

    /// Run the project's tests, tolerating an empty suite
    fn run_test(
        &self,
        package_manager: PackageManager,
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError>;
}

/// Default package manager runner that executes real commands
#[derive(Debug, Default)]
pub struct SystemPackageManager;

impl SystemPackageManager {
    /// Create a new system package manager
    pub fn new() -> Self {
        Self
    }

    /// Run a command and capture output
    fn run_command(
        &self,
        package_manager: PackageManager,
        args: &[&str],
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError> {
        let command = command_string(package_manager, args);
        info!("Running '{}' in {}", command, working_dir.display());

        let output: Output = Command::new(package_manager.program())
            .args(args)
            .current_dir(working_dir)
            .output()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                dir: working_dir.to_path_buf(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(CommandOutput {
                command,
                stdout,
                stderr,
            })
        } else {
            Err(CommandError::Failed {
                command,
                dir: working_dir.to_path_buf(),
                status: output.status.to_string(),
                stderr,
            })
        }
    }
}

impl PackageManagerRunner for SystemPackageManager {
    fn run_install(
        &self,
        package_manager: PackageManager,
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError> {
        self.run_command(package_manager, package_manager.install_args(), working_dir)
    }

    fn run_test(
        &self,
        package_manager: PackageManager,
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError> {
        self.run_command(package_manager, package_manager.test_args(), working_dir)
    }
}

/// Human-readable command line, e.g. `npm test -- --passWithNoTests`
pub fn command_string(package_manager: PackageManager, args: &[&str]) -> String {
    std::iter::once(package_manager.program())
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
