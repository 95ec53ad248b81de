//! CLI argument parsing module for bumpdep

use crate::config::ProjectConfig;
use crate::domain::UpdateRequest;
use crate::error::ConfigError;
use crate::paths::parse_dir_list;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bump one npm dependency across many package.json files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bumpdep",
    version,
    about = "Bump one npm dependency across many package.json files"
)]
pub struct CliArgs {
    /// Root directory that relative include/exclude entries resolve against
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Show what would be updated without writing files or running commands
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Query this npm registry over HTTP instead of the package manager CLI
    #[arg(long, global = true, value_name = "URL")]
    pub registry: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Update a dependency in every package.json that lists it
    Update(UpdateArgs),
}

/// Arguments of the `update` subcommand
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Package to update
    pub package: String,

    /// Target version (MAJOR.MINOR.PATCH); latest from the registry when omitted
    #[arg(short = 'n', long, value_name = "VERSION")]
    pub new_version: Option<String>,

    /// Comma-separated directories to search (default: the root)
    #[arg(short, long, value_name = "DIRS")]
    pub include: Option<String>,

    /// Comma-separated directories to skip
    #[arg(short, long, value_name = "DIRS")]
    pub exclude: Option<String>,

    /// Run install in each updated project
    #[arg(short, long)]
    pub apply: bool,

    /// Run install and tests in each updated project
    #[arg(short, long)]
    pub test: bool,

    /// Package manager to use (npm or yarn)
    #[arg(short, long, value_name = "NAME")]
    pub package_manager: Option<String>,
}

impl UpdateArgs {
    /// Parsed `--include` list
    pub fn include_dirs(&self) -> Option<Vec<String>> {
        self.include.as_deref().map(parse_dir_list)
    }

    /// Parsed `--exclude` list
    pub fn exclude_dirs(&self) -> Option<Vec<String>> {
        self.exclude.as_deref().map(parse_dir_list)
    }
}

impl CliArgs {
    /// Registry URL, from the command line or the project file
    pub fn registry_url<'a>(&'a self, config: &'a ProjectConfig) -> Option<&'a str> {
        self.registry
            .as_deref()
            .or(config.registry.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Build the update request, filling gaps from the project file
    pub fn to_request(&self, config: &ProjectConfig) -> Result<UpdateRequest, ConfigError> {
        let Command::Update(args) = &self.command;

        let package_manager = args
            .package_manager
            .as_deref()
            .or(config.package_manager.as_deref())
            .unwrap_or("npm");
        let exclude = args
            .exclude_dirs()
            .or_else(|| config.exclude.clone())
            .unwrap_or_default();

        Ok(UpdateRequest::new(args.package.as_str(), self.root.clone())?
            .with_new_version(args.new_version.clone())
            .with_include_dirs(args.include_dirs().unwrap_or_default())
            .with_exclude_dirs(exclude)
            .with_apply(args.apply)
            .with_test(args.test)
            .with_package_manager_name(package_manager)?
            .with_dry_run(self.dry_run))
    }
}
