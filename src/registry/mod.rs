//! Registry adapters for looking up a package's latest published version
//!
//! This module provides:
//! - The `VersionSource` port used by the version resolver
//! - A source that shells out to the package manager (`npm view`)
//! - An HTTP npm registry source for custom registry URLs

mod client;
mod command;
mod npm;

pub use client::HttpClient;
pub use command::{parse_view_output, CommandVersionSource};
pub use npm::{NpmRegistry, NPM_REGISTRY_URL};

use crate::domain::PackageManager;
use crate::error::RegistryError;
use async_trait::async_trait;
use std::path::Path;

/// Anything that can report the latest published version of a package
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Name used in error messages
    fn registry_name(&self) -> &str;

    /// Fetch the latest published version string
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError>;
}

/// Create the version source for a run
///
/// An explicit registry URL selects the HTTP adapter; otherwise the
/// package manager CLI is asked, running in `root`.
pub fn create_source(
    package_manager: PackageManager,
    registry_url: Option<&str>,
    root: &Path,
) -> Result<Box<dyn VersionSource>, RegistryError> {
    match registry_url {
        Some(url) => Ok(Box::new(NpmRegistry::with_base_url(HttpClient::new()?, url))),
        None => Ok(Box::new(CommandVersionSource::new(package_manager, root))),
    }
}
