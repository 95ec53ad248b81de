//! npm Registry adapter
//!
//! Reads the `latest` dist-tag from the registry's abbreviated package
//! metadata: `GET {registry}/{package}`.

use crate::error::RegistryError;
use crate::registry::{HttpClient, VersionSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Public npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Abbreviated metadata media type (much smaller than the full document)
const ABBREVIATED_METADATA: &str = "application/vnd.npm.install-v1+json";

/// npm Registry adapter
pub struct NpmRegistry {
    client: HttpClient,
    base_url: String,
}

/// Abbreviated package metadata response
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
}

impl NpmRegistry {
    /// Create an adapter for the public npm registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create an adapter for a custom registry
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build the URL for a package; the scope separator is percent-encoded
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package.replace('/', "%2f"))
    }
}

#[async_trait]
impl VersionSource for NpmRegistry {
    fn registry_name(&self) -> &str {
        &self.base_url
    }

    async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: NpmPackageResponse = self
            .client
            .get_json(&url, ABBREVIATED_METADATA, package, self.registry_name())
            .await?;

        response.dist_tags.get("latest").cloned().ok_or_else(|| {
            RegistryError::invalid_response(package, self.registry_name(), "no 'latest' dist-tag")
        })
    }
}
