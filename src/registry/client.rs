//! HTTP client shared foundation
//!
//! Thin wrapper over reqwest with a timeout, a User-Agent and status-code
//! mapping into [`RegistryError`]. Requests are never retried.

use crate::error::RegistryError;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("bumpdep/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request and parse the JSON body
    ///
    /// `accept` overrides the Accept header, e.g. for npm's abbreviated
    /// metadata format.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        accept: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RegistryError::network_error(package, registry, "request timed out")
                } else {
                    RegistryError::network_error(package, registry, e.to_string())
                }
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(RegistryError::package_not_found(package, registry));
            }
            status if !status.is_success() => {
                return Err(RegistryError::network_error(
                    package,
                    registry,
                    format!("HTTP {}", status),
                ));
            }
            _ => {}
        }

        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(package, registry, format!("failed to parse JSON: {}", e))
        })
    }
}
