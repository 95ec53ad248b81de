//! Target version resolution

use crate::domain::VersionSpec;
use crate::error::RegistryError;
use crate::registry::VersionSource;
use log::{debug, info};

/// Decide the version every manifest is brought to
///
/// A requested version is used as-is when it is a bare `X.Y.Z`; anything
/// else (absent, a range, a partial version) falls back to the registry's
/// latest version. Registry failures propagate and are not retried.
pub async fn resolve_version(
    source: &dyn VersionSource,
    package: &str,
    requested: Option<&str>,
) -> Result<VersionSpec, RegistryError> {
    if let Some(requested) = requested {
        if let Some(version) = VersionSpec::parse(requested) {
            debug!("Using requested version {}", version);
            return Ok(version);
        }
        info!(
            "Ignoring '{}': not a MAJOR.MINOR.PATCH version, looking up latest",
            requested
        );
    }

    let latest = source.latest_version(package).await?;
    let version = VersionSpec::parse(latest.trim()).ok_or_else(|| {
        RegistryError::invalid_response(
            package,
            source.registry_name(),
            format!("'{}' is not a MAJOR.MINOR.PATCH version", latest),
        )
    })?;

    info!("Latest version of {} is {}", package, version);
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSource {
        answer: Result<&'static str, ()>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn returning(version: &'static str) -> Self {
            Self {
                answer: Ok(version),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                answer: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl VersionSource for FakeSource {
        fn registry_name(&self) -> &str {
            "fake"
        }

        async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
                .map(str::to_string)
                .map_err(|_| RegistryError::package_not_found(package, "fake"))
        }
    }

    #[tokio::test]
    async fn test_requested_version_is_used() {
        let source = FakeSource::returning("9.9.9");
        let version = resolve_version(&source, "react", Some("18.2.0")).await.unwrap();
        assert_eq!(version.as_str(), "18.2.0");
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_version_queries_registry() {
        let source = FakeSource::returning("18.3.1");
        let version = resolve_version(&source, "react", None).await.unwrap();
        assert_eq!(version.as_str(), "18.3.1");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_partial_version_falls_back_to_registry() {
        let source = FakeSource::returning("1.4.0");
        let version = resolve_version(&source, "foo", Some("1.2")).await.unwrap();
        assert_eq!(version.as_str(), "1.4.0");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_range_falls_back_to_registry() {
        let source = FakeSource::returning("2.0.0");
        let version = resolve_version(&source, "foo", Some("^1.0.0")).await.unwrap();
        assert_eq!(version.as_str(), "2.0.0");
    }

    #[tokio::test]
    async fn test_registry_output_is_trimmed() {
        let source = FakeSource::returning("3.0.1\n");
        let version = resolve_version(&source, "foo", None).await.unwrap();
        assert_eq!(version.as_str(), "3.0.1");
    }

    #[tokio::test]
    async fn test_registry_failure_propagates() {
        let source = FakeSource::failing();
        let err = resolve_version(&source, "ghost", None).await.unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound { .. }));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_prerelease_from_registry_is_rejected() {
        let source = FakeSource::returning("19.0.0-rc.1");
        let err = resolve_version(&source, "react", None).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidResponse { .. }));
    }
}
