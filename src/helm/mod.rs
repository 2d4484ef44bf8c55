// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Chart management through the helm binary.
//!
//! Helm 2 and Helm 3 disagree on argument order, release deletion and whether
//! a server-side component must be bootstrapped, so each major version is its
//! own [`ChartManager`] and [`helm_factory`] picks one from configuration.

pub mod v2;
pub mod v3;

use crate::error::{Result, VerifierError};
use crate::shell::Executor;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub use v2::Helm2;
pub use v3::Helm3;

#[async_trait]
pub trait ChartManager: Send + Sync {
    /// Register a chart repository
    async fn add_repo(&self, name: &str, url: &str) -> Result<()>;

    /// Prepare the chart tool once the cluster exists
    async fn init(&self) -> Result<()>;

    /// Install `chart_ref` at `version` as `release`, passing `extra_flags` through
    async fn install_chart(
        &self,
        release: &str,
        chart_ref: &str,
        version: &str,
        extra_flags: &[String],
    ) -> Result<()>;

    /// Remove a release and its resources
    async fn delete_chart(&self, release: &str) -> Result<()>;

    /// Flag limiting how long an install with `--wait` may take
    fn timeout_flag(&self, timeout: Duration) -> String;
}

/// Build the chart manager matching a configured Helm version such as "2.x" or "3.1.0"
pub fn helm_factory(version: &str, executor: Arc<dyn Executor>) -> Result<Box<dyn ChartManager>> {
    let major = version.trim().split('.').next().unwrap_or_default();

    match major {
        "2" => Ok(Box::new(Helm2::new(executor))),
        "3" => Ok(Box::new(Helm3::new(executor))),
        _ => Err(VerifierError::UnsupportedHelmVersion(version.to_string())),
    }
}

/// Reject repository URLs helm would fail on later with a less useful message
pub(crate) fn validate_repo_url(url: &str) -> Result<()> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|source| VerifierError::InvalidRepoUrl {
            url: url.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockExecutor;

    fn make_executor() -> Arc<dyn Executor> {
        Arc::new(MockExecutor::new())
    }

    #[test]
    fn test_factory_accepts_helm_2() {
        for version in ["2", "2.x", "2.16.1"] {
            let helm = helm_factory(version, make_executor()).unwrap();
            assert_eq!(helm.timeout_flag(Duration::from_secs(900)), "--timeout=900");
        }
    }

    #[test]
    fn test_factory_accepts_helm_3() {
        for version in ["3", "3.x", "3.1.0"] {
            let helm = helm_factory(version, make_executor()).unwrap();
            assert_eq!(helm.timeout_flag(Duration::from_secs(900)), "--timeout=900s");
        }
    }

    #[test]
    fn test_factory_rejects_unknown_version() {
        for version in ["1.0", "4.x", "", "latest", "23.1"] {
            let err = helm_factory(version, make_executor()).err().unwrap();
            assert!(matches!(err, VerifierError::UnsupportedHelmVersion(ref v) if v == version));
        }
    }

    #[test]
    fn test_validate_repo_url() {
        assert!(validate_repo_url("https://helm.elastic.co").is_ok());
        assert!(validate_repo_url("helm.elastic.co").is_err());
    }
}
