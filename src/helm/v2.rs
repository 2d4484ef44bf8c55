// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Helm 2.x, which needs Tiller running in the cluster

use crate::constants::{binaries, WORKING_DIR};
use crate::error::Result;
use crate::helm::{validate_repo_url, ChartManager};
use crate::shell::{args, Executor};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub struct Helm2 {
    executor: Arc<dyn Executor>,
}

impl Helm2 {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    async fn helm(&self, arguments: &[String]) -> Result<String> {
        self.executor
            .execute(WORKING_DIR, binaries::HELM, arguments)
            .await
    }
}

#[async_trait]
impl ChartManager for Helm2 {
    #[instrument(skip(self))]
    async fn add_repo(&self, name: &str, url: &str) -> Result<()> {
        validate_repo_url(url)?;
        let output = self.helm(&args(["repo", "add", name, url])).await?;
        info!("Helm repository {} added", name);
        debug!("{}", output);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn init(&self) -> Result<()> {
        let output = self.helm(&args(["init", "--wait"])).await?;
        info!("Tiller initialised");
        debug!("{}", output);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn install_chart(
        &self,
        release: &str,
        chart_ref: &str,
        version: &str,
        extra_flags: &[String],
    ) -> Result<()> {
        let mut arguments = args(["install", chart_ref, "--name", release, "--version", version]);
        arguments.extend_from_slice(extra_flags);

        let output = self.helm(&arguments).await?;
        info!("Chart {} {} installed as {}", chart_ref, version, release);
        debug!("{}", output);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_chart(&self, release: &str) -> Result<()> {
        let output = self.helm(&args(["delete", "--purge", release])).await?;
        info!("Release {} deleted", release);
        debug!("{}", output);
        Ok(())
    }

    fn timeout_flag(&self, timeout: Duration) -> String {
        format!("--timeout={}", timeout.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockExecutor;

    fn make_helm(mock: &MockExecutor) -> Helm2 {
        Helm2::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_install_chart_argument_order() {
        let mock = MockExecutor::new().on("helm install", "");
        let helm = make_helm(&mock);

        helm.install_chart("metricbeat", "elastic/metricbeat", "7.6.1", &args(["--wait"]))
            .await
            .unwrap();

        assert_eq!(
            mock.calls(),
            vec!["helm install elastic/metricbeat --name metricbeat --version 7.6.1 --wait"]
        );
    }

    #[tokio::test]
    async fn test_init_bootstraps_tiller() {
        let mock = MockExecutor::new().on("helm init --wait", "Tiller is running");
        let helm = make_helm(&mock);

        helm.init().await.unwrap();

        assert_eq!(mock.calls(), vec!["helm init --wait"]);
    }

    #[tokio::test]
    async fn test_delete_chart_purges_release() {
        let mock = MockExecutor::new().on("helm delete --purge", "release deleted");
        let helm = make_helm(&mock);

        helm.delete_chart("metricbeat").await.unwrap();

        assert_eq!(mock.calls(), vec!["helm delete --purge metricbeat"]);
    }

    #[tokio::test]
    async fn test_add_repo_rejects_invalid_url() {
        let mock = MockExecutor::new();
        let helm = make_helm(&mock);

        assert!(helm.add_repo("elastic", "not a url").await.is_err());
        assert!(mock.calls().is_empty());
    }
}
