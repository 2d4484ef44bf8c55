// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Helm 3.x, client-only

use crate::constants::{binaries, WORKING_DIR};
use crate::error::Result;
use crate::helm::{validate_repo_url, ChartManager};
use crate::shell::{args, Executor};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub struct Helm3 {
    executor: Arc<dyn Executor>,
}

impl Helm3 {
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
impl ChartManager for Helm3 {
    #[instrument(skip(self))]
    async fn add_repo(&self, name: &str, url: &str) -> Result<()> {
        validate_repo_url(url)?;
        self.helm(&args(["repo", "add", name, url])).await?;
        // Helm 3 does not refresh the index on add
        let output = self.helm(&args(["repo", "update"])).await?;
        info!("Helm repository {} added", name);
        debug!("{}", output);
        Ok(())
    }

    async fn init(&self) -> Result<()> {
        debug!("Helm 3 has no server-side component to initialise");
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
        let mut arguments = args(["install", release, chart_ref, "--version", version]);
        arguments.extend_from_slice(extra_flags);

        let output = self.helm(&arguments).await?;
        info!("Chart {} {} installed as {}", chart_ref, version, release);
        debug!("{}", output);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_chart(&self, release: &str) -> Result<()> {
        let output = self.helm(&args(["uninstall", release])).await?;
        info!("Release {} deleted", release);
        debug!("{}", output);
        Ok(())
    }

    fn timeout_flag(&self, timeout: Duration) -> String {
        format!("--timeout={}s", timeout.as_secs())
    }
}
