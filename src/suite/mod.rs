// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The Helm chart test suite: lifecycle hooks, step procedures and the
//! assertions behind them.

pub mod context;
pub mod mounts;
pub mod naming;
pub mod steps;
pub mod verifier;

pub use context::TestContext;
pub use mounts::{SubPathCheck, VolumeMounts};
pub use steps::Step;
pub use verifier::Verifier;

use crate::config::Config;
use crate::constants::{repo, RUNTIME_DEPENDENCIES};
use crate::error::{AssertionFailure, Result, VerifierError};
use crate::helm::helm_factory;
use crate::kind::{Cluster, ClusterState};
use crate::kubernetes::Kubectl;
use crate::shell::Executor;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Suite {
    cluster: Cluster,
    verifier: Verifier,
}

impl Suite {
    pub fn new(cluster: Cluster, verifier: Verifier) -> Self {
        Self { cluster, verifier }
    }

    /// Wire the suite and a fresh context from configuration.
    ///
    /// Fails for a Helm version no chart manager exists for.
    pub fn from_config(config: &Config, executor: Arc<dyn Executor>) -> Result<(Self, TestContext)> {
        let ctx = TestContext::new(config);
        let helm = helm_factory(&config.helm_version, executor.clone())?;
        let cluster = Cluster::new(&ctx.cluster_name, &ctx.kubernetes_version, executor.clone());
        let verifier = Verifier::new(Kubectl::new(executor), helm);

        Ok((Self::new(cluster, verifier), ctx))
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    /// Create the cluster, register the chart repository and install the
    /// charts every scenario depends on
    pub async fn before_suite(&mut self, ctx: &TestContext) -> Result<()> {
        debug!("Before suite...");
        self.cluster.create(self.verifier.helm()).await?;

        self.verifier
            .helm()
            .add_repo(repo::NAME, repo::URL)
            .await?;

        for dependency in RUNTIME_DEPENDENCIES {
            info!("Installing {} as runtime dependency", dependency);
            self.verifier
                .install_release(dependency, &ctx.version)
                .await?;
        }
        Ok(())
    }

    pub async fn after_scenario(&self, ctx: &mut TestContext) {
        debug!("After scenario...");
        self.verifier.delete_chart(ctx).await;
    }

    /// Destroy the cluster if this suite brought it up
    pub async fn after_suite(&mut self) -> Result<()> {
        debug!("After suite...");
        if self.cluster.state() == ClusterState::Absent {
            return Ok(());
        }
        self.cluster.destroy().await
    }

    /// Precondition step: kind lists the suite's cluster
    pub async fn a_cluster_is_running(&self) -> Result<()> {
        let running = self.cluster.is_running().await.map_err(|e| {
            VerifierError::ClusterError(format!(
                "could not check the status of cluster {}: {}",
                self.cluster.name(),
                e
            ))
        })?;

        if !running {
            return Err(AssertionFailure::new(
                "The cluster is not running",
                self.cluster.name(),
                "not listed by kind",
                format!("cluster/{}", self.cluster.name()),
            )
            .into());
        }

        debug!("Cluster {} is running", self.cluster.name());
        Ok(())
    }
}
