// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ephemeral kind cluster lifecycle

use crate::constants::{binaries, KIND_NODE_IMAGE, WORKING_DIR};
use crate::error::{Result, VerifierError};
use crate::helm::ChartManager;
use crate::shell::{args, Executor};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterState {
    Absent,
    Creating,
    Running,
    Destroying,
}

/// A named kind cluster running a given Kubernetes version
pub struct Cluster {
    name: String,
    kubernetes_version: String,
    state: ClusterState,
    executor: Arc<dyn Executor>,
}

impl Cluster {
    pub fn new(name: &str, kubernetes_version: &str, executor: Arc<dyn Executor>) -> Self {
        Self {
            name: name.to_string(),
            kubernetes_version: kubernetes_version.to_string(),
            state: ClusterState::Absent,
            executor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ClusterState {
        self.state
    }

    /// Node image for the configured Kubernetes version
    pub fn node_image(&self) -> String {
        format!("{}:v{}", KIND_NODE_IMAGE, self.kubernetes_version)
    }

    async fn kind(&self, arguments: &[String]) -> Result<String> {
        self.executor
            .execute(WORKING_DIR, binaries::KIND, arguments)
            .await
    }

    /// Check whether kind lists a cluster with this name
    pub async fn is_running(&self) -> Result<bool> {
        let output = self.kind(&args(["get", "clusters"])).await?;
        let running = output.lines().any(|line| line.trim() == self.name);

        debug!("Cluster {} running: {}", self.name, running);
        Ok(running)
    }

    /// Create the cluster, then initialise the chart tool inside it.
    ///
    /// The chart tool is only initialised once kind lists the cluster.
    #[instrument(skip(self, helm), fields(cluster = %self.name))]
    pub async fn create(&mut self, helm: &dyn ChartManager) -> Result<()> {
        self.state = ClusterState::Creating;

        if let Err(e) = self.provision().await {
            self.state = ClusterState::Absent;
            return Err(e);
        }
        self.state = ClusterState::Running;

        helm.init().await?;
        Ok(())
    }

    async fn provision(&self) -> Result<()> {
        if self.is_running().await? {
            warn!("Kind cluster {} already exists, reusing it", self.name);
            return Ok(());
        }

        info!(
            "Creating kind cluster {} with Kubernetes {}",
            self.name, self.kubernetes_version
        );
        let image = self.node_image();
        let output = self
            .kind(&args(["create", "cluster", "--name", self.name.as_str(), "--image", image.as_str()]))
            .await?;
        debug!("{}", output);

        if !self.is_running().await? {
            return Err(VerifierError::ClusterError(format!(
                "cluster {} is not listed after creation",
                self.name
            )));
        }

        info!("Kind cluster {} created", self.name);
        Ok(())
    }

    /// Delete the cluster
    #[instrument(skip(self), fields(cluster = %self.name))]
    pub async fn destroy(&mut self) -> Result<()> {
        let previous = self.state;
        self.state = ClusterState::Destroying;

        match self.kind(&args(["delete", "cluster", "--name", self.name.as_str()])).await {
            Ok(output) => {
                debug!("{}", output);
                info!("Kind cluster {} destroyed", self.name);
                self.state = ClusterState::Absent;
                Ok(())
            }
            Err(e) => {
                self.state = previous;
                Err(VerifierError::ClusterError(format!(
                    "could not destroy cluster {}: {}",
                    self.name, e
                )))
            }
        }
    }
}
