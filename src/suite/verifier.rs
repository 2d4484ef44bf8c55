// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Assertions over the resources an installed chart leaves in the cluster

use crate::constants::{elasticsearch, repo, DEFAULT_NAMESPACE};
use crate::error::{AssertionFailure, Result};
use crate::helm::ChartManager;
use crate::kubernetes::{Kubectl, ResourceList};
use crate::shell::args;
use crate::suite::context::TestContext;
use crate::suite::mounts::{SubPathCheck, VolumeMounts};
use crate::suite::naming::{
    app_name, app_selector, derive_resource_name, escape_jsonpath_key,
    get_kube_state_metrics_name, kube_state_metrics_deployment, metrics_resource_name,
    ResourceDescriptor,
};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const CHART_LABEL: &str = "jsonpath='{.metadata.labels.chart}'";
const FIRST_CONTAINER_MOUNTS: &str = ".items[0].spec.containers[0].volumeMounts[*]";

pub struct Verifier {
    kubectl: Kubectl,
    helm: Box<dyn ChartManager>,
}

impl Verifier {
    pub fn new(kubectl: Kubectl, helm: Box<dyn ChartManager>) -> Self {
        Self { kubectl, helm }
    }

    pub fn helm(&self) -> &dyn ChartManager {
        self.helm.as_ref()
    }

    /// Install `chart` from the Elastic repository as the chart under test
    pub async fn install(&self, ctx: &mut TestContext, chart: &str) -> Result<()> {
        ctx.name = chart.to_string();
        self.install_release(chart, &ctx.version).await
    }

    /// Install `chart` at `version`, with whatever the chart needs to run on kind
    #[instrument(skip(self))]
    pub async fn install_release(&self, chart: &str, version: &str) -> Result<()> {
        let flags = self.install_flags(chart).await?;
        let chart_ref = format!("{}/{}", repo::NAME, chart);

        self.helm.install_chart(chart, &chart_ref, version, &flags).await
    }

    async fn install_flags(&self, chart: &str) -> Result<Vec<String>> {
        if chart != elasticsearch::CHART {
            return Ok(Vec::new());
        }

        // kind has no default storage class for the Elasticsearch volumes
        self.kubectl
            .apply(elasticsearch::LOCAL_PATH_PROVISIONER)
            .await?;
        info!("Local path provisioner installed for the {} volumes", chart);

        let timeout = self
            .helm
            .timeout_flag(Duration::from_secs(elasticsearch::INSTALL_TIMEOUT_SECS));
        Ok(args(["--wait", timeout.as_str(), "--values", elasticsearch::KIND_VALUES]))
    }

    /// Delete the scenario's release; failures are logged so teardown never
    /// changes a scenario's result.
    pub async fn delete_chart(&self, ctx: &mut TestContext) {
        if ctx.name.is_empty() {
            return;
        }

        if let Err(e) = self.helm.delete_chart(&ctx.name).await {
            error!("Could not delete chart {}: {}", ctx.name, e);
        }
        ctx.reset();
    }

    /// The RBAC resource of `kind` exists and carries a chart label
    #[instrument(skip(self, ctx), fields(chart = %ctx.name))]
    pub async fn resource_manages_rbac(&self, ctx: &TestContext, kind: &str) -> Result<()> {
        let chart = ctx.chart()?;
        let resource = ResourceDescriptor::named(kind, &derive_resource_name(kind, chart)?);

        let output = self.kubectl.run(&resource.get_args(CHART_LABEL)).await?;
        if output.trim_matches('\'').is_empty() {
            return Err(AssertionFailure::new(
                format!("There is no chart label on the {} for the {} chart", kind, chart),
                "a non-empty chart label",
                output,
                resource.to_string(),
            )
            .into());
        }

        debug!(output = %output, "A {} resource manages K8S RBAC", kind);
        Ok(())
    }

    /// The chart's DaemonSet is labelled with the chart under test
    #[instrument(skip(self, ctx), fields(chart = %ctx.name))]
    pub async fn pods_managed_by_daemonset(&self, ctx: &TestContext) -> Result<()> {
        let chart = ctx.chart()?;
        let resource = ResourceDescriptor::selected("DaemonSet", &app_selector(chart))
            .in_namespace(DEFAULT_NAMESPACE);

        let output = self
            .kubectl
            .run(&resource.get_args("jsonpath='{.items[0].metadata.labels.chart}'"))
            .await?;
        expect_equal("DaemonSet chart label mismatch", &ctx.full_name()?, &output, &resource)?;

        debug!("A pod will be deployed on each node of the cluster by a DaemonSet");
        Ok(())
    }

    /// The `<chart>-<chart>-metrics` resource is labelled with the chart under test
    #[instrument(skip(self, ctx), fields(chart = %ctx.name))]
    pub async fn resource_manages_additional_pods_for_metricsets(
        &self,
        ctx: &TestContext,
        kind: &str,
    ) -> Result<()> {
        let chart = ctx.chart()?;
        let resource = ResourceDescriptor::named(kind, &metrics_resource_name(chart));

        let output = self.kubectl.run(&resource.get_args(CHART_LABEL)).await?;
        expect_equal(
            &format!("{} chart label mismatch", kind),
            &ctx.full_name()?,
            &output,
            &resource,
        )?;

        debug!(
            "A {} will manage additional pods for metricsets querying internal services",
            kind
        );
        Ok(())
    }

    /// The kube-state-metrics dependency is deployed under the chart's name.
    ///
    /// The Deployment name always comes from the chart under test; `dependency`
    /// is the name used in the step sentence and only appears in logs.
    #[instrument(skip(self, ctx), fields(chart = %ctx.name))]
    pub async fn retrieves_specific_metrics(&self, ctx: &TestContext, dependency: &str) -> Result<()> {
        let chart = ctx.chart()?;
        let resource =
            ResourceDescriptor::named("Deployment", &kube_state_metrics_deployment(chart));

        let output = self
            .kubectl
            .run(&resource.get_args("jsonpath='{.metadata.name}'"))
            .await?;
        expect_equal(
            "kube-state-metrics Deployment name mismatch",
            &get_kube_state_metrics_name(chart),
            &output,
            &resource,
        )?;

        debug!("A {} chart will retrieve specific Kubernetes metrics", dependency);
        Ok(())
    }

    /// The resource of `kind` has a non-empty `data` entry for `key`
    #[instrument(skip(self, ctx), fields(chart = %ctx.name))]
    pub async fn resource_contains_key(&self, ctx: &TestContext, kind: &str, key: &str) -> Result<()> {
        let chart = ctx.chart()?;
        let resource = ResourceDescriptor::named(kind, &derive_resource_name(kind, chart)?);
        let template = format!("jsonpath={{.data['{}']}}", escape_jsonpath_key(key));

        let output = self.kubectl.run(&resource.get_args(&template)).await?;
        if output.is_empty() {
            return Err(AssertionFailure::new(
                format!("There is no {} key in the {} for the {} chart", key, kind, chart),
                format!("a value for {}", key),
                "",
                resource.to_string(),
            )
            .into());
        }

        debug!("A {} resource contains the {} key", kind, key);
        Ok(())
    }

    /// The first container of the chart's first pod mounts `name` at `mount_path`
    #[instrument(skip(self, ctx), fields(chart = %ctx.name))]
    pub async fn volume_mounted(
        &self,
        ctx: &TestContext,
        name: &str,
        mount_path: &str,
        sub_path: &SubPathCheck,
    ) -> Result<()> {
        let selector = app_selector(ctx.chart()?);
        let resource = ResourceDescriptor::selected("pods", &selector).to_string();

        let names = self.mount_column(&selector, "name").await?;
        let mount_paths = self.mount_column(&selector, "mountPath").await?;
        let sub_paths = self.mount_column(&selector, "subPath").await?;

        let mounts = VolumeMounts::new(names, mount_paths, sub_paths, &resource)?;
        mounts.verify(name, mount_path, sub_path, &resource)?;

        debug!(
            name = %name,
            mount_path = %mount_path,
            sub_path = ?sub_path,
            "The volume mount was found"
        );
        Ok(())
    }

    async fn mount_column(&self, selector: &str, field: &str) -> Result<Vec<String>> {
        self.kubectl
            .get_column("pods", selector, FIRST_CONTAINER_MOUNTS, field)
            .await
    }

    /// At least `min` resources of `kind` match `selector`
    pub async fn check_resources(&self, kind: &str, selector: &str, min: usize) -> Result<ResourceList> {
        let resources = self.kubectl.get_resources_by_selector(kind, selector).await?;
        require_minimum(&resources, min, &ResourceDescriptor::selected(kind, selector))?;

        debug!(
            "Checking for {} {} with selector {}: found {:?}",
            min,
            kind,
            selector,
            resources.names()
        );
        Ok(resources)
    }

    /// Resources of `kind` exist for the pods of the chart's Deployment
    #[instrument(skip(self, ctx), fields(chart = %ctx.name))]
    pub async fn resource_manages_pods(&self, ctx: &TestContext, kind: &str) -> Result<()> {
        let chart = ctx.chart()?;
        let selector = self
            .kubectl
            .get_resource_selector("deployment", &app_name(chart))
            .await?;

        self.check_resources(kind, &selector, 1).await?;
        Ok(())
    }

    /// A resource of `kind` exposes the chart's Deployment pods through endpoints
    #[instrument(skip(self, ctx), fields(chart = %ctx.name))]
    pub async fn resource_exposes_pods(&self, ctx: &TestContext, kind: &str) -> Result<()> {
        let chart = ctx.chart()?;
        let selector = self
            .kubectl
            .get_resource_selector("deployment", &app_name(chart))
            .await?;

        let description = self.kubectl.describe(kind, &selector).await?;
        let endpoints = parse_endpoints(description.field("Endpoints")?);
        if endpoints.is_empty() {
            return Err(AssertionFailure::new(
                format!("There are no endpoints for the {}", kind),
                "at least one endpoint",
                "none",
                ResourceDescriptor::selected(kind, &selector).to_string(),
            )
            .into());
        }

        debug!("The {} exposes endpoints {:?}", kind, endpoints);
        Ok(())
    }
}

fn expect_equal(message: &str, expected: &str, actual: &str, resource: &ResourceDescriptor) -> Result<()> {
    if expected != actual {
        return Err(AssertionFailure::new(message, expected, actual, resource.to_string()).into());
    }
    Ok(())
}

/// Fail when fewer than `min` resources were found
pub fn require_minimum(
    resources: &ResourceList,
    min: usize,
    resource: &ResourceDescriptor,
) -> std::result::Result<(), AssertionFailure> {
    if resources.len() < min {
        return Err(AssertionFailure::new(
            format!("Not enough {} found", resource.kind),
            format!("at least {}", min),
            resources.len().to_string(),
            resource.to_string(),
        ));
    }
    Ok(())
}

/// Addresses from a describe `Endpoints` field; `<none>` means there are none
pub fn parse_endpoints(field: &str) -> Vec<&str> {
    field
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty() && *e != "<none>")
        .collect()
}
