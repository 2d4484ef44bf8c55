// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Structured cluster queries through the kubectl binary

use crate::constants::{binaries, WORKING_DIR};
use crate::error::Result;
use crate::kubernetes::output::{Description, ResourceList};
use crate::kubernetes::selector::selector_from_resource;
use crate::shell::{args, Executor};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct Kubectl {
    executor: Arc<dyn Executor>,
}

impl Kubectl {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Run an arbitrary kubectl subcommand, returning the trimmed output
    pub async fn run(&self, arguments: &[String]) -> Result<String> {
        let output = self.run_raw(arguments).await?;
        Ok(output.trim().to_string())
    }

    async fn run_raw(&self, arguments: &[String]) -> Result<String> {
        self.executor
            .execute(WORKING_DIR, binaries::KUBECTL, arguments)
            .await
    }

    /// List resources of `kind` matching `selector`
    #[instrument(skip(self))]
    pub async fn get_resources_by_selector(&self, kind: &str, selector: &str) -> Result<ResourceList> {
        let output = self
            .run_raw(&args(["get", kind, "--selector", selector, "-o", "json"]))
            .await?;

        let list = ResourceList::parse(&output)?;
        debug!("Found {} {} with selector {}", list.len(), kind, selector);
        Ok(list)
    }

    /// Selector that addresses the objects managed by the named resource
    #[instrument(skip(self))]
    pub async fn get_resource_selector(&self, kind: &str, name: &str) -> Result<String> {
        let output = self.run_raw(&args(["get", kind, name, "-o", "json"])).await?;
        let selector = selector_from_resource(&output)?;

        debug!("Selector for {}/{} is {}", kind, name, selector);
        Ok(selector)
    }

    /// Describe the first resource of `kind` matching `selector`
    #[instrument(skip(self))]
    pub async fn describe(&self, kind: &str, selector: &str) -> Result<Description> {
        let output = self
            .run_raw(&args(["describe", kind, "--selector", selector]))
            .await?;

        Ok(Description::parse(&output))
    }

    /// Read `field` of every element under `range_path` of the first matching
    /// object, one value per element.
    ///
    /// Elements lacking the field yield an empty string so the result stays
    /// positionally aligned with other columns of the same range.
    #[instrument(skip(self))]
    pub async fn get_column(
        &self,
        kind: &str,
        selector: &str,
        range_path: &str,
        field: &str,
    ) -> Result<Vec<String>> {
        let template = format!(r#"jsonpath={{range {}}}{{.{}}}{{"\n"}}{{end}}"#, range_path, field);
        let output = self
            .run_raw(&args(["get", kind, "-l", selector, "-o", template.as_str()]))
            .await?;

        Ok(output.lines().map(str::to_string).collect())
    }

    /// Apply a manifest from a path or URL
    #[instrument(skip(self))]
    pub async fn apply(&self, manifest: &str) -> Result<()> {
        let output = self.run(&args(["apply", "-f", manifest])).await?;
        info!("Applied {}: {}", manifest, output);
        Ok(())
    }
}
