// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource names the Elastic charts assign at install time

use crate::error::{Result, VerifierError};
use crate::shell::args;
use std::fmt;

/// Name of an RBAC or config resource created by `chart`
pub fn derive_resource_name(kind: &str, chart: &str) -> Result<String> {
    let app = app_name(chart);
    let name = match kind {
        "ClusterRole" => format!("{}-cluster-role", app),
        "ClusterRoleBinding" => format!("{}-cluster-role-binding", app),
        "ConfigMap" => format!("{}-config", app),
        "ServiceAccount" => app,
        other => return Err(VerifierError::UnknownResourceKind(other.to_string())),
    };
    Ok(name)
}

/// `<chart>-<chart>`, the name of the chart's main workload
pub fn app_name(chart: &str) -> String {
    format!("{}-{}", chart, chart).to_lowercase()
}

pub fn app_selector(chart: &str) -> String {
    format!("app={}", app_name(chart))
}

/// Workload running the metricsets that query cluster-wide services
pub fn metrics_resource_name(chart: &str) -> String {
    format!("{}-metrics", app_name(chart))
}

pub fn kube_state_metrics_deployment(chart: &str) -> String {
    format!("{}-kube-state-metrics", chart).to_lowercase()
}

/// The chart label value, lowercased and single-quoted as jsonpath prints it
pub fn get_full_name(chart: &str, version: &str) -> String {
    quoted(&format!("{}-{}", chart, version))
}

/// The kube-state-metrics deployment name, lowercased and single-quoted
pub fn get_kube_state_metrics_name(chart: &str) -> String {
    quoted(&kube_state_metrics_deployment(chart))
}

fn quoted(value: &str) -> String {
    format!("'{}'", value.to_lowercase())
}

/// Escape dots so a key such as `metricbeat.yml` is read as one map key
pub fn escape_jsonpath_key(key: &str) -> String {
    key.replace('.', r"\.")
}

/// Addresses one object by name or a group of objects by selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub kind: String,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub selector: Option<String>,
}

impl ResourceDescriptor {
    pub fn named(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_lowercase(),
            name: Some(name.to_string()),
            namespace: None,
            selector: None,
        }
    }

    pub fn selected(kind: &str, selector: &str) -> Self {
        Self {
            kind: kind.to_lowercase(),
            name: None,
            namespace: None,
            selector: Some(selector.to_string()),
        }
    }

    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// `kubectl get` arguments reading `template` from this resource
    pub fn get_args(&self, template: &str) -> Vec<String> {
        let mut arguments = args(["get", self.kind.as_str()]);
        if let Some(name) = &self.name {
            arguments.push(name.clone());
        }
        if let Some(namespace) = &self.namespace {
            arguments.push(format!("--namespace={}", namespace));
        }
        if let Some(selector) = &self.selector {
            arguments.extend(args(["-l", selector.as_str()]));
        }
        arguments.extend(args(["-o", template]));
        arguments
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(name) = &self.name {
            write!(f, "/{}", name)?;
        }
        if let Some(selector) = &self.selector {
            write!(f, " with selector {}", selector)?;
        }
        if let Some(namespace) = &self.namespace {
            write!(f, " in namespace {}", namespace)?;
        }
        Ok(())
    }
}
