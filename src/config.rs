// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use std::env;

/// Suite configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Helm major version selector, e.g. "2.x" or "3.1.0"
    pub helm_version: String,
    /// Version of the charts under test
    pub chart_version: String,
    /// Kubernetes version of the kind node image
    pub kubernetes_version: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Config {
            helm_version: value("HELM_VERSION", defaults::HELM_VERSION),
            chart_version: value("HELM_CHART_VERSION", defaults::CHART_VERSION),
            kubernetes_version: value("KUBERNETES_VERSION", defaults::KUBERNETES_VERSION),
        }
    }
}
