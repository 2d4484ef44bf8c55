// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::config::Config;
use crate::constants::CLUSTER_NAME;
use crate::error::{AssertionFailure, Result};
use crate::suite::naming::get_full_name;

/// State of one verification run, passed into every step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestContext {
    pub cluster_name: String,
    pub kubernetes_version: String,
    /// Chart installed by the current scenario, empty when none is
    pub name: String,
    pub version: String,
}

impl TestContext {
    pub fn new(config: &Config) -> Self {
        Self {
            cluster_name: CLUSTER_NAME.to_string(),
            kubernetes_version: config.kubernetes_version.clone(),
            name: String::new(),
            version: config.chart_version.clone(),
        }
    }

    /// The chart under test; steps that inspect it fail before an install step ran
    pub fn chart(&self) -> Result<&str> {
        if self.name.is_empty() {
            return Err(AssertionFailure::new(
                "No chart has been installed in this scenario",
                "an installed chart",
                "none",
                self.cluster_name.as_str(),
            )
            .into());
        }
        Ok(&self.name)
    }

    pub fn full_name(&self) -> Result<String> {
        Ok(get_full_name(self.chart()?, &self.version))
    }

    /// Forget the chart of the finished scenario
    pub fn reset(&mut self) {
        self.name.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_context() -> TestContext {
        TestContext::new(&Config {
            helm_version: "3.x".to_string(),
            chart_version: "7.6.1".to_string(),
            kubernetes_version: "1.15.3".to_string(),
        })
    }

    #[test]
    fn test_new_context_has_no_chart() {
        let ctx = make_context();

        assert_eq!(ctx.cluster_name, "helm-charts-test-suite");
        assert!(ctx.chart().is_err());
    }

    #[test]
    fn test_full_name() {
        let mut ctx = make_context();
        ctx.name = "Metricbeat".to_string();

        assert_eq!(ctx.full_name().unwrap(), "'metricbeat-7.6.1'");
    }

    #[test]
    fn test_reset_keeps_run_settings() {
        let mut ctx = make_context();
        ctx.name = "metricbeat".to_string();

        ctx.reset();

        assert!(ctx.name.is_empty());
        assert_eq!(ctx.version, "7.6.1");
        assert_eq!(ctx.kubernetes_version, "1.15.3");
    }
}
