// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Step sentences and the suite procedures they call

use crate::error::{Result, VerifierError};
use crate::suite::context::TestContext;
use crate::suite::mounts::SubPathCheck;
use crate::suite::Suite;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A parameter in a step sentence, in matching double or single quotes.
/// Each parameter takes two capture groups, one per quote style.
const QUOTED: &str = r#"(?:"([^"]*)"|'([^']*)')"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    ClusterIsRunning,
    ChartIsInstalled { chart: String },
    PodsManagedByDaemonSet,
    ManagesAdditionalPodsForMetricsets { resource: String },
    RetrievesKubernetesMetrics { chart: String },
    ResourceContainsKey { resource: String, key: String },
    ResourceManagesRbac { resource: String },
    VolumeMounted {
        volume: String,
        mount_path: String,
        sub_path: SubPathCheck,
    },
    ManagesPods { resource: String },
    ExposesPods { resource: String },
}

type StepBuilder = fn(&Captures<'_>) -> Step;

fn pattern(sentence: &str, build: StepBuilder) -> (Regex, StepBuilder) {
    let expression = format!("^{}$", sentence.replace("{}", QUOTED));
    let regex = Regex::new(&expression).expect("step patterns are valid regular expressions");
    (regex, build)
}

/// The `parameter`-th quoted parameter, counting from 1
fn capture(captures: &Captures<'_>, parameter: usize) -> String {
    let double = 2 * parameter - 1;
    captures
        .get(double)
        .or_else(|| captures.get(double + 1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

static STEPS: Lazy<Vec<(Regex, StepBuilder)>> = Lazy::new(|| {
    vec![
        pattern("a cluster is running", |_| Step::ClusterIsRunning),
        pattern("the {} Elastic's helm chart is installed", |c| {
            Step::ChartIsInstalled {
                chart: capture(c, 1),
            }
        }),
        pattern(
            "a pod will be deployed on each node of the cluster by a DaemonSet",
            |_| Step::PodsManagedByDaemonSet,
        ),
        pattern(
            "a {} will manage additional pods for metricsets querying internal services",
            |c| Step::ManagesAdditionalPodsForMetricsets {
                resource: capture(c, 1),
            },
        ),
        pattern("a {} chart will retrieve specific Kubernetes metrics", |c| {
            Step::RetrievesKubernetesMetrics {
                chart: capture(c, 1),
            }
        }),
        pattern("a {} resource contains the {} key", |c| {
            Step::ResourceContainsKey {
                resource: capture(c, 1),
                key: capture(c, 2),
            }
        }),
        pattern("a {} resource manages RBAC", |c| Step::ResourceManagesRbac {
            resource: capture(c, 1),
        }),
        pattern("the {} volume is mounted at {} with subpath {}", |c| {
            Step::VolumeMounted {
                volume: capture(c, 1),
                mount_path: capture(c, 2),
                sub_path: SubPathCheck::expecting(&capture(c, 3)),
            }
        }),
        pattern("the {} volume is mounted at {} with no subpath", |c| {
            Step::VolumeMounted {
                volume: capture(c, 1),
                mount_path: capture(c, 2),
                sub_path: SubPathCheck::Absent,
            }
        }),
        pattern("a {} which will manage the pods", |c| Step::ManagesPods {
            resource: capture(c, 1),
        }),
        pattern(
            "a {} which will expose the pods as network services internal to the k8s cluster",
            |c| Step::ExposesPods {
                resource: capture(c, 1),
            },
        ),
    ]
});

impl Step {
    /// Match a sentence, without its Given/When/Then keyword, to a step
    pub fn parse(sentence: &str) -> Result<Self> {
        let sentence = sentence.trim();

        STEPS
            .iter()
            .find_map(|(regex, build)| regex.captures(sentence).map(|c| build(&c)))
            .ok_or_else(|| VerifierError::UndefinedStep(sentence.to_string()))
    }

    pub async fn run(&self, suite: &Suite, ctx: &mut TestContext) -> Result<()> {
        let verifier = suite.verifier();

        match self {
            Step::ClusterIsRunning => suite.a_cluster_is_running().await,
            Step::ChartIsInstalled { chart } => verifier.install(ctx, chart).await,
            Step::PodsManagedByDaemonSet => verifier.pods_managed_by_daemonset(ctx).await,
            Step::ManagesAdditionalPodsForMetricsets { resource } => {
                verifier
                    .resource_manages_additional_pods_for_metricsets(ctx, resource)
                    .await
            }
            Step::RetrievesKubernetesMetrics { chart } => {
                verifier.retrieves_specific_metrics(ctx, chart).await
            }
            Step::ResourceContainsKey { resource, key } => {
                verifier.resource_contains_key(ctx, resource, key).await
            }
            Step::ResourceManagesRbac { resource } => {
                verifier.resource_manages_rbac(ctx, resource).await
            }
            Step::VolumeMounted {
                volume,
                mount_path,
                sub_path,
            } => {
                verifier
                    .volume_mounted(ctx, volume, mount_path, sub_path)
                    .await
            }
            Step::ManagesPods { resource } => verifier.resource_manages_pods(ctx, resource).await,
            Step::ExposesPods { resource } => verifier.resource_exposes_pods(ctx, resource).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cluster_is_running() {
        assert_eq!(Step::parse("a cluster is running").unwrap(), Step::ClusterIsRunning);
    }

    #[test]
    fn test_parse_chart_installed() {
        assert_eq!(
            Step::parse(r#"the "metricbeat" Elastic's helm chart is installed"#).unwrap(),
            Step::ChartIsInstalled {
                chart: "metricbeat".to_string()
            }
        );
    }

    #[test]
    fn test_parse_accepts_single_quotes() {
        assert_eq!(
            Step::parse("a 'ConfigMap' resource contains the 'kube-state-metrics-metricbeat.yml' key")
                .unwrap(),
            Step::ResourceContainsKey {
                resource: "ConfigMap".to_string(),
                key: "kube-state-metrics-metricbeat.yml".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_volume_with_subpath() {
        assert_eq!(
            Step::parse(r#"the "config" volume is mounted at "/usr/share/metricbeat/metricbeat.yml" with subpath "metricbeat.yml""#)
                .unwrap(),
            Step::VolumeMounted {
                volume: "config".to_string(),
                mount_path: "/usr/share/metricbeat/metricbeat.yml".to_string(),
                sub_path: SubPathCheck::Equals("metricbeat.yml".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_volume_with_empty_subpath_checks_absence() {
        let step = Step::parse(r#"the "data" volume is mounted at "/usr/share/data" with subpath """#).unwrap();
        assert!(matches!(step, Step::VolumeMounted { sub_path: SubPathCheck::Absent, .. }));
    }

    #[test]
    fn test_parse_volume_with_no_subpath() {
        let step = Step::parse(r#"the "data" volume is mounted at "/usr/share/metricbeat/data" with no subpath"#)
            .unwrap();
        assert_eq!(
            step,
            Step::VolumeMounted {
                volume: "data".to_string(),
                mount_path: "/usr/share/metricbeat/data".to_string(),
                sub_path: SubPathCheck::Absent,
            }
        );
    }

    #[test]
    fn test_parse_service_discovery_steps() {
        assert_eq!(
            Step::parse(r#"a "Deployment" which will manage the pods"#).unwrap(),
            Step::ManagesPods {
                resource: "Deployment".to_string()
            }
        );
        assert_eq!(
            Step::parse(r#"a "Service" which will expose the pods as network services internal to the k8s cluster"#)
                .unwrap(),
            Step::ExposesPods {
                resource: "Service".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rbac_and_metricsets() {
        assert_eq!(
            Step::parse(r#"a "ClusterRole" resource manages RBAC"#).unwrap(),
            Step::ResourceManagesRbac {
                resource: "ClusterRole".to_string()
            }
        );
        assert_eq!(
            Step::parse(r#"a "Deployment" will manage additional pods for metricsets querying internal services"#)
                .unwrap(),
            Step::ManagesAdditionalPodsForMetricsets {
                resource: "Deployment".to_string()
            }
        );
        assert_eq!(
            Step::parse(r#"a "kube-state-metrics" chart will retrieve specific Kubernetes metrics"#)
                .unwrap(),
            Step::RetrievesKubernetesMetrics {
                chart: "kube-state-metrics".to_string()
            }
        );
    }

    #[test]
    fn test_parse_apostrophe_inside_double_quotes() {
        assert_eq!(
            Step::parse(r#"a "ConfigMap" resource contains the "user's.yml" key"#).unwrap(),
            Step::ResourceContainsKey {
                resource: "ConfigMap".to_string(),
                key: "user's.yml".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_mixed_quote_styles() {
        assert_eq!(
            Step::parse(r#"a 'ConfigMap' resource contains the "metricbeat.yml" key"#).unwrap(),
            Step::ResourceContainsKey {
                resource: "ConfigMap".to_string(),
                key: "metricbeat.yml".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_mismatched_quotes() {
        let err = Step::parse(r#"a "ClusterRole' resource manages RBAC"#).unwrap_err();
        assert!(matches!(err, VerifierError::UndefinedStep(_)));
    }

    #[test]
    fn test_step_patterns_compile() {
        assert_eq!(STEPS.len(), 11);
        for (regex, _) in STEPS.iter() {
            assert!(regex.as_str().starts_with('^') && regex.as_str().ends_with('$'));
        }
    }

    #[test]
    fn test_parse_undefined_step() {
        let err = Step::parse("the moon is made of cheese").unwrap_err();
        assert!(matches!(err, VerifierError::UndefinedStep(ref s) if s == "the moon is made of cheese"));
    }

    #[test]
    fn test_parse_is_anchored() {
        assert!(Step::parse("a cluster is running somewhere else").is_err());
    }
}
