// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// External binaries driven as subprocesses
pub mod binaries {
    pub const KIND: &str = "kind";
    pub const KUBECTL: &str = "kubectl";
    pub const HELM: &str = "helm";
}

/// Working directory every external command runs in
pub const WORKING_DIR: &str = ".";

/// Name of the ephemeral kind cluster
pub const CLUSTER_NAME: &str = "helm-charts-test-suite";

/// Node image repository; the Kubernetes version is appended as `:v<version>`
pub const KIND_NODE_IMAGE: &str = "kindest/node";

/// Defaults used when the corresponding environment variable is not set
pub mod defaults {
    pub const HELM_VERSION: &str = "2.x";
    pub const CHART_VERSION: &str = "7.6.1";
    pub const KUBERNETES_VERSION: &str = "1.15.3";
}

/// Chart repository the charts under test are installed from
pub mod repo {
    pub const NAME: &str = "elastic";
    pub const URL: &str = "https://helm.elastic.co";
}

/// Charts installed before any scenario runs
pub const RUNTIME_DEPENDENCIES: &[&str] = &["elasticsearch"];

/// Elasticsearch needs a storage class on kind
pub mod elasticsearch {
    pub const CHART: &str = "elasticsearch";
    pub const LOCAL_PATH_PROVISIONER: &str = "https://raw.githubusercontent.com/rancher/local-path-provisioner/master/deploy/local-path-storage.yaml";
    pub const KIND_VALUES: &str = "https://raw.githubusercontent.com/elastic/helm-charts/master/elasticsearch/examples/kubernetes-kind/values.yaml";
    pub const INSTALL_TIMEOUT_SECS: u64 = 900;
}

pub const DEFAULT_NAMESPACE: &str = "default";
