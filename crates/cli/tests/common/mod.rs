//! Shared test utilities for `happa` integration tests.
//!
//! Invariants / Assumptions:
//! - Commands never load a local `.env` (`DOTENV_DISABLED=1`).
//! - `HAPPA_TOKEN` is "test-token" and the provider is Azure unless overridden.
//! - Requests are not retried, so each mock sees exactly the calls made.

use assert_cmd::Command;

#[allow(unused_imports)]
pub use happa_client::testing::{load_fixture, resource_list, status_body};
#[allow(unused_imports)]
pub use serde_json::{Value, json};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CAPI: &str = "/apis/cluster.x-k8s.io/v1beta1/namespaces/org-acme";
pub const CAPZ: &str = "/apis/infrastructure.cluster.x-k8s.io/v1beta1/namespaces/org-acme";

const AZURE_CAPABILITIES: &str = r#"{
    "Standard_D4s_v3": {"numberOfCores": 4, "memoryInMb": 16000},
    "Standard_D8s_v3": {"numberOfCores": 8, "memoryInMb": 32000}
}"#;

/// Returns a hermetic `happa` command.
pub fn happa_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("happa");

    cmd.env("DOTENV_DISABLED", "1");

    cmd.env("HAPPA_TOKEN", "test-token")
        .env("HAPPA_PROVIDER", "azure")
        .env("HAPPA_MAX_RETRIES", "0")
        .env("HAPPA_AZURE_CAPABILITIES", AZURE_CAPABILITIES);

    cmd.env_remove("HAPPA_BASE_URL")
        .env_remove("HAPPA_SKIP_VERIFY")
        .env_remove("HAPPA_TIMEOUT")
        .env_remove("HAPPA_AWS_CAPABILITIES")
        .env_remove("HAPPA_AWS_CAPABILITIES_FILE")
        .env_remove("HAPPA_AZURE_CAPABILITIES_FILE")
        .env_remove("HAPPA_MIN_NODES_PER_POOL")
        .env_remove("HAPPA_MAX_NODES_PER_POOL")
        .env_remove("HAPPA_CACHE_DISABLED")
        .env_remove("RUST_LOG");

    cmd
}

/// A hermetic `happa` command pointed at `server`.
#[allow(dead_code)]
pub fn happa_cmd_for(server: &MockServer) -> Command {
    let mut cmd = happa_cmd();
    cmd.env("HAPPA_BASE_URL", server.uri());
    cmd
}

#[allow(dead_code)]
pub fn azure_cluster(name: &str, release: &str) -> Value {
    json!({
        "apiVersion": "cluster.x-k8s.io/v1beta1",
        "kind": "Cluster",
        "metadata": {
            "name": name,
            "namespace": "org-acme",
            "labels": {
                "cluster.x-k8s.io/cluster-name": name,
                "giantswarm.io/organization": "acme",
                "release.giantswarm.io/version": release
            }
        },
        "spec": {
            "infrastructureRef": {
                "apiVersion": "infrastructure.cluster.x-k8s.io/v1beta1",
                "kind": "AzureCluster",
                "name": name
            }
        }
    })
}

#[allow(dead_code)]
pub fn azure_machine(name: &str, vm_size: &str) -> Value {
    json!({
        "metadata": {
            "name": name,
            "namespace": "org-acme",
            "labels": {"cluster.x-k8s.io/control-plane": "true"}
        },
        "spec": {"vmSize": vm_size}
    })
}

#[allow(dead_code)]
pub fn machine_pool(name: &str, ready: i64, annotations: Value) -> Value {
    json!({
        "metadata": {
            "name": name,
            "namespace": "org-acme",
            "annotations": annotations
        },
        "spec": {
            "replicas": ready,
            "template": {"spec": {"infrastructureRef": {
                "kind": "AzureMachinePool",
                "name": name
            }}}
        },
        "status": {"replicas": ready, "readyReplicas": ready}
    })
}

#[allow(dead_code)]
pub fn azure_machine_pool(name: &str, vm_size: &str) -> Value {
    json!({
        "metadata": {"name": name, "namespace": "org-acme"},
        "spec": {"template": {"vmSize": vm_size}}
    })
}
