//! Common helpers for aggregation integration tests.
//!
//! # Invariants
//! - Every test gets its own `MockServer`; unmatched requests answer 404
//! - Clients never retry, so each mock sees exactly the calls made

use std::sync::Arc;

#[allow(unused_imports)]
pub use happa_client::testing::{load_fixture, resource_list, status_body};
#[allow(unused_imports)]
pub use happa_client::{HappaClient, ResponseCache};
#[allow(unused_imports)]
pub use happa_config::Provider;
#[allow(unused_imports)]
pub use happa_core::machine_types::{MachineTypeCatalog, MachineTypeProperties};
#[allow(unused_imports)]
pub use happa_core::reporter::{RecordingReporter, ReportedError};
#[allow(unused_imports)]
pub use happa_core::summary::SummaryContext;
#[allow(unused_imports)]
pub use serde_json::{Value, json};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GB: u64 = 1_000_000_000;

pub const CAPI: &str = "/apis/cluster.x-k8s.io/v1beta1/namespaces/org-acme";
pub const CAPZ: &str = "/apis/infrastructure.cluster.x-k8s.io/v1beta1/namespaces/org-acme";

#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> HappaClient {
    HappaClient::builder()
        .base_url(server.uri())
        .token(secrecy::SecretString::from("test-token"))
        .max_retries(0)
        .cache(ResponseCache::with_capacity(100))
        .build()
        .expect("client builds")
}

#[allow(dead_code)]
pub fn azure_catalog() -> MachineTypeCatalog {
    MachineTypeCatalog::empty()
        .with_type(
            "Standard_D4s_v3",
            MachineTypeProperties {
                cpu: 4,
                memory: 16 * GB,
            },
        )
        .with_type(
            "Standard_D8s_v3",
            MachineTypeProperties {
                cpu: 8,
                memory: 32 * GB,
            },
        )
}

/// A context over the mock server plus the reporter it notifies.
#[allow(dead_code)]
pub fn context_for(server: &MockServer) -> (SummaryContext, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::new());
    let ctx = SummaryContext::new(
        Arc::new(client_for(server)),
        Arc::new(azure_catalog()),
        Provider::Azure,
        reporter.clone(),
    );
    (ctx, reporter)
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
