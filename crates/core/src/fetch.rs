//! Purpose: Provider-specific resource fetching for one cluster.
//! Responsibilities: Fetch control-plane nodes, node pools and their provider siblings.
//! Non-scope: Does not compute capacity; callers decide degradation through [`degrade`].
//! Invariants/Assumptions: Every helper returns a [`FetchError`] instead of panicking.

use futures::future::join_all;
use happa_client::models::{
    AWSControlPlane, AWSMachineDeployment, AWSMachinePool, AWSMachineTemplate, AzureMachine,
    AzureMachinePool, Cluster, G8sControlPlane, GCPMachineTemplate, KubeadmControlPlane,
    MachineDeployment, MachinePool, ObjectReference,
};
use happa_client::{HappaClient, LabelSelector, ListOptions};
use happa_config::Provider;
use tracing::debug;

use crate::error::{Degradation, FetchError};
use crate::labels;
use crate::provider::{ControlPlaneNode, NodePool, ProviderNodePool, compare_node_pools};
use crate::reporter::{ErrorReporter, ReportedError};

const DEFAULT_NAMESPACE: &str = "default";

pub(crate) fn cluster_namespace(cluster: &Cluster) -> &str {
    cluster
        .metadata
        .namespace
        .as_deref()
        .unwrap_or(DEFAULT_NAMESPACE)
}

/// Label that ties provider objects to their cluster.
fn cluster_label(provider: Provider) -> &'static str {
    match provider {
        Provider::Aws => labels::GIANTSWARM_CLUSTER,
        Provider::Azure | Provider::Capa | Provider::Gcp => labels::CLUSTER_NAME,
    }
}

fn cluster_list_options(cluster: &Cluster, provider: Provider) -> ListOptions {
    ListOptions::in_namespace(cluster_namespace(cluster)).with_selector(
        LabelSelector::new().eq(cluster_label(provider), cluster.metadata.name_or_default()),
    )
}

fn reference_name<'a>(
    reference: Option<&'a ObjectReference>,
    kind: &'static str,
    name: &str,
    what: &'static str,
) -> Result<&'a str, FetchError> {
    reference
        .and_then(|r| r.name.as_deref())
        .ok_or_else(|| FetchError::MissingReference {
            kind,
            name: name.to_string(),
            reference: what,
        })
}

/// Turn a failed fetch into an unknown value, reporting it unless it is
/// a not-found.
pub fn degrade<T>(
    reporter: &dyn ErrorReporter,
    context: &str,
    result: Result<T, FetchError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            let degradation = Degradation::of(&e);
            debug!(context, ?degradation, error = %e, "Fetch degraded to unknown");
            if degradation.is_reported() {
                reporter.notify(&ReportedError::fetch(context, &e));
            }
            None
        }
    }
}

/// Control-plane objects of a cluster.
pub async fn fetch_control_plane_nodes(
    client: &HappaClient,
    cluster: &Cluster,
    provider: Provider,
) -> Result<Vec<ControlPlaneNode>, FetchError> {
    match provider {
        Provider::Aws => {
            let options = cluster_list_options(cluster, provider);
            let (control_planes, aws_control_planes) = futures::try_join!(
                client.list::<G8sControlPlane>(&options),
                client.list::<AWSControlPlane>(&options),
            )?;

            Ok(control_planes
                .iter()
                .map(|cp| {
                    let wanted = cp
                        .spec
                        .as_ref()
                        .and_then(|s| s.infrastructure_ref.as_ref())
                        .and_then(|r| r.name.as_deref())
                        .unwrap_or_else(|| cp.metadata.name_or_default());
                    let aws = aws_control_planes
                        .iter()
                        .find(|a| a.metadata.name.as_deref() == Some(wanted));
                    ControlPlaneNode::from_g8s_control_plane(cp, aws)
                })
                .collect())
        }
        Provider::Azure => {
            let options = ListOptions::in_namespace(cluster_namespace(cluster)).with_selector(
                LabelSelector::new()
                    .eq(labels::CLUSTER_NAME, cluster.metadata.name_or_default())
                    .exists(labels::CONTROL_PLANE),
            );
            let machines = client.list::<AzureMachine>(&options).await?;
            Ok(machines.iter().map(ControlPlaneNode::from_azure_machine).collect())
        }
        Provider::Capa | Provider::Gcp => {
            let reference = cluster.control_plane_ref();
            let name = reference_name(
                reference,
                "Cluster",
                cluster.metadata.name_or_default(),
                "control plane",
            )?;
            let kind = reference.and_then(|r| r.kind.as_deref()).unwrap_or_default();
            if kind != "KubeadmControlPlane" {
                return Err(FetchError::Unsupported {
                    what: "control plane",
                    kind: kind.to_string(),
                });
            }

            let namespace = reference
                .and_then(|r| r.namespace.as_deref())
                .unwrap_or_else(|| cluster_namespace(cluster));
            let control_plane = client
                .get::<KubeadmControlPlane>(Some(namespace), name)
                .await?;
            let instance_type =
                fetch_control_plane_instance_type(client, &control_plane, namespace).await?;

            Ok(vec![ControlPlaneNode::from_kubeadm_control_plane(
                &control_plane,
                instance_type.as_deref(),
            )])
        }
    }
}

async fn fetch_control_plane_instance_type(
    client: &HappaClient,
    control_plane: &KubeadmControlPlane,
    namespace: &str,
) -> Result<Option<String>, FetchError> {
    let Some(reference) = control_plane.infrastructure_ref() else {
        return Ok(None);
    };
    let name = reference_name(
        Some(reference),
        "KubeadmControlPlane",
        control_plane.metadata.name_or_default(),
        "machine template",
    )?;

    match reference.kind.as_deref() {
        Some("AWSMachineTemplate") => Ok(client
            .get::<AWSMachineTemplate>(Some(namespace), name)
            .await?
            .instance_type()
            .map(str::to_string)),
        Some("GCPMachineTemplate") => Ok(client
            .get::<GCPMachineTemplate>(Some(namespace), name)
            .await?
            .instance_type()
            .map(str::to_string)),
        other => Err(FetchError::Unsupported {
            what: "machine template",
            kind: other.unwrap_or_default().to_string(),
        }),
    }
}

/// Node pools of a cluster, in display order.
pub async fn fetch_node_pools(
    client: &HappaClient,
    cluster: &Cluster,
    provider: Provider,
) -> Result<Vec<NodePool>, FetchError> {
    let options = cluster_list_options(cluster, provider);
    let mut node_pools: Vec<NodePool> = match provider {
        Provider::Aws | Provider::Gcp => client
            .list::<MachineDeployment>(&options)
            .await?
            .into_iter()
            .map(NodePool::MachineDeployment)
            .collect(),
        Provider::Azure | Provider::Capa => client
            .list::<MachinePool>(&options)
            .await?
            .into_iter()
            .map(NodePool::MachinePool)
            .collect(),
    };

    node_pools.sort_by(compare_node_pools);
    Ok(node_pools)
}

/// One node pool by name, of the kind the provider uses.
pub async fn fetch_node_pool(
    client: &HappaClient,
    namespace: &str,
    name: &str,
    provider: Provider,
) -> Result<NodePool, FetchError> {
    Ok(match provider {
        Provider::Aws | Provider::Gcp => NodePool::MachineDeployment(
            client.get::<MachineDeployment>(Some(namespace), name).await?,
        ),
        Provider::Azure | Provider::Capa => {
            NodePool::MachinePool(client.get::<MachinePool>(Some(namespace), name).await?)
        }
    })
}

/// The provider sibling of one node pool, found through its infrastructure reference.
pub async fn fetch_provider_node_pool(
    client: &HappaClient,
    node_pool: &NodePool,
) -> Result<ProviderNodePool, FetchError> {
    let reference = node_pool.infrastructure_ref();
    let name = reference_name(reference, node_pool.kind(), node_pool.name(), "infrastructure")?;
    let namespace = node_pool.namespace();

    match reference.and_then(|r| r.kind.as_deref()) {
        Some("AWSMachineDeployment") => Ok(ProviderNodePool::AWSMachineDeployment(
            client.get::<AWSMachineDeployment>(namespace, name).await?,
        )),
        Some("AzureMachinePool") => Ok(ProviderNodePool::AzureMachinePool(
            client.get::<AzureMachinePool>(namespace, name).await?,
        )),
        Some("AWSMachinePool") => Ok(ProviderNodePool::AWSMachinePool(
            client.get::<AWSMachinePool>(namespace, name).await?,
        )),
        Some("GCPMachineTemplate") => Ok(ProviderNodePool::GCPMachineTemplate(
            client.get::<GCPMachineTemplate>(namespace, name).await?,
        )),
        other => Err(FetchError::Unsupported {
            what: "provider node pool",
            kind: other.unwrap_or_default().to_string(),
        }),
    }
}

/// Provider siblings of every node pool, fetched concurrently.
///
/// A failed fetch leaves that pool without a sibling; the others are kept.
pub async fn fetch_provider_node_pools(
    client: &HappaClient,
    node_pools: &[NodePool],
    reporter: &dyn ErrorReporter,
) -> Vec<ProviderNodePool> {
    let results = join_all(
        node_pools
            .iter()
            .map(|node_pool| fetch_provider_node_pool(client, node_pool)),
    )
    .await;

    node_pools
        .iter()
        .zip(results)
        .filter_map(|(node_pool, result)| {
            let context = format!("{} {}", node_pool.kind(), node_pool.name());
            degrade(reporter, &context, result)
        })
        .collect()
}
