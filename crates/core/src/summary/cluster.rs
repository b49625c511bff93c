//! Purpose: Node counts, CPU and memory of clusters.
//! Responsibilities: Compute one cluster's summary, merge summaries and fetch their inputs.
//! Non-scope: Does not summarize releases or apps.
//! Invariants/Assumptions: `None` is unknown; merging adds present values only.

use futures::future::join_all;
use happa_client::models::Cluster;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::fetch::{
    cluster_namespace, degrade, fetch_control_plane_nodes, fetch_node_pools,
    fetch_provider_node_pools,
};
use crate::machine_types::{MachineTypeCatalog, MachineTypeProperties};
use crate::permissions::PermissionSnapshot;
use crate::provider::{
    ControlPlaneNode, NodePoolWithProvider, map_node_pools_to_provider_node_pools,
    provider_for_cluster,
};
use crate::reporter::{ErrorReporter, ReportedError};
use crate::summary::{SummaryContext, fetch_clusters};

/// Capacity rollup of one or more clusters.
///
/// `None` means unknown: not permitted, not fetched, or not computable.
/// It is never the same as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// Control-plane nodes.
    pub nodes_count: Option<u64>,
    #[serde(rename = "nodesCPU")]
    pub nodes_cpu: Option<u64>,
    /// Control-plane memory in bytes.
    pub nodes_memory: Option<u64>,
    /// Ready worker nodes.
    pub worker_nodes_count: Option<u64>,
    #[serde(rename = "workerNodesCPU")]
    pub worker_nodes_cpu: Option<u64>,
    /// Worker memory in bytes.
    pub worker_nodes_memory: Option<u64>,
}

/// Everything [`compute_cluster_summary`] needs about one cluster.
#[derive(Debug, Clone)]
pub struct ClusterSummaryInput<'a> {
    pub cluster: &'a Cluster,
    /// `None` when not permitted or the fetch failed.
    pub control_plane_nodes: Option<Vec<ControlPlaneNode>>,
    /// `None` when not permitted or the fetch failed.
    pub node_pools: Option<Vec<NodePoolWithProvider>>,
    pub permissions: PermissionSnapshot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Capacity {
    cpu: u64,
    memory: u64,
}

impl Capacity {
    fn add(&mut self, properties: &MachineTypeProperties, nodes: u64) {
        self.cpu = self
            .cpu
            .saturating_add(u64::from(properties.cpu).saturating_mul(nodes));
        self.memory = self
            .memory
            .saturating_add(properties.memory.saturating_mul(nodes));
    }
}

fn cluster_context(cluster: &Cluster) -> String {
    format!(
        "cluster {}/{}",
        cluster_namespace(cluster),
        cluster.metadata.name_or_default()
    )
}

/// Resolve a machine type, reporting a miss.
fn resolve<'c>(
    catalog: &'c MachineTypeCatalog,
    machine_type: Option<&str>,
    context: &str,
    reporter: &dyn ErrorReporter,
) -> Option<&'c MachineTypeProperties> {
    let Some(machine_type) = machine_type else {
        reporter.notify(&ReportedError::MissingMachineType {
            context: context.to_string(),
        });
        return None;
    };

    match catalog.lookup(machine_type) {
        Ok(properties) => Some(properties),
        Err(e) => {
            debug!(context, error = %e, "Capacity unavailable");
            reporter.notify(&ReportedError::InvalidMachineType {
                context: context.to_string(),
                machine_type: machine_type.to_string(),
            });
            None
        }
    }
}

/// Control-plane capacity. The first failing node stops the rollup, so a
/// cluster is reported at most once.
fn control_plane_capacity(
    nodes: &[ControlPlaneNode],
    catalog: &MachineTypeCatalog,
    context: &str,
    reporter: &dyn ErrorReporter,
) -> Option<Capacity> {
    let fallback = nodes.iter().find_map(ControlPlaneNode::instance_type);
    let mut total = Capacity::default();

    for node in nodes.iter().filter(|n| n.node_count() > 0) {
        let machine_type = node.instance_type().or(fallback);
        let properties = resolve(catalog, machine_type, context, reporter)?;
        total.add(properties, node.node_count());
    }

    Some(total)
}

fn ready_nodes(pool: &NodePoolWithProvider) -> u64 {
    pool.node_pool
        .ready_replicas()
        .and_then(|r| u64::try_from(r).ok())
        .unwrap_or(0)
}

/// Worker capacity of pools with a provider counterpart and ready nodes.
fn worker_capacity(
    pools: &[NodePoolWithProvider],
    catalog: &MachineTypeCatalog,
    context: &str,
    reporter: &dyn ErrorReporter,
) -> Option<Capacity> {
    let mut total = Capacity::default();

    for pool in pools {
        let ready = ready_nodes(pool);
        let Some(provider_pool) = &pool.provider_node_pool else {
            continue;
        };
        if ready == 0 {
            continue;
        }
        let properties = resolve(
            catalog,
            provider_pool.capacity_instance_type(),
            context,
            reporter,
        )?;
        total.add(properties, ready);
    }

    Some(total)
}

/// Summarize one cluster from already-fetched resources.
///
/// Fields the permission snapshot does not allow listing stay unknown even
/// if data was passed in. Node counts survive unknown machine types; only
/// the CPU and memory fields they feed become unknown.
pub fn compute_cluster_summary(
    input: &ClusterSummaryInput<'_>,
    catalog: &MachineTypeCatalog,
    reporter: &dyn ErrorReporter,
) -> ClusterSummary {
    let mut summary = ClusterSummary::default();
    let context = cluster_context(input.cluster);

    if input.permissions.control_plane_nodes.can_list
        && let Some(nodes) = &input.control_plane_nodes
    {
        summary.nodes_count = Some(nodes.iter().map(ControlPlaneNode::node_count).sum());
        if let Some(capacity) = control_plane_capacity(
            nodes,
            catalog,
            &format!("{context} control plane"),
            reporter,
        ) {
            summary.nodes_cpu = Some(capacity.cpu);
            summary.nodes_memory = Some(capacity.memory);
        }
    }

    if input.permissions.node_pools.can_list
        && let Some(pools) = &input.node_pools
    {
        summary.worker_nodes_count = Some(pools.iter().map(ready_nodes).sum());
        if let Some(capacity) =
            worker_capacity(pools, catalog, &format!("{context} workers"), reporter)
        {
            summary.worker_nodes_cpu = Some(capacity.cpu);
            summary.worker_nodes_memory = Some(capacity.memory);
        }
    }

    summary
}

fn sum_present(values: impl Iterator<Item = Option<u64>>) -> Option<u64> {
    values.flatten().reduce(u64::saturating_add)
}

/// Add up summaries field by field.
///
/// Unknown fields do not take part; a field unknown everywhere stays unknown.
pub fn merge_cluster_summaries(summaries: &[ClusterSummary]) -> ClusterSummary {
    ClusterSummary {
        nodes_count: sum_present(summaries.iter().map(|s| s.nodes_count)),
        nodes_cpu: sum_present(summaries.iter().map(|s| s.nodes_cpu)),
        nodes_memory: sum_present(summaries.iter().map(|s| s.nodes_memory)),
        worker_nodes_count: sum_present(summaries.iter().map(|s| s.worker_nodes_count)),
        worker_nodes_cpu: sum_present(summaries.iter().map(|s| s.worker_nodes_cpu)),
        worker_nodes_memory: sum_present(summaries.iter().map(|s| s.worker_nodes_memory)),
    }
}

/// Fetch what one cluster's summary needs and compute it.
///
/// Control plane and node pools are fetched concurrently and degrade
/// independently.
#[instrument(skip_all, fields(cluster = %cluster.metadata.name_or_default()))]
pub async fn fetch_cluster_summary(ctx: &SummaryContext, cluster: &Cluster) -> ClusterSummary {
    let provider = provider_for_cluster(cluster, ctx.provider);
    let permissions = ctx.permission_snapshot(provider, cluster_namespace(cluster));
    let context = cluster_context(cluster);

    let control_plane = async {
        if !permissions.control_plane_nodes.can_list {
            debug!("Not permitted to list control-plane nodes");
            return None;
        }
        degrade(
            ctx.reporter(),
            &format!("{context} control plane"),
            fetch_control_plane_nodes(&ctx.client, cluster, provider).await,
        )
    };

    let node_pools = async {
        if !permissions.node_pools.can_list {
            debug!("Not permitted to list node pools");
            return None;
        }
        let pools = degrade(
            ctx.reporter(),
            &format!("{context} node pools"),
            fetch_node_pools(&ctx.client, cluster, provider).await,
        )?;
        let provider_pools = fetch_provider_node_pools(&ctx.client, &pools, ctx.reporter()).await;
        Some(map_node_pools_to_provider_node_pools(pools, provider_pools))
    };

    let (control_plane_nodes, node_pools) = futures::join!(control_plane, node_pools);

    compute_cluster_summary(
        &ClusterSummaryInput {
            cluster,
            control_plane_nodes,
            node_pools,
            permissions,
        },
        &ctx.catalog,
        ctx.reporter(),
    )
}

/// Summaries of the given clusters, fetched concurrently, in input order.
pub async fn fetch_cluster_summaries(
    ctx: &SummaryContext,
    clusters: &[Cluster],
) -> Vec<ClusterSummary> {
    join_all(
        clusters
            .iter()
            .map(|cluster| fetch_cluster_summary(ctx, cluster)),
    )
    .await
}

/// Merged summary of every cluster in a namespace.
///
/// Fails only when the cluster list itself cannot be loaded.
pub async fn fetch_clusters_summary(
    ctx: &SummaryContext,
    namespace: &str,
) -> Result<ClusterSummary> {
    let clusters = fetch_clusters(ctx, namespace).await?;
    let summaries = fetch_cluster_summaries(ctx, &clusters).await;
    Ok(merge_cluster_summaries(&summaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{NodePool, ProviderNodePool};
    use crate::reporter::RecordingReporter;
    use happa_client::models::{
        AzureMachinePool, AzureMachinePoolSpec, AzureMachinePoolTemplate, MachinePool,
        MachinePoolStatus, ObjectMeta,
    };

    const GB: u64 = 1_000_000_000;

    fn catalog() -> MachineTypeCatalog {
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

    fn cluster() -> Cluster {
        Cluster {
            metadata: ObjectMeta::named("org-acme", "a1b2c"),
            ..Default::default()
        }
    }

    fn discrete(instance_type: Option<&str>) -> ControlPlaneNode {
        ControlPlaneNode::Discrete {
            name: "a1b2c-control-plane".to_string(),
            instance_type: instance_type.map(str::to_string),
        }
    }

    fn pool(ready: Option<i64>, vm_size: Option<&str>) -> NodePoolWithProvider {
        let node_pool = NodePool::MachinePool(MachinePool {
            metadata: ObjectMeta::named("org-acme", "p1"),
            status: Some(MachinePoolStatus {
                ready_replicas: ready,
                ..Default::default()
            }),
            ..Default::default()
        });
        let provider_node_pool = ProviderNodePool::AzureMachinePool(AzureMachinePool {
            metadata: ObjectMeta::named("org-acme", "p1"),
            spec: Some(AzureMachinePoolSpec {
                template: Some(AzureMachinePoolTemplate {
                    vm_size: vm_size.map(str::to_string),
                }),
            }),
            ..Default::default()
        });
        NodePoolWithProvider {
            node_pool,
            provider_node_pool: Some(provider_node_pool),
        }
    }

    fn input(
        cluster: &Cluster,
        control_plane_nodes: Option<Vec<ControlPlaneNode>>,
        node_pools: Option<Vec<NodePoolWithProvider>>,
    ) -> ClusterSummaryInput<'_> {
        ClusterSummaryInput {
            cluster,
            control_plane_nodes,
            node_pools,
            permissions: PermissionSnapshot::allow_all(),
        }
    }

    #[test]
    fn test_control_plane_and_workers() {
        let cluster = cluster();
        let reporter = RecordingReporter::new();
        let summary = compute_cluster_summary(
            &input(
                &cluster,
                Some(vec![discrete(Some("Standard_D4s_v3"))]),
                Some(vec![pool(Some(3), Some("Standard_D8s_v3"))]),
            ),
            &catalog(),
            &reporter,
        );

        assert_eq!(
            summary,
            ClusterSummary {
                nodes_count: Some(1),
                nodes_cpu: Some(4),
                nodes_memory: Some(16 * GB),
                worker_nodes_count: Some(3),
                worker_nodes_cpu: Some(24),
                worker_nodes_memory: Some(96 * GB),
            }
        );
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_missing_control_plane_type_falls_back_to_first_known() {
        let cluster = cluster();
        let reporter = RecordingReporter::new();
        let summary = compute_cluster_summary(
            &input(
                &cluster,
                Some(vec![
                    discrete(None),
                    discrete(Some("Standard_D4s_v3")),
                    discrete(None),
                ]),
                None,
            ),
            &catalog(),
            &reporter,
        );

        assert_eq!(summary.nodes_count, Some(3));
        assert_eq!(summary.nodes_cpu, Some(12));
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_unknown_control_plane_type_keeps_count() {
        let cluster = cluster();
        let reporter = RecordingReporter::new();
        let summary = compute_cluster_summary(
            &input(
                &cluster,
                Some(vec![discrete(Some("Standard_Z99")), discrete(Some("Standard_Z99"))]),
                None,
            ),
            &catalog(),
            &reporter,
        );

        assert_eq!(summary.nodes_count, Some(2));
        assert_eq!(summary.nodes_cpu, None);
        assert_eq!(summary.nodes_memory, None);
        assert_eq!(reporter.len(), 1);
    }

    #[test]
    fn test_pool_without_type_is_an_anomaly() {
        let cluster = cluster();
        let reporter = RecordingReporter::new();
        let summary = compute_cluster_summary(
            &input(&cluster, None, Some(vec![pool(Some(2), None)])),
            &catalog(),
            &reporter,
        );

        assert_eq!(summary.worker_nodes_count, Some(2));
        assert_eq!(summary.worker_nodes_cpu, None);
        assert!(matches!(
            reporter.errors()[0],
            ReportedError::MissingMachineType { .. }
        ));
    }

    #[test]
    fn test_pools_without_ready_nodes_need_no_type() {
        let cluster = cluster();
        let reporter = RecordingReporter::new();
        let mut orphan = pool(Some(5), None);
        orphan.provider_node_pool = None;

        let summary = compute_cluster_summary(
            &input(&cluster, None, Some(vec![pool(None, None), orphan])),
            &catalog(),
            &reporter,
        );

        assert_eq!(summary.worker_nodes_count, Some(5));
        assert_eq!(summary.worker_nodes_cpu, Some(0));
        assert_eq!(summary.worker_nodes_memory, Some(0));
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_forbidden_fields_stay_unknown() {
        let cluster = cluster();
        let reporter = RecordingReporter::new();
        let mut forbidden = input(
            &cluster,
            Some(vec![discrete(Some("Standard_D4s_v3"))]),
            Some(vec![pool(Some(1), Some("Standard_D4s_v3"))]),
        );
        forbidden.permissions.control_plane_nodes.can_list = false;

        let summary = compute_cluster_summary(&forbidden, &catalog(), &reporter);
        assert_eq!(summary.nodes_count, None);
        assert_eq!(summary.nodes_cpu, None);
        assert_eq!(summary.worker_nodes_count, Some(1));
        assert_eq!(summary.worker_nodes_cpu, Some(4));
    }

    #[test]
    fn test_empty_cluster_is_known_zero() {
        let cluster = cluster();
        let reporter = RecordingReporter::new();
        let summary = compute_cluster_summary(
            &input(&cluster, Some(Vec::new()), Some(Vec::new())),
            &catalog(),
            &reporter,
        );
        assert_eq!(summary.nodes_count, Some(0));
        assert_eq!(summary.worker_nodes_memory, Some(0));
    }

    #[test]
    fn test_merge_skips_unknown_fields() {
        let known = ClusterSummary {
            nodes_cpu: Some(10),
            ..Default::default()
        };
        let merged = merge_cluster_summaries(&[ClusterSummary::default(), known]);
        assert_eq!(merged.nodes_cpu, Some(10));
        assert_eq!(merged.nodes_count, None);
        assert_eq!(merge_cluster_summaries(&[]), ClusterSummary::default());
    }

    #[test]
    fn test_summary_serializes_unknown_as_null() {
        let summary = ClusterSummary {
            nodes_cpu: Some(4),
            ..Default::default()
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["nodesCPU"], 4);
        assert!(json["workerNodesCPU"].is_null());
        assert!(json["workerNodesCount"].is_null());
    }
}
