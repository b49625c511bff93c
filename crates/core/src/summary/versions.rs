//! Purpose: Version skew for installations that version clusters by cluster app.
//! Responsibilities: Order cluster app versions and probe each control plane's Kubernetes version.
//! Non-scope: Does not look at release resources.
//! Invariants/Assumptions: Forbidden or missing control planes are silent; anomalies are reported.

use futures::future::join_all;
use happa_client::models::{Cluster, KubeadmControlPlane};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Degradation, FetchError};
use crate::fetch::cluster_namespace;
use crate::labels;
use crate::reporter::ReportedError;
use crate::summary::SummaryContext;
use crate::summary::releases::sorted_versions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAppVersionsSummary {
    pub oldest_cluster_app_version: Option<String>,
    pub newest_cluster_app_version: Option<String>,
    pub oldest_kubernetes_version: Option<String>,
    pub newest_kubernetes_version: Option<String>,
}

/// Oldest and newest cluster app version from cluster labels, and oldest and
/// newest of the Kubernetes versions probed per cluster.
pub fn compute_cluster_app_versions_summary(
    clusters: &[Cluster],
    kubernetes_versions: &[String],
) -> ClusterAppVersionsSummary {
    let app_versions = sorted_versions(
        clusters
            .iter()
            .filter_map(|c| c.metadata.label(labels::CLUSTER_APP_VERSION)),
    );
    let k8s_versions = sorted_versions(kubernetes_versions.iter().map(String::as_str));

    ClusterAppVersionsSummary {
        oldest_cluster_app_version: app_versions.first().map(ToString::to_string),
        newest_cluster_app_version: app_versions.last().map(ToString::to_string),
        oldest_kubernetes_version: k8s_versions.first().map(ToString::to_string),
        newest_kubernetes_version: k8s_versions.last().map(ToString::to_string),
    }
}

/// Kubernetes version of a cluster's control plane, if it has a kubeadm one.
async fn probe_kubernetes_version(
    ctx: &SummaryContext,
    cluster: &Cluster,
) -> Result<Option<String>, FetchError> {
    let Some(reference) = cluster.control_plane_ref() else {
        return Ok(None);
    };
    if reference.kind.as_deref() != Some("KubeadmControlPlane") {
        return Ok(None);
    }
    let Some(name) = reference.name.as_deref() else {
        return Ok(None);
    };

    let control_plane = ctx
        .client
        .get::<KubeadmControlPlane>(Some(cluster_namespace(cluster)), name)
        .await?;
    let version = control_plane
        .status
        .as_ref()
        .and_then(|s| s.version.clone())
        .or_else(|| control_plane.spec.as_ref().and_then(|s| s.version.clone()));
    Ok(version)
}

/// Cluster app versions summary over clusters that carry a cluster app version.
///
/// A forbidden or missing control plane means no data for that cluster and
/// is not reported. Any other probe failure is reported.
pub async fn fetch_cluster_app_versions_summary(
    ctx: &SummaryContext,
    clusters: &[Cluster],
) -> ClusterAppVersionsSummary {
    let app_clusters: Vec<&Cluster> = clusters
        .iter()
        .filter(|c| c.metadata.label(labels::CLUSTER_APP_VERSION).is_some())
        .collect();

    let probes = join_all(app_clusters.iter().map(|cluster| async move {
        match probe_kubernetes_version(ctx, cluster).await {
            Ok(version) => version,
            Err(e) => {
                let degradation = Degradation::of(&e);
                debug!(
                    cluster = %cluster.metadata.name_or_default(),
                    ?degradation,
                    "Kubernetes version probe failed"
                );
                if degradation == Degradation::Anomaly {
                    let context = format!("cluster {} version", cluster.metadata.name_or_default());
                    ctx.reporter().notify(&ReportedError::fetch(context, &e));
                }
                None
            }
        }
    }))
    .await;

    let kubernetes_versions: Vec<String> = probes.into_iter().flatten().collect();
    compute_cluster_app_versions_summary(clusters, &kubernetes_versions)
}
