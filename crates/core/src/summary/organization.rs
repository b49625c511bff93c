//! Everything shown about one organization.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::Result;
use crate::labels::organization_namespace;
use crate::summary::{
    AppsSummary, ClusterAppVersionsSummary, ClusterSummary, ReleasesSummary, SummaryContext,
    fetch_apps_summary, fetch_cluster_app_versions_summary, fetch_cluster_summaries,
    fetch_clusters, fetch_releases_summary, merge_cluster_summaries,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSummary {
    pub namespace: String,
    pub cluster_count: usize,
    pub clusters: ClusterSummary,
    pub releases: ReleasesSummary,
    pub versions: ClusterAppVersionsSummary,
    pub apps: AppsSummary,
}

/// Summarize an organization, given by name or by namespace.
///
/// Only a failure to list the organization's clusters is an error; every
/// other part degrades on its own.
#[instrument(skip(ctx))]
pub async fn fetch_organization_summary(
    ctx: &SummaryContext,
    organization: &str,
) -> Result<OrganizationSummary> {
    let namespace = organization_namespace(organization);
    let clusters = fetch_clusters(ctx, &namespace).await?;
    info!(namespace = %namespace, clusters = clusters.len(), "Summarizing organization");

    let (summaries, releases, versions, apps) = futures::join!(
        fetch_cluster_summaries(ctx, &clusters),
        fetch_releases_summary(ctx, &clusters, &namespace),
        fetch_cluster_app_versions_summary(ctx, &clusters),
        fetch_apps_summary(ctx, &namespace),
    );

    Ok(OrganizationSummary {
        cluster_count: clusters.len(),
        clusters: merge_cluster_summaries(&summaries),
        releases,
        versions,
        apps,
        namespace,
    })
}
