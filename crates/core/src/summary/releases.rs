//! Purpose: Oldest and newest release in use.
//! Responsibilities: Order release labels by semver and look up their Kubernetes versions.
//! Non-scope: Does not handle cluster-app versioned installations (see `versions`).

use std::collections::BTreeSet;

use happa_client::models::{Cluster, Release};
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::fetch::degrade;
use crate::labels;
use crate::summary::SummaryContext;

/// Release skew across clusters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasesSummary {
    pub oldest_release_version: Option<String>,
    #[serde(rename = "oldestReleaseK8sVersion")]
    pub oldest_release_k8s_version: Option<String>,
    pub newest_release_version: Option<String>,
    #[serde(rename = "newestReleaseK8sVersion")]
    pub newest_release_k8s_version: Option<String>,
    pub releases_in_use_count: usize,
}

/// Parse a version, accepting a leading `v`.
pub(crate) fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    match Version::parse(trimmed.strip_prefix('v').unwrap_or(trimmed)) {
        Ok(version) => Some(version),
        Err(e) => {
            warn!(version = raw, error = %e, "Ignoring unparseable version");
            None
        }
    }
}

/// Distinct versions in ascending order.
pub(crate) fn sorted_versions<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<Version> {
    raw.into_iter()
        .filter_map(parse_version)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Release versions used by the clusters, ascending and deduplicated.
/// Clusters without a release label are skipped.
pub fn release_versions_in_use(clusters: &[Cluster]) -> Vec<Version> {
    sorted_versions(
        clusters
            .iter()
            .filter_map(|c| c.metadata.label(labels::RELEASE_VERSION)),
    )
}

/// Oldest and newest release plus the number of distinct releases.
///
/// Kubernetes versions need a fetch and are left unknown here.
pub fn compute_releases_summary(clusters: &[Cluster]) -> ReleasesSummary {
    let versions = release_versions_in_use(clusters);
    ReleasesSummary {
        oldest_release_version: versions.first().map(Version::to_string),
        newest_release_version: versions.last().map(Version::to_string),
        releases_in_use_count: versions.len(),
        ..Default::default()
    }
}

async fn fetch_kubernetes_version(ctx: &SummaryContext, version: &str) -> Option<String> {
    let result = ctx
        .client
        .get::<Release>(None, &Release::object_name(version))
        .await
        .map_err(FetchError::from);
    let release = degrade(ctx.reporter(), &format!("release {version}"), result)?;
    release.kubernetes_version().map(str::to_string)
}

/// Releases summary with the Kubernetes version of the oldest and newest release.
///
/// Both releases are fetched concurrently; one failing keeps the other.
pub async fn fetch_releases_summary(
    ctx: &SummaryContext,
    clusters: &[Cluster],
    namespace: &str,
) -> ReleasesSummary {
    let mut summary = compute_releases_summary(clusters);
    if !ctx.permission_snapshot(ctx.provider, namespace).releases.can_get {
        debug!("Not permitted to get releases");
        return summary;
    }

    let (Some(oldest), Some(newest)) = (
        summary.oldest_release_version.clone(),
        summary.newest_release_version.clone(),
    ) else {
        return summary;
    };

    if oldest == newest {
        let k8s_version = fetch_kubernetes_version(ctx, &oldest).await;
        summary.oldest_release_k8s_version = k8s_version.clone();
        summary.newest_release_k8s_version = k8s_version;
    } else {
        let (oldest_k8s, newest_k8s) = futures::join!(
            fetch_kubernetes_version(ctx, &oldest),
            fetch_kubernetes_version(ctx, &newest),
        );
        summary.oldest_release_k8s_version = oldest_k8s;
        summary.newest_release_k8s_version = newest_k8s;
    }

    summary
}
