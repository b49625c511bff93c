//! Cluster and organization summaries.
//!
//! Pure `compute_*` functions turn already-fetched resources into rollups;
//! `fetch_*` functions gather those resources concurrently and degrade
//! per field instead of failing the whole summary.
//!
//! # Submodules
//! - [`cluster`]: node counts, CPU and memory per cluster, and merging
//! - [`releases`]: oldest and newest release in use
//! - [`versions`]: oldest and newest cluster app and Kubernetes versions
//! - [`apps`]: apps installed in an organization
//! - [`organization`]: everything above for one organization

pub mod apps;
pub mod cluster;
pub mod organization;
pub mod releases;
pub mod versions;

use std::sync::Arc;

use happa_client::HappaClient;
use happa_client::models::Cluster;
use happa_config::Provider;

use crate::error::{Result, SummaryError};
use crate::machine_types::MachineTypeCatalog;
use crate::permissions::{PermissionMap, PermissionSnapshot};
use crate::reporter::ErrorReporter;

pub use apps::{AppsSummary, compute_apps_summary, fetch_apps_summary};
pub use cluster::{
    ClusterSummary, ClusterSummaryInput, compute_cluster_summary, fetch_cluster_summaries,
    fetch_cluster_summary, fetch_clusters_summary, merge_cluster_summaries,
};
pub use organization::{OrganizationSummary, fetch_organization_summary};
pub use releases::{ReleasesSummary, compute_releases_summary, fetch_releases_summary};
pub use versions::{
    ClusterAppVersionsSummary, compute_cluster_app_versions_summary,
    fetch_cluster_app_versions_summary,
};

/// Collaborators shared by every fetching summary.
#[derive(Clone)]
pub struct SummaryContext {
    pub client: Arc<HappaClient>,
    pub catalog: Arc<MachineTypeCatalog>,
    /// Used when a cluster's infrastructure reference names no known provider.
    pub provider: Provider,
    pub reporter: Arc<dyn ErrorReporter>,
    /// `None` attempts every fetch and lets failures degrade on their own.
    pub permissions: Option<Arc<PermissionMap>>,
}

impl SummaryContext {
    pub fn new(
        client: Arc<HappaClient>,
        catalog: Arc<MachineTypeCatalog>,
        provider: Provider,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            client,
            catalog,
            provider,
            reporter,
            permissions: None,
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionMap) -> Self {
        self.permissions = Some(Arc::new(permissions));
        self
    }

    /// Permissions for one provider and namespace.
    pub fn permission_snapshot(&self, provider: Provider, namespace: &str) -> PermissionSnapshot {
        match &self.permissions {
            Some(map) => PermissionSnapshot::compute(map, provider, namespace),
            None => PermissionSnapshot::allow_all(),
        }
    }

    pub(crate) fn reporter(&self) -> &dyn ErrorReporter {
        self.reporter.as_ref()
    }
}

impl std::fmt::Debug for SummaryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryContext")
            .field("base_url", &self.client.base_url())
            .field("provider", &self.provider)
            .field("machine_types", &self.catalog.len())
            .field("permissions", &self.permissions.is_some())
            .finish()
    }
}

/// Clusters of a namespace. The only fetch whose failure is fatal.
pub async fn fetch_clusters(ctx: &SummaryContext, namespace: &str) -> Result<Vec<Cluster>> {
    ctx.client
        .list::<Cluster>(&happa_client::ListOptions::in_namespace(namespace))
        .await
        .map_err(|source| SummaryError::PrimaryFetch {
            resource: "clusters",
            source,
        })
}

/// One cluster by name.
pub async fn fetch_cluster(ctx: &SummaryContext, namespace: &str, name: &str) -> Result<Cluster> {
    match ctx.client.get::<Cluster>(Some(namespace), name).await {
        Ok(cluster) => Ok(cluster),
        Err(e) if e.is_not_found() => Err(SummaryError::ClusterNotFound {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }),
        Err(source) => Err(SummaryError::PrimaryFetch {
            resource: "cluster",
            source,
        }),
    }
}
