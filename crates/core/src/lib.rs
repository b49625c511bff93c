//! Node pool capacity, release and permission aggregation.
//!
//! Turns the Cluster API and provider resources served by a management
//! cluster into the summaries shown for clusters and organizations, and
//! computes the consequences of changing a node pool's autoscaler bounds.
//!
//! Summaries degrade per field: a forbidden or failed fetch leaves its
//! fields unknown (`None`) and is forwarded to an [`ErrorReporter`],
//! while the rest of the summary is still computed.

pub mod error;
pub mod fetch;
pub mod labels;
pub mod machine_types;
pub mod permissions;
pub mod provider;
pub mod reporter;
pub mod scaling;
pub mod summary;

pub use error::{CatalogError, Degradation, FetchError, Result, ScalingError, SummaryError};
pub use machine_types::{MachineTypeCatalog, MachineTypeProperties};
pub use permissions::{
    PermissionMap, PermissionSnapshot, ResourcePermissions, compute_permissions,
    fetch_permission_map, has_permission,
};
pub use provider::{ControlPlaneNode, NodePool, NodePoolWithProvider, ProviderNodePool};
pub use reporter::{ErrorReporter, RecordingReporter, ReportedError, TracingReporter};
pub use scaling::{
    NodePoolScaling, ScalingEditor, ScalingOutcome, get_node_pool_scaling,
    update_node_pool_scaling,
};
pub use summary::{
    ClusterSummary, OrganizationSummary, SummaryContext, fetch_cluster_summary,
    fetch_organization_summary, merge_cluster_summaries,
};
