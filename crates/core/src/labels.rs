//! Well-known labels and annotations.

/// Cluster a CAPI object belongs to.
pub const CLUSTER_NAME: &str = "cluster.x-k8s.io/cluster-name";
/// Present on control-plane machines.
pub const CONTROL_PLANE: &str = "cluster.x-k8s.io/control-plane";
/// Cluster a legacy Giant Swarm object belongs to.
pub const GIANTSWARM_CLUSTER: &str = "giantswarm.io/cluster";
pub const ORGANIZATION: &str = "giantswarm.io/organization";
pub const RELEASE_VERSION: &str = "release.giantswarm.io/version";
/// Version of the cluster app that provisioned the cluster.
pub const CLUSTER_APP_VERSION: &str = "app.kubernetes.io/version";
/// Human readable node pool name.
pub const MACHINE_POOL_NAME: &str = "machine-pool.giantswarm.io/name";

pub const AUTOSCALER_MIN_SIZE: &str = "cluster.k8s.io/cluster-api-autoscaler-node-group-min-size";
pub const AUTOSCALER_MAX_SIZE: &str = "cluster.k8s.io/cluster-api-autoscaler-node-group-max-size";

/// Namespace holding an organization's resources.
pub fn organization_namespace(organization: &str) -> String {
    format!("org-{}", organization.trim_start_matches("org-"))
}
