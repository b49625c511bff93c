//! Purpose: Provider-shape dispatch for control planes and node pools.
//! Responsibilities: Model each provider's shape as a variant and pair pools with siblings.
//! Non-scope: Does not fetch resources (see `fetch`).
//! Invariants/Assumptions: Every consumer matches the variants exhaustively.

use std::cmp::Ordering;

use happa_client::models::{
    AWSControlPlane, AWSMachineDeployment, AWSMachinePool, AzureMachine, AzureMachinePool,
    Cluster, G8sControlPlane, GCPMachineTemplate, KubeadmControlPlane, MachineDeployment,
    MachinePool, ObjectMeta, ObjectReference,
};
use happa_config::Provider;

use crate::labels;

const DEFAULT_NODE_POOL_DESCRIPTION: &str = "Unnamed node pool";

/// Provider of a cluster, from its infrastructure reference.
///
/// Falls back to `configured` when the reference is missing or unknown.
pub fn provider_for_cluster(cluster: &Cluster, configured: Provider) -> Provider {
    let Some(infra) = cluster.spec.as_ref().and_then(|s| s.infrastructure_ref.as_ref()) else {
        return configured;
    };

    match infra.kind.as_deref() {
        Some("AzureCluster") => Provider::Azure,
        Some("GCPCluster") => Provider::Gcp,
        Some("AWSManagedCluster") => Provider::Capa,
        Some("AWSCluster") => {
            let legacy = infra
                .api_version
                .as_deref()
                .is_some_and(|v| v.starts_with("infrastructure.giantswarm.io/"));
            if legacy { Provider::Aws } else { Provider::Capa }
        }
        _ => configured,
    }
}

fn clamp_replicas(replicas: Option<i64>) -> u32 {
    replicas
        .unwrap_or(0)
        .clamp(0, i64::from(u32::MAX)) as u32
}

/// A control-plane object, either one machine or a template with replicas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlPlaneNode {
    /// One object per machine.
    Discrete {
        name: String,
        instance_type: Option<String>,
    },
    /// One template standing for `replicas` machines.
    Replicated {
        name: String,
        instance_type: Option<String>,
        replicas: u32,
    },
}

impl ControlPlaneNode {
    pub fn from_azure_machine(machine: &AzureMachine) -> Self {
        Self::Discrete {
            name: machine.metadata.name_or_default().to_string(),
            instance_type: machine.vm_size().map(str::to_string),
        }
    }

    pub fn from_g8s_control_plane(
        control_plane: &G8sControlPlane,
        aws_control_plane: Option<&AWSControlPlane>,
    ) -> Self {
        Self::Replicated {
            name: control_plane.metadata.name_or_default().to_string(),
            instance_type: aws_control_plane
                .and_then(AWSControlPlane::instance_type)
                .map(str::to_string),
            replicas: clamp_replicas(control_plane.spec.as_ref().and_then(|s| s.replicas)),
        }
    }

    pub fn from_kubeadm_control_plane(
        control_plane: &KubeadmControlPlane,
        instance_type: Option<&str>,
    ) -> Self {
        Self::Replicated {
            name: control_plane.metadata.name_or_default().to_string(),
            instance_type: instance_type.map(str::to_string),
            replicas: clamp_replicas(control_plane.spec.as_ref().and_then(|s| s.replicas)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Discrete { name, .. } | Self::Replicated { name, .. } => name,
        }
    }

    /// Number of machines this object stands for.
    pub fn node_count(&self) -> u64 {
        match self {
            Self::Discrete { .. } => 1,
            Self::Replicated { replicas, .. } => u64::from(*replicas),
        }
    }

    pub fn instance_type(&self) -> Option<&str> {
        match self {
            Self::Discrete { instance_type, .. } | Self::Replicated { instance_type, .. } => {
                instance_type.as_deref()
            }
        }
    }
}

/// A CAPI node pool.
#[derive(Debug, Clone)]
pub enum NodePool {
    MachineDeployment(MachineDeployment),
    MachinePool(MachinePool),
}

impl NodePool {
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::MachineDeployment(md) => &md.metadata,
            Self::MachinePool(mp) => &mp.metadata,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name_or_default()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MachineDeployment(_) => "MachineDeployment",
            Self::MachinePool(_) => "MachinePool",
        }
    }

    pub fn description(&self) -> &str {
        self.metadata()
            .annotation(labels::MACHINE_POOL_NAME)
            .unwrap_or(DEFAULT_NODE_POOL_DESCRIPTION)
    }

    pub fn is_deleting(&self) -> bool {
        self.metadata().deletion_timestamp.is_some()
    }

    /// Ready worker nodes, if the pool reports them.
    pub fn ready_replicas(&self) -> Option<i64> {
        match self {
            Self::MachineDeployment(md) => md.status.as_ref()?.ready_replicas,
            Self::MachinePool(mp) => mp.status.as_ref()?.ready_replicas,
        }
    }

    /// Replicas the pool is currently asking for.
    pub fn desired_replicas(&self) -> Option<i64> {
        match self {
            Self::MachineDeployment(md) => md.status.as_ref()?.replicas,
            Self::MachinePool(mp) => mp.status.as_ref()?.replicas,
        }
    }

    /// Reference to the provider node pool.
    pub fn infrastructure_ref(&self) -> Option<&ObjectReference> {
        let template = match self {
            Self::MachineDeployment(md) => md.spec.as_ref()?.template.as_ref()?,
            Self::MachinePool(mp) => mp.spec.as_ref()?.template.as_ref()?,
        };
        template.spec.as_ref()?.infrastructure_ref.as_ref()
    }
}

/// Node pool order: deleting pools last, then by description, then by name.
pub fn compare_node_pools(a: &NodePool, b: &NodePool) -> Ordering {
    a.is_deleting()
        .cmp(&b.is_deleting())
        .then_with(|| match (a, b) {
            (NodePool::MachinePool(_), NodePool::MachinePool(_)) => {
                a.description().cmp(b.description())
            }
            _ => Ordering::Equal,
        })
        .then_with(|| a.name().cmp(b.name()))
}

/// The provider-specific sibling of a node pool, carrying its machine type.
#[derive(Debug, Clone)]
pub enum ProviderNodePool {
    /// Legacy Giant Swarm AWS.
    AWSMachineDeployment(AWSMachineDeployment),
    AzureMachinePool(AzureMachinePool),
    /// CAPA.
    AWSMachinePool(AWSMachinePool),
    GCPMachineTemplate(GCPMachineTemplate),
}

impl ProviderNodePool {
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::AWSMachineDeployment(p) => &p.metadata,
            Self::AzureMachinePool(p) => &p.metadata,
            Self::AWSMachinePool(p) => &p.metadata,
            Self::GCPMachineTemplate(p) => &p.metadata,
        }
    }

    /// The instance type the pool is configured with.
    pub fn primary_instance_type(&self) -> Option<&str> {
        match self {
            Self::AWSMachineDeployment(p) => p.instance_type(),
            Self::AzureMachinePool(p) => p.vm_size(),
            Self::AWSMachinePool(p) => p.instance_type(),
            Self::GCPMachineTemplate(p) => p.instance_type(),
        }
    }

    /// First instance type observed running, used when the spec has none.
    pub fn observed_instance_type(&self) -> Option<&str> {
        match self {
            Self::AWSMachineDeployment(p) => p.status_instance_types().first().map(String::as_str),
            Self::AWSMachinePool(p) => p.override_instance_types().first().copied(),
            Self::AzureMachinePool(_) | Self::GCPMachineTemplate(_) => None,
        }
    }

    /// Instance type used for capacity: the primary, else the first observed.
    ///
    /// Mixed-instance pools are counted as if every node ran this type.
    pub fn capacity_instance_type(&self) -> Option<&str> {
        self.primary_instance_type()
            .or_else(|| self.observed_instance_type())
    }

    /// Every instance type the pool may run.
    pub fn considered_instance_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.primary_instance_type().into_iter().collect();
        let extra: Vec<&str> = match self {
            Self::AWSMachineDeployment(p) => {
                p.status_instance_types().iter().map(String::as_str).collect()
            }
            Self::AWSMachinePool(p) => p.override_instance_types(),
            Self::AzureMachinePool(_) | Self::GCPMachineTemplate(_) => Vec::new(),
        };
        for t in extra {
            if !types.contains(&t) {
                types.push(t);
            }
        }
        types
    }
}

/// A node pool paired with its provider counterpart, if one was found.
#[derive(Debug, Clone)]
pub struct NodePoolWithProvider {
    pub node_pool: NodePool,
    pub provider_node_pool: Option<ProviderNodePool>,
}

/// Pair node pools with provider node pools by the pool's infrastructure reference name.
pub fn map_node_pools_to_provider_node_pools(
    node_pools: Vec<NodePool>,
    provider_node_pools: Vec<ProviderNodePool>,
) -> Vec<NodePoolWithProvider> {
    let mut providers = provider_node_pools;
    node_pools
        .into_iter()
        .map(|node_pool| {
            let wanted = node_pool
                .infrastructure_ref()
                .and_then(|r| r.name.as_deref())
                .unwrap_or_else(|| node_pool.name())
                .to_string();
            let provider_node_pool = providers
                .iter()
                .position(|p| p.metadata().name.as_deref() == Some(wanted.as_str()))
                .map(|index| providers.swap_remove(index));
            NodePoolWithProvider {
                node_pool,
                provider_node_pool,
            }
        })
        .collect()
}
