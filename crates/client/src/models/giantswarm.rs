//! Giant Swarm vintage AWS resources (`infrastructure.giantswarm.io/v1alpha3`).
//!
//! Vintage AWS installations describe the control plane as one
//! `G8sControlPlane` (replica count) paired with one `AWSControlPlane`
//! (instance type), and node pools as `AWSMachineDeployment`s alongside the
//! Cluster API `MachineDeployment`s.

use serde::{Deserialize, Serialize};

use super::meta::{ObjectMeta, ObjectReference};
use super::resource::impl_resource;

const GROUP: &str = "infrastructure.giantswarm.io";
const VERSION: &str = "v1alpha3";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSControlPlaneSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSControlPlane {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<AWSControlPlaneSpec>,
}

impl AWSControlPlane {
    pub fn instance_type(&self) -> Option<&str> {
        self.spec.as_ref()?.instance_type.as_deref()
    }
}

impl_resource!(AWSControlPlane, GROUP, VERSION, "AWSControlPlane", "awscontrolplanes");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct G8sControlPlaneSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure_ref: Option<ObjectReference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct G8sControlPlaneStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_replicas: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct G8sControlPlane {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<G8sControlPlaneSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<G8sControlPlaneStatus>,
}

impl_resource!(G8sControlPlane, GROUP, VERSION, "G8sControlPlane", "g8scontrolplanes");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePoolScaling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<NodePoolScaling>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineDeploymentWorker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_alike_instance_types: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineDeploymentProvider {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker: Option<AWSMachineDeploymentWorker>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineDeploymentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_pool: Option<NodePoolSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AWSMachineDeploymentProvider>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatus {
    /// Instance types actually running, which may differ from the spec
    /// when alike instance types are allowed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instance_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_instances: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineDeploymentStatusProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineDeploymentStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AWSMachineDeploymentStatusProvider>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineDeployment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<AWSMachineDeploymentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AWSMachineDeploymentStatus>,
}

impl AWSMachineDeployment {
    pub fn instance_type(&self) -> Option<&str> {
        self.spec
            .as_ref()?
            .provider
            .as_ref()?
            .worker
            .as_ref()?
            .instance_type
            .as_deref()
    }

    pub fn use_alike_instance_types(&self) -> bool {
        self.spec
            .as_ref()
            .and_then(|s| s.provider.as_ref())
            .and_then(|p| p.worker.as_ref())
            .and_then(|w| w.use_alike_instance_types)
            .unwrap_or(false)
    }

    /// Instance types reported as running in `status.provider.worker`.
    pub fn status_instance_types(&self) -> &[String] {
        self.status
            .as_ref()
            .and_then(|s| s.provider.as_ref())
            .and_then(|p| p.worker.as_ref())
            .map(|w| w.instance_types.as_slice())
            .unwrap_or_default()
    }

    pub fn scaling(&self) -> Option<NodePoolScaling> {
        self.spec.as_ref()?.node_pool.as_ref()?.scaling
    }
}

impl_resource!(
    AWSMachineDeployment,
    GROUP,
    VERSION,
    "AWSMachineDeployment",
    "awsmachinedeployments"
);
