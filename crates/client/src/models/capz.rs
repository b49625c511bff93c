//! Cluster API Azure resources (`infrastructure.cluster.x-k8s.io`).

use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;
use super::resource::impl_resource;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureMachineSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_size: Option<String>,
}

/// One Azure virtual machine. Control-plane machines carry the
/// `cluster.x-k8s.io/control-plane` label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureMachine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<AzureMachineSpec>,
}

impl AzureMachine {
    pub fn vm_size(&self) -> Option<&str> {
        self.spec.as_ref()?.vm_size.as_deref()
    }
}

impl_resource!(
    AzureMachine,
    "infrastructure.cluster.x-k8s.io",
    "v1beta1",
    "AzureMachine",
    "azuremachines"
);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureMachinePoolTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_size: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureMachinePoolSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<AzureMachinePoolTemplate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureMachinePool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<AzureMachinePoolSpec>,
}

impl AzureMachinePool {
    pub fn vm_size(&self) -> Option<&str> {
        self.spec.as_ref()?.template.as_ref()?.vm_size.as_deref()
    }
}

impl_resource!(
    AzureMachinePool,
    "infrastructure.cluster.x-k8s.io",
    "v1beta1",
    "AzureMachinePool",
    "azuremachinepools"
);
