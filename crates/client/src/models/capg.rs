//! Cluster API GCP resources (`infrastructure.cluster.x-k8s.io`).

use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;
use super::resource::impl_resource;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GCPMachineTemplateResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GCPMachineTemplateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<GCPMachineTemplateSpecInner>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GCPMachineTemplateSpecInner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<GCPMachineTemplateResource>,
}

/// Machine template used for both control-plane and worker machines on GCP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GCPMachineTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<GCPMachineTemplateSpec>,
}

impl GCPMachineTemplate {
    pub fn instance_type(&self) -> Option<&str> {
        self.spec
            .as_ref()?
            .template
            .as_ref()?
            .spec
            .as_ref()?
            .instance_type
            .as_deref()
    }
}

impl_resource!(
    GCPMachineTemplate,
    "infrastructure.cluster.x-k8s.io",
    "v1beta1",
    "GCPMachineTemplate",
    "gcpmachinetemplates"
);
