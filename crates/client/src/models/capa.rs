//! Cluster API AWS resources (`infrastructure.cluster.x-k8s.io`).

use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;
use super::resource::impl_resource;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineTemplateResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineTemplateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<AWSMachineTemplateSpecInner>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineTemplateSpecInner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<AWSMachineTemplateResource>,
}

/// Machine template referenced by a `KubeadmControlPlane` on CAPA.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachineTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<AWSMachineTemplateSpec>,
}

impl AWSMachineTemplate {
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
    AWSMachineTemplate,
    "infrastructure.cluster.x-k8s.io",
    "v1beta1",
    "AWSMachineTemplate",
    "awsmachinetemplates"
);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSLaunchTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedInstancesPolicy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<InstanceOverride>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachinePoolSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_launch_template: Option<AWSLaunchTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_instances_policy: Option<MixedInstancesPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AWSMachinePool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<AWSMachinePoolSpec>,
}

impl AWSMachinePool {
    pub fn instance_type(&self) -> Option<&str> {
        self.spec
            .as_ref()?
            .aws_launch_template
            .as_ref()?
            .instance_type
            .as_deref()
    }

    /// Instance types listed in the mixed-instances overrides.
    pub fn override_instance_types(&self) -> Vec<&str> {
        self.spec
            .as_ref()
            .and_then(|spec| spec.mixed_instances_policy.as_ref())
            .map(|policy| {
                policy
                    .overrides
                    .iter()
                    .filter_map(|o| o.instance_type.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl_resource!(
    AWSMachinePool,
    "infrastructure.cluster.x-k8s.io",
    "v1beta1",
    "AWSMachinePool",
    "awsmachinepools"
);
