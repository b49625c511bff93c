//! Giant Swarm releases (`release.giantswarm.io/v1alpha1`).

use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;
use super::resource::impl_resource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseComponent {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ReleaseComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A platform release. Cluster-scoped; named `v{version}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<ReleaseSpec>,
}

impl Release {
    /// Object name of the release carrying `version` (with or without a `v` prefix).
    pub fn object_name(version: &str) -> String {
        format!("v{}", version.trim_start_matches('v'))
    }

    pub fn component_version(&self, component: &str) -> Option<&str> {
        self.spec
            .as_ref()?
            .components
            .iter()
            .find(|c| c.name == component)
            .map(|c| c.version.as_str())
    }

    /// Version of the `kubernetes` component.
    pub fn kubernetes_version(&self) -> Option<&str> {
        self.component_version("kubernetes")
    }
}

impl_resource!(
    Release,
    "release.giantswarm.io",
    "v1alpha1",
    "Release",
    "releases",
    false
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name() {
        assert_eq!(Release::object_name("14.1.4"), "v14.1.4");
        assert_eq!(Release::object_name("v14.1.4"), "v14.1.4");
    }

    #[test]
    fn test_kubernetes_version() {
        let release: Release = serde_json::from_value(serde_json::json!({
            "metadata": {"name": "v14.1.4"},
            "spec": {"components": [
                {"name": "containerlinux", "version": "2605.12.0"},
                {"name": "kubernetes", "version": "1.19.9"}
            ]}
        }))
        .unwrap();

        assert_eq!(release.kubernetes_version(), Some("1.19.9"));
        assert_eq!(release.component_version("etcd"), None);
    }
}
