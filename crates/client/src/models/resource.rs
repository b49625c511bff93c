//! The `Resource` trait binding a model to its REST path.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::meta::ObjectMeta;

/// A Kubernetes-style resource kind served by the management API.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// API group; empty for the core group.
    const API_GROUP: &'static str;
    const API_VERSION: &'static str;
    const KIND: &'static str;
    /// Lowercase plural used in REST paths.
    const PLURAL: &'static str;
    const NAMESPACED: bool = true;

    fn metadata(&self) -> &ObjectMeta;

    /// `group/version`, or just `version` for the core group.
    fn api_version() -> String {
        if Self::API_GROUP.is_empty() {
            Self::API_VERSION.to_string()
        } else {
            format!("{}/{}", Self::API_GROUP, Self::API_VERSION)
        }
    }
}

/// Implement [`Resource`] for a model with a `metadata: ObjectMeta` field.
macro_rules! impl_resource {
    ($ty:ty, $group:expr, $version:expr, $kind:expr, $plural:expr) => {
        impl_resource!($ty, $group, $version, $kind, $plural, true);
    };
    ($ty:ty, $group:expr, $version:expr, $kind:expr, $plural:expr, $namespaced:expr) => {
        impl $crate::models::Resource for $ty {
            const API_GROUP: &'static str = $group;
            const API_VERSION: &'static str = $version;
            const KIND: &'static str = $kind;
            const PLURAL: &'static str = $plural;
            const NAMESPACED: bool = $namespaced;

            fn metadata(&self) -> &$crate::models::ObjectMeta {
                &self.metadata
            }
        }
    };
}

pub(crate) use impl_resource;
