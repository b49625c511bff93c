//! Purpose: Permission snapshot built from `SelfSubjectRulesReview` results.
//! Responsibilities: Flatten rules, match wildcards and derive per-resource permissions.
//! Non-scope: Does not enforce permissions; summaries consult the snapshot.
//! Invariants/Assumptions: A namespace without a complete review denies everything.

use std::collections::{BTreeMap, BTreeSet};

use futures::future::join_all;
use happa_client::models::{
    AWSControlPlane, AWSMachineDeployment, AWSMachinePool, AWSMachineTemplate, App,
    AzureMachine, AzureMachinePool, Cluster, G8sControlPlane, GCPMachineTemplate,
    KubeadmControlPlane, MachineDeployment, MachinePool, Release, ResourceRule,
    SelfSubjectRulesReview,
};
use happa_client::{HappaClient, Resource};
use happa_config::Provider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const WILDCARD: &str = "*";

/// Verbs granted per `group:resource:name` key.
pub type NamespacePermissions = BTreeMap<String, BTreeSet<String>>;

/// Permissions per namespace.
pub type PermissionMap = BTreeMap<String, NamespacePermissions>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    List,
    Watch,
    Create,
    Update,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::List => "list",
            Self::Watch => "watch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

fn permission_key(group: &str, resource: &str, name: &str) -> String {
    format!("{group}:{resource}:{name}")
}

fn append_verbs(permissions: &mut NamespacePermissions, key: String, verbs: &[String]) {
    let entry = permissions.entry(key).or_default();
    if entry.contains(WILDCARD) {
        return;
    }
    entry.extend(verbs.iter().cloned());
    if entry.contains(WILDCARD) {
        entry.retain(|v| v == WILDCARD);
    }
}

fn compute_resource_rules(rules: &[ResourceRule]) -> NamespacePermissions {
    let mut permissions = NamespacePermissions::new();

    for rule in rules {
        for group in &rule.api_groups {
            for resource in &rule.resources {
                // A rule over every resource of the group ignores resource names.
                if resource == WILDCARD {
                    append_verbs(
                        &mut permissions,
                        permission_key(group, WILDCARD, WILDCARD),
                        &rule.verbs,
                    );
                    break;
                }

                if rule.resource_names.is_empty() {
                    append_verbs(
                        &mut permissions,
                        permission_key(group, resource, WILDCARD),
                        &rule.verbs,
                    );
                } else {
                    for name in &rule.resource_names {
                        append_verbs(
                            &mut permissions,
                            permission_key(group, resource, name),
                            &rule.verbs,
                        );
                    }
                }
            }
        }
    }

    permissions
}

/// Flatten rules reviews into a permission map. Incomplete reviews are skipped.
pub fn compute_permissions(reviews: &[(String, SelfSubjectRulesReview)]) -> PermissionMap {
    reviews
        .iter()
        .filter_map(|(namespace, review)| {
            let status = review.status.as_ref()?;
            if status.incomplete {
                debug!(namespace, "Skipping incomplete rules review");
                return None;
            }
            Some((namespace.clone(), compute_resource_rules(&status.resource_rules)))
        })
        .collect()
}

/// Whether `verb` is allowed on `group/resource[/name]` in `namespace`.
///
/// Verbs are collected from the exact key and every wildcard key that covers
/// it. A `*` verb grants everything.
pub fn has_permission(
    map: &PermissionMap,
    namespace: &str,
    verb: Verb,
    group: &str,
    resource: &str,
    resource_name: Option<&str>,
) -> bool {
    let Some(permissions) = map.get(namespace) else {
        return false;
    };
    let name = resource_name.unwrap_or(WILDCARD);

    [
        permission_key(group, resource, name),
        permission_key(group, resource, WILDCARD),
        permission_key(group, WILDCARD, WILDCARD),
        permission_key(WILDCARD, resource, WILDCARD),
        permission_key(WILDCARD, WILDCARD, WILDCARD),
    ]
    .iter()
    .filter_map(|key| permissions.get(key))
    .any(|verbs| verbs.contains(WILDCARD) || verbs.contains(verb.as_str()))
}

/// What the caller may do with one resource kind in one namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePermissions {
    pub can_get: bool,
    pub can_list: bool,
    pub can_create: bool,
    /// Updates are sent as merge patches, so this is the `patch` verb.
    pub can_update: bool,
    pub can_delete: bool,
}

impl ResourcePermissions {
    pub fn all() -> Self {
        Self {
            can_get: true,
            can_list: true,
            can_create: true,
            can_update: true,
            can_delete: true,
        }
    }

    pub fn for_resource(map: &PermissionMap, namespace: &str, group: &str, resource: &str) -> Self {
        let check = |verb| has_permission(map, namespace, verb, group, resource, None);
        Self {
            can_get: check(Verb::Get),
            can_list: check(Verb::List),
            can_create: check(Verb::Create),
            can_update: check(Verb::Patch),
            can_delete: check(Verb::Delete),
        }
    }

    pub fn for_kind<R: Resource>(map: &PermissionMap, namespace: &str) -> Self {
        Self::for_resource(map, namespace, R::API_GROUP, R::PLURAL)
    }

    /// Permissions granted for both.
    pub fn and(self, other: Self) -> Self {
        Self {
            can_get: self.can_get && other.can_get,
            can_list: self.can_list && other.can_list,
            can_create: self.can_create && other.can_create,
            can_update: self.can_update && other.can_update,
            can_delete: self.can_delete && other.can_delete,
        }
    }
}

pub fn permissions_for_clusters(map: &PermissionMap, namespace: &str) -> ResourcePermissions {
    ResourcePermissions::for_kind::<Cluster>(map, namespace)
}

/// Node pools need both the CAPI kind and the provider kind.
pub fn permissions_for_node_pools(
    map: &PermissionMap,
    provider: Provider,
    namespace: &str,
) -> ResourcePermissions {
    match provider {
        Provider::Aws => ResourcePermissions::for_kind::<MachineDeployment>(map, namespace)
            .and(ResourcePermissions::for_kind::<AWSMachineDeployment>(map, namespace)),
        Provider::Azure => ResourcePermissions::for_kind::<MachinePool>(map, namespace)
            .and(ResourcePermissions::for_kind::<AzureMachinePool>(map, namespace)),
        Provider::Capa => ResourcePermissions::for_kind::<MachinePool>(map, namespace)
            .and(ResourcePermissions::for_kind::<AWSMachinePool>(map, namespace)),
        Provider::Gcp => ResourcePermissions::for_kind::<MachineDeployment>(map, namespace)
            .and(ResourcePermissions::for_kind::<GCPMachineTemplate>(map, namespace)),
    }
}

pub fn permissions_for_control_plane_nodes(
    map: &PermissionMap,
    provider: Provider,
    namespace: &str,
) -> ResourcePermissions {
    match provider {
        Provider::Aws => ResourcePermissions::for_kind::<G8sControlPlane>(map, namespace)
            .and(ResourcePermissions::for_kind::<AWSControlPlane>(map, namespace)),
        Provider::Azure => ResourcePermissions::for_kind::<AzureMachine>(map, namespace),
        Provider::Capa => ResourcePermissions::for_kind::<KubeadmControlPlane>(map, namespace)
            .and(ResourcePermissions::for_kind::<AWSMachineTemplate>(map, namespace)),
        Provider::Gcp => ResourcePermissions::for_kind::<KubeadmControlPlane>(map, namespace)
            .and(ResourcePermissions::for_kind::<GCPMachineTemplate>(map, namespace)),
    }
}

pub fn permissions_for_releases(map: &PermissionMap, namespace: &str) -> ResourcePermissions {
    ResourcePermissions::for_kind::<Release>(map, namespace)
}

pub fn permissions_for_apps(map: &PermissionMap, namespace: &str) -> ResourcePermissions {
    ResourcePermissions::for_kind::<App>(map, namespace)
}

/// Permissions relevant to summaries, for one provider and namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSnapshot {
    pub clusters: ResourcePermissions,
    pub control_plane_nodes: ResourcePermissions,
    pub node_pools: ResourcePermissions,
    pub releases: ResourcePermissions,
    pub apps: ResourcePermissions,
}

impl PermissionSnapshot {
    pub fn compute(map: &PermissionMap, provider: Provider, namespace: &str) -> Self {
        Self {
            clusters: permissions_for_clusters(map, namespace),
            control_plane_nodes: permissions_for_control_plane_nodes(map, provider, namespace),
            node_pools: permissions_for_node_pools(map, provider, namespace),
            releases: permissions_for_releases(map, namespace),
            apps: permissions_for_apps(map, namespace),
        }
    }

    /// Every fetch is attempted; failures degrade on their own.
    pub fn allow_all() -> Self {
        let all = ResourcePermissions::all();
        Self {
            clusters: all,
            control_plane_nodes: all,
            node_pools: all,
            releases: all,
            apps: all,
        }
    }
}

/// Review the caller's rules in each namespace, concurrently.
///
/// Namespaces whose review fails are left out of the map, so every check
/// against them is denied.
pub async fn fetch_permission_map(client: &HappaClient, namespaces: &[String]) -> PermissionMap {
    let reviews = join_all(namespaces.iter().map(|namespace| async move {
        match client.review_permissions(namespace).await {
            Ok(review) => Some((namespace.clone(), review)),
            Err(e) => {
                warn!(namespace = %namespace, error = %e, "Rules review failed");
                None
            }
        }
    }))
    .await;

    let reviews: Vec<_> = reviews.into_iter().flatten().collect();
    compute_permissions(&reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use happa_client::models::{SelfSubjectRulesReviewSpec, SubjectRulesReviewStatus};

    fn rule(verbs: &[&str], groups: &[&str], resources: &[&str], names: &[&str]) -> ResourceRule {
        let strings = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        ResourceRule {
            verbs: strings(verbs),
            api_groups: strings(groups),
            resources: strings(resources),
            resource_names: strings(names),
        }
    }

    fn review(rules: Vec<ResourceRule>, incomplete: bool) -> SelfSubjectRulesReview {
        SelfSubjectRulesReview {
            api_version: None,
            kind: None,
            metadata: Default::default(),
            spec: SelfSubjectRulesReviewSpec {
                namespace: "org-acme".to_string(),
            },
            status: Some(SubjectRulesReviewStatus {
                resource_rules: rules,
                incomplete,
                evaluation_error: None,
            }),
        }
    }

    fn map_of(rules: Vec<ResourceRule>) -> PermissionMap {
        compute_permissions(&[("org-acme".to_string(), review(rules, false))])
    }

    const CAPI: &str = "cluster.x-k8s.io";
    const RELEASES: &str = "release.giantswarm.io";

    fn allowed(map: &PermissionMap, verb: Verb, group: &str, resource: &str) -> bool {
        has_permission(map, "org-acme", verb, group, resource, None)
    }

    #[test]
    fn test_exact_rule_grants_listed_verbs_only() {
        let map = map_of(vec![rule(&["get", "list"], &[CAPI], &["clusters"], &[])]);

        assert!(allowed(&map, Verb::List, CAPI, "clusters"));
        assert!(!allowed(&map, Verb::Delete, CAPI, "clusters"));
        assert!(!has_permission(&map, "org-other", Verb::List, CAPI, "clusters", None));
    }

    #[test]
    fn test_star_verb_collapses() {
        let map = map_of(vec![
            rule(&["get"], &[CAPI], &["machinepools"], &[]),
            rule(&["*"], &[CAPI], &["machinepools"], &[]),
        ]);
        let verbs = &map["org-acme"]["cluster.x-k8s.io:machinepools:*"];
        assert_eq!(verbs.iter().collect::<Vec<_>>(), vec!["*"]);
    }

    #[test]
    fn test_group_wildcard_covers_resources() {
        let map = map_of(vec![rule(&["list"], &[CAPI], &["*"], &[])]);
        assert!(allowed(&map, Verb::List, CAPI, "machinepools"));
        assert!(!allowed(&map, Verb::List, RELEASES, "releases"));
    }

    #[test]
    fn test_cluster_admin_wildcard() {
        let map = map_of(vec![rule(&["*"], &["*"], &["*"], &[])]);
        assert!(has_permission(&map, "org-acme", Verb::Delete, "anything", "at-all", Some("x")));
    }

    #[test]
    fn test_resource_names_restrict_to_named_objects() {
        let map = map_of(vec![rule(&["get"], &[RELEASES], &["releases"], &["v14.1.4"])]);
        let named = Some("v14.1.4");
        assert!(has_permission(&map, "org-acme", Verb::Get, RELEASES, "releases", named));
        assert!(!allowed(&map, Verb::Get, RELEASES, "releases"));
    }

    #[test]
    fn test_incomplete_review_is_skipped() {
        let map = compute_permissions(&[(
            "org-acme".to_string(),
            review(vec![rule(&["*"], &["*"], &["*"], &[])], true),
        )]);
        assert!(map.is_empty());
    }

    #[test]
    fn test_node_pool_permissions_need_both_kinds() {
        let map = map_of(vec![
            rule(&["get", "list"], &["cluster.x-k8s.io"], &["machinepools"], &[]),
            rule(&["get"], &["infrastructure.cluster.x-k8s.io"], &["azuremachinepools"], &[]),
        ]);

        let azure = permissions_for_node_pools(&map, Provider::Azure, "org-acme");
        assert!(azure.can_get);
        assert!(!azure.can_list);

        let aws = permissions_for_node_pools(&map, Provider::Aws, "org-acme");
        assert_eq!(aws, ResourcePermissions::default());
    }
}
