//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format summaries as labelled text blocks.
//! - Format permissions as a tab-separated table.
//!
//! Does NOT handle:
//! - Machine-readable output (see `json`).

use std::fmt::Write as _;

use anyhow::Result;
use happa_core::OrganizationSummary;
use happa_core::permissions::ResourcePermissions;
use happa_core::summary::ClusterSummary;

use crate::formatters::common::{
    UNKNOWN_VALUE, format_memory, format_optional, format_scaling_value, yes_no,
};
use crate::formatters::{
    ClusterOutput, Formatter, NamespacePermissionsOutput, ScalingOutput, ScalingStatus,
};

/// Table formatter.
pub struct TableFormatter;

fn write_capacity(output: &mut String, summary: &ClusterSummary) -> std::fmt::Result {
    writeln!(output, "--- Control Plane ---")?;
    writeln!(output, "Nodes: {}", format_optional(summary.nodes_count))?;
    writeln!(output, "CPU: {}", format_optional(summary.nodes_cpu))?;
    writeln!(output, "Memory: {}", format_memory(summary.nodes_memory))?;
    writeln!(output)?;
    writeln!(output, "--- Workers ---")?;
    writeln!(output, "Nodes: {}", format_optional(summary.worker_nodes_count))?;
    writeln!(output, "CPU: {}", format_optional(summary.worker_nodes_cpu))?;
    writeln!(output, "Memory: {}", format_memory(summary.worker_nodes_memory))
}

/// `14.1.4 (Kubernetes 1.19.9)`, with either side possibly unknown.
fn release_with_kubernetes(release: Option<&str>, kubernetes: Option<&str>) -> String {
    match release {
        Some(release) => format!(
            "{} (Kubernetes {})",
            release,
            kubernetes.unwrap_or(UNKNOWN_VALUE)
        ),
        None => UNKNOWN_VALUE.to_string(),
    }
}

fn permission_row(
    output: &mut String,
    namespace: &str,
    resource: &str,
    permissions: &ResourcePermissions,
) -> std::fmt::Result {
    writeln!(
        output,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        namespace,
        resource,
        yes_no(permissions.can_get),
        yes_no(permissions.can_list),
        yes_no(permissions.can_create),
        yes_no(permissions.can_update),
        yes_no(permissions.can_delete),
    )
}

impl Formatter for TableFormatter {
    fn format_organization_summary(&self, summary: &OrganizationSummary) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "Organization: {}", summary.namespace)?;
        writeln!(output, "Clusters: {}", summary.cluster_count)?;
        writeln!(output)?;
        write_capacity(&mut output, &summary.clusters)?;
        writeln!(output)?;

        let releases = &summary.releases;
        writeln!(output, "--- Releases ---")?;
        writeln!(
            output,
            "Oldest: {}",
            release_with_kubernetes(
                releases.oldest_release_version.as_deref(),
                releases.oldest_release_k8s_version.as_deref(),
            )
        )?;
        writeln!(
            output,
            "Newest: {}",
            release_with_kubernetes(
                releases.newest_release_version.as_deref(),
                releases.newest_release_k8s_version.as_deref(),
            )
        )?;
        writeln!(output, "In use: {}", releases.releases_in_use_count)?;

        let versions = &summary.versions;
        if versions.oldest_cluster_app_version.is_some()
            || versions.oldest_kubernetes_version.is_some()
        {
            writeln!(output)?;
            writeln!(output, "--- Cluster Apps ---")?;
            writeln!(
                output,
                "Oldest: {}",
                release_with_kubernetes(
                    versions.oldest_cluster_app_version.as_deref(),
                    versions.oldest_kubernetes_version.as_deref(),
                )
            )?;
            writeln!(
                output,
                "Newest: {}",
                release_with_kubernetes(
                    versions.newest_cluster_app_version.as_deref(),
                    versions.newest_kubernetes_version.as_deref(),
                )
            )?;
        }

        writeln!(output)?;
        writeln!(output, "--- Apps ---")?;
        writeln!(output, "In use: {}", format_optional(summary.apps.apps_in_use_count))?;
        writeln!(
            output,
            "Deployments: {}",
            format_optional(summary.apps.app_deployments_count)
        )?;

        Ok(output)
    }

    fn format_cluster(&self, cluster: &ClusterOutput) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "Cluster: {}/{}", cluster.namespace, cluster.name)?;
        writeln!(
            output,
            "Release: {}",
            cluster.release_version.as_deref().unwrap_or(UNKNOWN_VALUE)
        )?;
        writeln!(output)?;
        write_capacity(&mut output, &cluster.summary)?;

        Ok(output)
    }

    fn format_permissions(&self, permissions: &[NamespacePermissionsOutput]) -> Result<String> {
        let mut output = String::new();

        if permissions.is_empty() {
            output.push_str("No namespaces reviewed.\n");
            return Ok(output);
        }

        writeln!(output, "NAMESPACE\tRESOURCE\tGET\tLIST\tCREATE\tUPDATE\tDELETE")?;
        for entry in permissions {
            let namespace = entry.namespace.as_str();
            let snapshot = &entry.permissions;
            permission_row(&mut output, namespace, "node pools", &snapshot.node_pools)?;
            permission_row(&mut output, namespace, "clusters", &snapshot.clusters)?;
            permission_row(
                &mut output,
                namespace,
                "control plane nodes",
                &snapshot.control_plane_nodes,
            )?;
            permission_row(&mut output, namespace, "releases", &snapshot.releases)?;
            permission_row(&mut output, namespace, "apps", &snapshot.apps)?;
        }

        let unreviewed: Vec<_> = permissions
            .iter()
            .filter(|entry| !entry.reviewed)
            .map(|entry| entry.namespace.as_str())
            .collect();
        if !unreviewed.is_empty() {
            writeln!(output)?;
            writeln!(output, "Review failed for: {}", unreviewed.join(", "))?;
        }

        Ok(output)
    }

    fn format_scaling(&self, scaling: &ScalingOutput) -> Result<String> {
        let mut output = String::new();
        let current = &scaling.current;

        writeln!(output, "Node pool: {}/{}", scaling.namespace, scaling.node_pool)?;
        writeln!(
            output,
            "Current: min {}, max {}, desired {}, ready {}",
            format_scaling_value(current.min),
            format_scaling_value(current.max),
            format_scaling_value(current.desired),
            format_scaling_value(current.current),
        )?;
        writeln!(
            output,
            "Proposed: min {}{}, max {}{}",
            scaling.proposed.min,
            if scaling.validity.min_valid { "" } else { " (invalid)" },
            scaling.proposed.max,
            if scaling.validity.max_valid { "" } else { " (invalid)" },
        )?;

        let action = &scaling.action;
        let suffix = if action.disabled { " (disabled)" } else { "" };
        writeln!(output, "Action: {}{}", action.label, suffix)?;
        if let Some(ref warning) = scaling.warning {
            writeln!(output, "Warning: {}", warning)?;
        }

        let status = match scaling.status {
            ScalingStatus::Preview if action.disabled => "nothing to apply",
            ScalingStatus::Preview => "preview only, pass --yes to apply",
            ScalingStatus::Applied => "applied",
            ScalingStatus::Unchanged => "unchanged",
        };
        writeln!(output, "Status: {}", status)?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happa_config::Provider;
    use happa_core::permissions::PermissionSnapshot;
    use happa_core::scaling::{
        NodePoolScaling, ScalingBounds, ScalingValidity, get_submit_button_attributes,
    };

    #[test]
    fn test_unknown_capacity_renders_na() {
        let cluster = ClusterOutput {
            name: "a1b2c".to_string(),
            namespace: "org-acme".to_string(),
            release_version: Some("20.0.0".to_string()),
            summary: ClusterSummary {
                nodes_count: Some(3),
                nodes_cpu: Some(12),
                nodes_memory: Some(48_000_000_000),
                ..Default::default()
            },
        };

        let output = TableFormatter.format_cluster(&cluster).unwrap();

        assert!(output.contains("Cluster: org-acme/a1b2c"));
        assert!(output.contains("Release: 20.0.0"));
        assert!(output.contains("CPU: 12"));
        assert!(output.contains("Memory: 48.00 GB"));
        assert!(output.contains("--- Workers ---\nNodes: n/a\nCPU: n/a\nMemory: n/a"));
    }

    #[test]
    fn test_release_without_kubernetes_version() {
        let mut summary = OrganizationSummary {
            namespace: "org-acme".to_string(),
            cluster_count: 2,
            ..Default::default()
        };
        summary.releases.oldest_release_version = Some("14.1.4".to_string());
        summary.releases.oldest_release_k8s_version = Some("1.19.9".to_string());
        summary.releases.newest_release_version = Some("16.0.1".to_string());
        summary.releases.releases_in_use_count = 2;

        let output = TableFormatter.format_organization_summary(&summary).unwrap();

        assert!(output.contains("Oldest: 14.1.4 (Kubernetes 1.19.9)"));
        assert!(output.contains("Newest: 16.0.1 (Kubernetes n/a)"));
        assert!(output.contains("Deployments: n/a"));
        assert!(!output.contains("--- Cluster Apps ---"));
    }

    #[test]
    fn test_permissions_table() {
        let entries = vec![
            NamespacePermissionsOutput {
                namespace: "org-acme".to_string(),
                reviewed: true,
                permissions: PermissionSnapshot::allow_all(),
            },
            NamespacePermissionsOutput {
                namespace: "org-broken".to_string(),
                reviewed: false,
                permissions: PermissionSnapshot::default(),
            },
        ];

        let output = TableFormatter.format_permissions(&entries).unwrap();

        assert!(output.starts_with("NAMESPACE\tRESOURCE"));
        assert!(output.contains("org-acme\tnode pools\tyes\tyes\tyes\tyes\tyes"));
        assert!(output.contains("org-broken\tnode pools\tno\tno\tno\tno\tno"));
        assert!(output.contains("Review failed for: org-broken"));
    }

    #[test]
    fn test_scaling_preview_shows_warning() {
        let current = NodePoolScaling {
            min: 3,
            max: 10,
            desired: 5,
            current: 5,
        };
        let proposed = ScalingBounds { min: 1, max: 3 };
        let scaling = ScalingOutput {
            node_pool: "p4d7e".to_string(),
            namespace: "org-acme".to_string(),
            provider: Provider::Aws,
            current,
            proposed,
            validity: ScalingValidity::valid(),
            nodes_difference: -2,
            action: get_submit_button_attributes(&current, proposed, ScalingValidity::valid()),
            warning: Some("enforce the removal of 2 nodes".to_string()),
            status: ScalingStatus::Preview,
        };

        let output = TableFormatter.format_scaling(&scaling).unwrap();

        assert!(output.contains("Current: min 3, max 10, desired 5, ready 5"));
        assert!(output.contains("Action: Remove 2 nodes\n"));
        assert!(output.contains("Warning: enforce the removal of 2 nodes"));
        assert!(output.contains("Status: preview only, pass --yes to apply"));
    }
}
