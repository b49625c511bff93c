//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format every command result as pretty-printed JSON.
//!
//! Unknown summary fields serialize as `null`.

use crate::formatters::{
    ClusterOutput, Formatter, NamespacePermissionsOutput, ScalingOutput,
};
use anyhow::Result;
use happa_core::OrganizationSummary;

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_organization_summary(&self, summary: &OrganizationSummary) -> Result<String> {
        Ok(serde_json::to_string_pretty(summary)?)
    }

    fn format_cluster(&self, cluster: &ClusterOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(cluster)?)
    }

    fn format_permissions(&self, permissions: &[NamespacePermissionsOutput]) -> Result<String> {
        Ok(serde_json::to_string_pretty(permissions)?)
    }

    fn format_scaling(&self, scaling: &ScalingOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(scaling)?)
    }
}
