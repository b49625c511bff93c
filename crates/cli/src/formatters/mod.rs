//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide JSON and table renderings of every command result.
//! - Define the output structures commands hand to formatters.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! ## Unknown Values
//!
//! A summary field the caller could not compute is unknown, never zero:
//!
//! | Format | Unknown Value | Example |
//! |--------|---------------|---------|
//! | JSON | `null` (via serde) | `"nodesCpu": null` |
//! | Table | `n/a` | `CPU: n/a` |

use anyhow::Result;
use happa_config::Provider;
use happa_core::permissions::PermissionSnapshot;
use happa_core::scaling::{NodePoolScaling, ScalingBounds, ScalingValidity, SubmitButtonAttributes};
use happa_core::{ClusterSummary, OrganizationSummary};
use serde::Serialize;
use std::str::FromStr;

mod common;
mod json;
mod table;

pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// One cluster with its capacity summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOutput {
    pub name: String,
    pub namespace: String,
    pub release_version: Option<String>,
    pub summary: ClusterSummary,
}

/// Permissions reviewed in one namespace.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespacePermissionsOutput {
    pub namespace: String,
    /// `false` when the rules review failed and every check is denied.
    pub reviewed: bool,
    pub permissions: PermissionSnapshot,
}

/// Proposed scaling change for a node pool, and whether it was applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingOutput {
    pub node_pool: String,
    pub namespace: String,
    pub provider: Provider,
    pub current: NodePoolScaling,
    pub proposed: ScalingBounds,
    pub validity: ScalingValidity,
    /// Nodes the autoscaler will add (positive) or remove (negative).
    pub nodes_difference: i64,
    pub action: SubmitButtonAttributes,
    pub warning: Option<String>,
    pub status: ScalingStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingStatus {
    /// Nothing was sent; `--yes` was not given.
    Preview,
    Applied,
    Unchanged,
}

/// Trait for formatting command output.
pub trait Formatter {
    fn format_organization_summary(&self, summary: &OrganizationSummary) -> Result<String>;

    fn format_cluster(&self, cluster: &ClusterOutput) -> Result<String>;

    fn format_permissions(&self, permissions: &[NamespacePermissionsOutput]) -> Result<String>;

    fn format_scaling(&self, scaling: &ScalingOutput) -> Result<String>;
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}
