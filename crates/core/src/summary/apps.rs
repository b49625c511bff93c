//! Apps installed in an organization.

use std::collections::BTreeSet;

use happa_client::ListOptions;
use happa_client::models::App;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;
use crate::fetch::degrade;
use crate::summary::SummaryContext;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppsSummary {
    /// Distinct apps, by catalog app name.
    pub apps_in_use_count: Option<usize>,
    /// App objects, one per installation.
    pub app_deployments_count: Option<usize>,
}

pub fn compute_apps_summary(apps: &[App]) -> AppsSummary {
    let distinct: BTreeSet<&str> = apps.iter().map(App::app_name).collect();
    AppsSummary {
        apps_in_use_count: Some(distinct.len()),
        app_deployments_count: Some(apps.len()),
    }
}

/// Apps summary of a namespace. Unknown when not permitted or the list fails.
pub async fn fetch_apps_summary(ctx: &SummaryContext, namespace: &str) -> AppsSummary {
    if !ctx.permission_snapshot(ctx.provider, namespace).apps.can_list {
        debug!(namespace, "Not permitted to list apps");
        return AppsSummary::default();
    }

    let result = ctx
        .client
        .list::<App>(&ListOptions::in_namespace(namespace))
        .await
        .map_err(FetchError::from);
    degrade(ctx.reporter(), &format!("apps in {namespace}"), result)
        .map(|apps| compute_apps_summary(&apps))
        .unwrap_or_default()
}
