//! Organization summary command.

use anyhow::{Context, Result};
use happa_config::Config;
use happa_core::fetch_organization_summary;
use happa_core::labels::organization_namespace;
use happa_core::permissions::fetch_permission_map;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::{build_summary_context, formatter_for};

pub async fn run(
    config: Config,
    organization: &str,
    check_permissions: bool,
    output_format: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = formatter_for(output_format)?;
    let mut ctx = build_summary_context(&config)?;

    if check_permissions {
        let namespace = organization_namespace(organization);
        info!(namespace = %namespace, "Reviewing permissions");
        let map = cancel
            .run(fetch_permission_map(&ctx.client, &[namespace]))
            .await?;
        ctx = ctx.with_permissions(map);
    }

    let summary = cancel
        .run(fetch_organization_summary(&ctx, organization))
        .await?
        .with_context(|| format!("Failed to summarize organization '{}'", organization))?;

    print!("{}", formatter.format_organization_summary(&summary)?);
    Ok(())
}
