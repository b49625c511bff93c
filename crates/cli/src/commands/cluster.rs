//! Single cluster summary command.

use anyhow::{Context, Result};
use happa_config::Config;
use happa_core::fetch_cluster_summary;
use happa_core::labels::RELEASE_VERSION;
use happa_core::summary::fetch_cluster;

use crate::cancellation::CancellationToken;
use crate::commands::{build_summary_context, formatter_for};
use crate::formatters::ClusterOutput;

pub async fn run(
    config: Config,
    name: &str,
    namespace: &str,
    output_format: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = formatter_for(output_format)?;
    let ctx = build_summary_context(&config)?;

    let cluster = cancel
        .run(fetch_cluster(&ctx, namespace, name))
        .await?
        .with_context(|| format!("Failed to load cluster '{}/{}'", namespace, name))?;
    let summary = cancel.run(fetch_cluster_summary(&ctx, &cluster)).await?;

    let output = ClusterOutput {
        name: name.to_string(),
        namespace: namespace.to_string(),
        release_version: cluster.metadata.label(RELEASE_VERSION).map(str::to_string),
        summary,
    };

    print!("{}", formatter.format_cluster(&output)?);
    Ok(())
}
