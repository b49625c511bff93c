//! Node pool scaling command.
//!
//! Without `--yes` only the consequences of the new bounds are printed.

use anyhow::{Context, Result};
use happa_client::HappaClient;
use happa_config::Config;
use happa_core::fetch::{fetch_node_pool, fetch_provider_node_pool};
use happa_core::{
    Degradation, NodePool, ProviderNodePool, ScalingEditor, ScalingOutcome,
    get_node_pool_scaling, update_node_pool_scaling,
};
use tracing::{debug, warn};

use crate::cancellation::CancellationToken;
use crate::commands::{build_client_from_config, formatter_for};
use crate::formatters::{ScalingOutput, ScalingStatus};

/// Arguments for `happa scale`.
pub struct ScaleArgs<'a> {
    pub node_pool: &'a str,
    pub namespace: &'a str,
    pub min: i64,
    pub max: i64,
    pub apply: bool,
}

/// The provider sibling, if the pool has one that can be read.
async fn provider_node_pool(
    client: &HappaClient,
    node_pool: &NodePool,
) -> Option<ProviderNodePool> {
    let name = node_pool.name();
    match fetch_provider_node_pool(client, node_pool).await {
        Ok(provider) => Some(provider),
        Err(e) if Degradation::of(&e) == Degradation::NotFound => {
            debug!(node_pool = name, "No provider node pool");
            None
        }
        Err(e) => {
            warn!(node_pool = name, error = %e, "Provider node pool unavailable");
            None
        }
    }
}

pub async fn run(
    config: Config,
    args: ScaleArgs<'_>,
    output_format: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = formatter_for(output_format)?;
    let client = build_client_from_config(&config)?;

    let node_pool = cancel
        .run(fetch_node_pool(&client, args.namespace, args.node_pool, config.provider))
        .await?
        .with_context(|| {
            format!("Failed to load node pool '{}/{}'", args.namespace, args.node_pool)
        })?;
    let provider = cancel.run(provider_node_pool(&client, &node_pool)).await?;

    let current = get_node_pool_scaling(&node_pool, provider.as_ref());
    let mut editor = ScalingEditor::new(current, config.scaling);
    editor.set_bounds(args.min, args.max);

    let mut status = ScalingStatus::Preview;
    if args.apply {
        let outcome = cancel
            .run(update_node_pool_scaling(
                &client,
                &node_pool,
                provider.as_ref(),
                args.min,
                args.max,
                &config.scaling,
            ))
            .await?
            .with_context(|| format!("Failed to scale node pool '{}'", args.node_pool))?;
        status = match outcome {
            ScalingOutcome::Updated => ScalingStatus::Applied,
            ScalingOutcome::Unchanged => ScalingStatus::Unchanged,
        };
    }

    let output = ScalingOutput {
        node_pool: args.node_pool.to_string(),
        namespace: args.namespace.to_string(),
        provider: config.provider,
        current,
        proposed: editor.proposed(),
        validity: editor.validity(),
        nodes_difference: editor.nodes_difference(),
        action: editor.attributes(),
        warning: editor.warning(),
        status,
    };

    print!("{}", formatter.format_scaling(&output)?);
    Ok(())
}
