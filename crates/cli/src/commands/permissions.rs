//! Permission review command.

use anyhow::{Context, Result};
use happa_config::Config;
use happa_core::permissions::{PermissionSnapshot, fetch_permission_map};

use crate::cancellation::CancellationToken;
use crate::commands::{build_client_from_config, formatter_for};
use crate::formatters::NamespacePermissionsOutput;

pub async fn run(
    config: Config,
    namespaces: &[String],
    output_format: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let formatter = formatter_for(output_format)?;
    let client = build_client_from_config(&config)?;

    let map = cancel.run(fetch_permission_map(&client, namespaces)).await?;
    if map.is_empty() {
        // Every review failed; re-run one to surface why.
        if let Some(namespace) = namespaces.first() {
            cancel
                .run(client.review_permissions(namespace))
                .await?
                .with_context(|| format!("Failed to review permissions in '{}'", namespace))?;
        }
    }

    let entries: Vec<_> = namespaces
        .iter()
        .map(|namespace| NamespacePermissionsOutput {
            namespace: namespace.clone(),
            reviewed: map.contains_key(namespace),
            permissions: PermissionSnapshot::compute(&map, config.provider, namespace),
        })
        .collect();

    print!("{}", formatter.format_permissions(&entries)?);
    Ok(())
}
