//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//! - Pass the cancellation token through for graceful shutdown.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use anyhow::Result;
use happa_config::Config;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;
use crate::commands::scale::ScaleArgs;

pub(crate) async fn run_command(
    cli: Cli,
    config: Config,
    cancel_token: &CancellationToken,
) -> Result<()> {
    match cli.command {
        Commands::Summary {
            organization,
            check_permissions,
        } => {
            commands::summary::run(
                config,
                &organization,
                check_permissions,
                &cli.output,
                cancel_token,
            )
            .await?;
        }
        Commands::Cluster { name, namespace } => {
            commands::cluster::run(config, &name, &namespace, &cli.output, cancel_token).await?;
        }
        Commands::Permissions { namespaces } => {
            commands::permissions::run(config, &namespaces, &cli.output, cancel_token).await?;
        }
        Commands::Scale {
            node_pool,
            namespace,
            min,
            max,
            yes,
        } => {
            let args = ScaleArgs {
                node_pool: &node_pool,
                namespace: &namespace,
                min,
                max,
                apply: yes,
            };
            commands::scale::run(config, args, &cli.output, cancel_token).await?;
        }
    }

    Ok(())
}
