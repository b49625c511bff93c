//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Bind global options to their `HAPPA_*` environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build the configuration (see `main`).

use clap::{Parser, Subcommand};
use happa_config::Provider;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "happa")]
#[command(about = "Happa CLI - Capacity summaries and node pool scaling", long_about = None)]
#[command(version)]
#[command(after_help = concat!(
    "Examples:\n",
    "  happa summary --organization acme\n",
    "  happa cluster a1b2c --namespace org-acme -o json\n",
    "  happa permissions --namespace org-acme --namespace org-globex\n",
    "  happa scale p4d7e --namespace org-acme --min 3 --max 10 --yes\n",
))]
pub struct Cli {
    /// Base URL of the management API (e.g., https://api.g8s.example.io)
    #[arg(short, long, global = true, env = "HAPPA_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token for the management API
    #[arg(short, long, global = true, env = "HAPPA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Infrastructure provider of the installation (aws, azure, gcp, capa)
    #[arg(short, long, global = true, env = "HAPPA_PROVIDER")]
    pub provider: Option<Provider>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "HAPPA_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for throttled requests
    #[arg(long, global = true, env = "HAPPA_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "HAPPA_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// AWS instance type capabilities JSON file
    #[arg(long, global = true, env = "HAPPA_AWS_CAPABILITIES_FILE")]
    pub aws_capabilities_file: Option<PathBuf>,

    /// Azure VM size capabilities JSON file
    #[arg(long, global = true, env = "HAPPA_AZURE_CAPABILITIES_FILE")]
    pub azure_capabilities_file: Option<PathBuf>,

    /// Output format (json, table)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize the clusters, releases and apps of an organization
    Summary {
        /// Organization name or its `org-` namespace
        #[arg(long)]
        organization: String,

        /// Review permissions first and skip fetches the caller may not make
        #[arg(long)]
        check_permissions: bool,
    },

    /// Show the node capacity of one cluster
    Cluster {
        /// Cluster name
        name: String,

        /// Namespace the cluster lives in
        #[arg(short, long)]
        namespace: String,
    },

    /// Show what the caller may do with summary resources
    Permissions {
        /// Namespaces to review (repeatable)
        #[arg(short, long = "namespace", required = true)]
        namespaces: Vec<String>,
    },

    /// Preview or apply new autoscaler bounds for a node pool
    Scale {
        /// Node pool name
        node_pool: String,

        /// Namespace the node pool lives in
        #[arg(short, long)]
        namespace: String,

        /// New minimum number of nodes
        #[arg(long)]
        min: i64,

        /// New maximum number of nodes
        #[arg(long)]
        max: i64,

        /// Apply the change instead of only previewing it
        #[arg(short, long)]
        yes: bool,
    },
}
