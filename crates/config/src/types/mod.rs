//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define the connection, authentication, provider, machine-type and
//!   scaling settings that replace ambient browser globals.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Loading from environment variables or `.env` files (see `loader` module).
//! - Parsing capability tables into machine types (see the core crate).
//!
//! Invariants:
//! - Secrets use `secrecy::SecretString` and never appear in `Debug` output.
//! - A `Config` is fully validated once built; consumers do not re-check it.

mod auth;
pub(crate) mod connection;
mod machine_types;
mod provider;
mod scaling;

pub use auth::AuthConfig;
pub use connection::{Config, ConnectionConfig};
pub use machine_types::MachineTypeSource;
pub use provider::Provider;
pub use scaling::ScalingLimits;
