//! Connection configuration and the top-level `Config` struct.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeout, retries).
//! - Define the main `Config` structure combining every settings group.
//! - Provide serialization helpers for `Duration`.
//!
//! Invariants:
//! - Duration fields are serialized as whole seconds.
//! - Defaults come from `crate::constants`, not magic numbers.

use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::types::auth::AuthConfig;
use crate::types::machine_types::MachineTypeSource;
use crate::types::provider::Provider;
use crate::types::scaling::ScalingLimits;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection settings for the management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the management API (e.g. https://api.g8s.example.io)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for throttled or unavailable responses
    pub max_retries: usize,
}

impl ConnectionConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Everything the client and the aggregation core need at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
    /// Infrastructure provider of the installation.
    pub provider: Provider,
    #[serde(default)]
    pub machine_types: MachineTypeSource,
    #[serde(default)]
    pub scaling: ScalingLimits,
}

impl Config {
    /// Build a config with defaults for everything but the essentials.
    pub fn with_token(
        base_url: impl Into<String>,
        token: impl Into<String>,
        provider: Provider,
    ) -> Self {
        Self {
            connection: ConnectionConfig::new(base_url),
            auth: AuthConfig::new(token),
            provider,
            machine_types: MachineTypeSource::default(),
            scaling: ScalingLimits::default(),
        }
    }
}
