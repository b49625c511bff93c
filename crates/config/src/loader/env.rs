//! Environment variable parsing for configuration.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid numeric or boolean values return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::MAX_MAX_RETRIES;
use crate::types::Provider;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, raw: &str, expected: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: expected.to_string(),
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("HAPPA_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(token) = env_var_or_none("HAPPA_TOKEN") {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if let Some(provider) = env_var_or_none("HAPPA_PROVIDER") {
        let provider = Provider::from_str(&provider).map_err(|message| {
            ConfigError::InvalidValue {
                var: "HAPPA_PROVIDER".to_string(),
                message,
            }
        })?;
        loader.set_provider(Some(provider));
    }
    if let Some(skip) = env_var_or_none("HAPPA_SKIP_VERIFY") {
        loader.set_skip_verify(Some(parse_env(
            "HAPPA_SKIP_VERIFY",
            &skip,
            "must be true or false",
        )?));
    }
    if let Some(timeout) = env_var_or_none("HAPPA_TIMEOUT") {
        let secs: u64 = parse_env("HAPPA_TIMEOUT", &timeout, "must be a number")?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = env_var_or_none("HAPPA_MAX_RETRIES") {
        let value: usize = parse_env(
            "HAPPA_MAX_RETRIES",
            &retries,
            "must be a non-negative integer",
        )?;
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidValue {
                var: "HAPPA_MAX_RETRIES".to_string(),
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.set_max_retries(Some(value));
    }
    if let Some(json) = env_var_or_none("HAPPA_AWS_CAPABILITIES") {
        loader.set_aws_capabilities(Some(json));
    }
    if let Some(path) = env_var_or_none("HAPPA_AWS_CAPABILITIES_FILE") {
        loader.set_aws_capabilities_file(Some(PathBuf::from(path)));
    }
    if let Some(json) = env_var_or_none("HAPPA_AZURE_CAPABILITIES") {
        loader.set_azure_capabilities(Some(json));
    }
    if let Some(path) = env_var_or_none("HAPPA_AZURE_CAPABILITIES_FILE") {
        loader.set_azure_capabilities_file(Some(PathBuf::from(path)));
    }
    if let Some(min) = env_var_or_none("HAPPA_MIN_NODES_PER_POOL") {
        loader.set_min_nodes(Some(parse_env(
            "HAPPA_MIN_NODES_PER_POOL",
            &min,
            "must be an integer",
        )?));
    }
    if let Some(max) = env_var_or_none("HAPPA_MAX_NODES_PER_POOL") {
        loader.set_max_nodes(Some(parse_env(
            "HAPPA_MAX_NODES_PER_POOL",
            &max,
            "must be an integer",
        )?));
    }

    Ok(())
}
