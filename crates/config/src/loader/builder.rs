//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration.
//! - Build and validate the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables, as long as
//!   they are applied after `from_env()`.
//! - Inline capability JSON takes precedence over a capabilities file.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use crate::types::{
    AuthConfig, Config, ConnectionConfig, MachineTypeSource, Provider, ScalingLimits,
};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    token: Option<SecretString>,
    provider: Option<Provider>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    aws_capabilities: Option<String>,
    aws_capabilities_file: Option<PathBuf>,
    azure_capabilities: Option<String>,
    azure_capabilities_file: Option<PathBuf>,
    min_nodes: Option<i64>,
    max_nodes: Option<i64>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DotenvParse` for invalid syntax and
    /// `ConfigError::DotenvIo` when the file exists but cannot be read.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from `HAPPA_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the installation's provider.
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the AWS capability table as inline JSON.
    pub fn with_aws_capabilities(mut self, json: String) -> Self {
        self.aws_capabilities = Some(json);
        self
    }

    /// Read the AWS capability table from a file at build time.
    pub fn with_aws_capabilities_file(mut self, path: PathBuf) -> Self {
        self.aws_capabilities_file = Some(path);
        self
    }

    /// Set the Azure capability table as inline JSON.
    pub fn with_azure_capabilities(mut self, json: String) -> Self {
        self.azure_capabilities = Some(json);
        self
    }

    /// Read the Azure capability table from a file at build time.
    pub fn with_azure_capabilities_file(mut self, path: PathBuf) -> Self {
        self.azure_capabilities_file = Some(path);
        self
    }

    /// Set the platform-wide node pool scaling bounds.
    pub fn with_scaling_limits(mut self, min_nodes: i64, max_nodes: i64) -> Self {
        self.min_nodes = Some(min_nodes);
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let token = self.token.ok_or(ConfigError::MissingToken)?;
        let provider = self.provider.ok_or(ConfigError::MissingProvider)?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        };
        Self::validate_timeout(&connection)?;

        let defaults = ScalingLimits::default();
        let scaling = ScalingLimits {
            min_nodes: self.min_nodes.unwrap_or(defaults.min_nodes),
            max_nodes: self.max_nodes.unwrap_or(defaults.max_nodes),
        };
        Self::validate_scaling(&scaling)?;

        let machine_types = MachineTypeSource {
            aws_capabilities: resolve_capabilities(
                self.aws_capabilities,
                self.aws_capabilities_file.as_deref(),
            )?,
            azure_capabilities: resolve_capabilities(
                self.azure_capabilities,
                self.azure_capabilities_file.as_deref(),
            )?,
        };

        Ok(Config {
            connection,
            auth: AuthConfig { token },
            provider,
            machine_types,
            scaling,
        })
    }

    fn validate_timeout(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }

    fn validate_scaling(scaling: &ScalingLimits) -> Result<(), ConfigError> {
        if scaling.min_nodes < 0 {
            return Err(ConfigError::InvalidScalingLimits {
                message: format!("minimum must not be negative (got {})", scaling.min_nodes),
            });
        }
        if scaling.min_nodes > scaling.max_nodes {
            return Err(ConfigError::InvalidScalingLimits {
                message: format!(
                    "minimum ({}) must not exceed maximum ({})",
                    scaling.min_nodes, scaling.max_nodes
                ),
            });
        }
        Ok(())
    }

    // Internal setters for use by env.rs

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub(crate) fn set_provider(&mut self, provider: Option<Provider>) {
        self.provider = provider;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_aws_capabilities(&mut self, json: Option<String>) {
        self.aws_capabilities = json;
    }

    pub(crate) fn set_aws_capabilities_file(&mut self, path: Option<PathBuf>) {
        self.aws_capabilities_file = path;
    }

    pub(crate) fn set_azure_capabilities(&mut self, json: Option<String>) {
        self.azure_capabilities = json;
    }

    pub(crate) fn set_azure_capabilities_file(&mut self, path: Option<PathBuf>) {
        self.azure_capabilities_file = path;
    }

    pub(crate) fn set_min_nodes(&mut self, min: Option<i64>) {
        self.min_nodes = min;
    }

    pub(crate) fn set_max_nodes(&mut self, max: Option<i64>) {
        self.max_nodes = max;
    }
}

fn resolve_capabilities(
    inline: Option<String>,
    file: Option<&Path>,
) -> Result<Option<String>, ConfigError> {
    if inline.is_some() {
        return Ok(inline);
    }
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map(Some)
            .map_err(|source| ConfigError::CapabilitiesRead {
                path: path.to_path_buf(),
                source,
            }),
        None => Ok(None),
    }
}

/// Validate and normalize a base URL.
///
/// Requires an absolute http(s) URL with a host; strips any trailing slash.
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://api.g8s.example.io): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://api.g8s.example.io)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
