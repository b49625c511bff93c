//! Error types for configuration loading.
//!
//! Invariants:
//! - Variants carry the variable name or path needed to fix the problem.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Base URL is required. Set HAPPA_BASE_URL or pass --base-url.")]
    MissingBaseUrl,

    #[error("An API token is required. Set HAPPA_TOKEN or pass --token.")]
    MissingToken,

    #[error("A provider is required. Set HAPPA_PROVIDER to aws, azure, gcp or capa.")]
    MissingProvider,

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },

    #[error("invalid node pool scaling limits: {message}")]
    InvalidScalingLimits { message: String },

    #[error("Failed to read capabilities file at {path}")]
    CapabilitiesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// Only the byte index of the failure is kept, never the line content.
    #[error(
        "Failed to parse .env file at position {error_index}. \
         Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
