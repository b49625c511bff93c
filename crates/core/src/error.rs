//! Purpose: Error types and degradation policy for the aggregation core.
//! Responsibilities: Classify fetch failures as forbidden, not found or anomaly.
//! Non-scope: Does not report errors (see `reporter`) or map exit codes.
//! Invariants/Assumptions: Only `SummaryError` variants abort a computation.

use happa_client::ClientError;
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors from the machine-type catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A node references an instance type absent from the catalog.
    #[error("Invalid machine type: {0}")]
    UnknownMachineType(String),

    /// A capabilities table could not be parsed.
    #[error("Invalid {format} capabilities: {message}")]
    InvalidCapabilities {
        format: &'static str,
        message: String,
    },
}

/// Errors that abort a summary computation.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The primary resource list (usually clusters) could not be loaded.
    #[error("Failed to load {resource}: {source}")]
    PrimaryFetch {
        resource: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("Cluster {namespace}/{name} not found")]
    ClusterNotFound { namespace: String, name: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors from a single provider-specific fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// An object lacks the reference needed to find its sibling.
    #[error("{kind} {name} has no {reference} reference")]
    MissingReference {
        kind: &'static str,
        name: String,
        reference: &'static str,
    },

    #[error("Unsupported {what}: {kind}")]
    Unsupported { what: &'static str, kind: String },
}

/// Errors from scaling a node pool.
#[derive(Debug, Error)]
pub enum ScalingError {
    #[error("Invalid scaling bounds: {0}")]
    InvalidBounds(String),

    #[error("Node pool {0} has no provider node pool that stores scaling limits")]
    UnsupportedNodePool(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// How a failed fetch affects the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// 403: the caller may not read this kind. Field is unknown.
    Forbidden,
    /// 404: the kind or object does not exist on this installation. Field is unknown.
    NotFound,
    /// Anything else. Field is unknown.
    Anomaly,
}

impl Degradation {
    pub fn of_client_error(error: &ClientError) -> Self {
        if error.is_forbidden() {
            Self::Forbidden
        } else if error.is_not_found() {
            Self::NotFound
        } else {
            Self::Anomaly
        }
    }

    pub fn of(error: &FetchError) -> Self {
        match error {
            FetchError::Client(e) => Self::of_client_error(e),
            FetchError::MissingReference { .. } | FetchError::Unsupported { .. } => Self::Anomaly,
        }
    }

    /// Whether the error collector should hear about it.
    ///
    /// Not-found is a known capability gap of an installation, not an anomaly.
    pub fn is_reported(self) -> bool {
        !matches!(self, Self::NotFound)
    }
}
