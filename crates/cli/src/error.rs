//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map client, summary and scaling errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see `cancellation`).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use happa_client::ClientError;
use happa_core::{FetchError, ScalingError, SummaryError};

/// Structured exit codes for `happa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Invalid or expired token (HTTP 401).
    AuthenticationFailed = 2,

    /// Network, timeout or TLS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Cluster, node pool or release does not exist.
    NotFound = 4,

    /// Bad input, such as scaling bounds outside the allowed range.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// The token may not perform this request (HTTP 403).
    PermissionDenied = 6,

    /// Still throttled after the configured retries.
    RateLimited = 7,

    /// HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// SIGINT/Ctrl+C (128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

fn from_status(status: u16) -> ExitCode {
    match status {
        400 | 422 => ExitCode::ValidationError,
        401 => ExitCode::AuthenticationFailed,
        403 => ExitCode::PermissionDenied,
        404 => ExitCode::NotFound,
        429 => ExitCode::RateLimited,
        502..=504 => ExitCode::ServiceUnavailable,
        _ => ExitCode::GeneralError,
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::ApiError { status, .. } => from_status(*status),
            ClientError::Timeout(_) | ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::MissingToken => ExitCode::AuthenticationFailed,
            // Retries are only spent on throttling and unavailable responses.
            ClientError::MaxRetriesExceeded(_) => ExitCode::ServiceUnavailable,
            ClientError::InvalidResponse(_) | ClientError::MissingMetadata(_) => {
                ExitCode::GeneralError
            }
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else if let Some(status) = e.status() {
                    from_status(status.as_u16())
                } else {
                    ExitCode::GeneralError
                }
            }
        }
    }
}

impl From<&SummaryError> for ExitCode {
    fn from(err: &SummaryError) -> Self {
        match err {
            SummaryError::PrimaryFetch { source, .. } => Self::from(source),
            SummaryError::ClusterNotFound { .. } => ExitCode::NotFound,
            SummaryError::Catalog(_) => ExitCode::ValidationError,
        }
    }
}

impl From<&ScalingError> for ExitCode {
    fn from(err: &ScalingError) -> Self {
        match err {
            ScalingError::InvalidBounds(_) | ScalingError::UnsupportedNodePool(_) => {
                ExitCode::ValidationError
            }
            ScalingError::Client(e) => Self::from(e),
        }
    }
}

impl From<&FetchError> for ExitCode {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::Client(e) => Self::from(e),
            FetchError::MissingReference { .. } | FetchError::Unsupported { .. } => {
                ExitCode::ValidationError
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// The exit code of the first known error in the chain, or
    /// `GeneralError` if there is none.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<SummaryError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<ScalingError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<FetchError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(err);
            }
        }

        ExitCode::GeneralError
    }
}
