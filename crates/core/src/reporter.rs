//! Purpose: Side channel for anomalies found while aggregating.
//! Responsibilities: Define the [`ErrorReporter`] seam plus tracing and recording implementations.
//! Non-scope: Does not decide what is reported (see `error::Degradation`).
//! Invariants/Assumptions: Implementations never panic and never block.

use std::sync::Mutex;

use thiserror::Error;
use tracing::error;

/// An anomaly forwarded to the error collector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportedError {
    /// A fetch failed with something other than not-found.
    #[error("{context}: {message}")]
    Fetch {
        context: String,
        status: Option<u16>,
        message: String,
    },

    /// A node references a machine type the catalog does not know.
    #[error("{context}: invalid machine type {machine_type:?}")]
    InvalidMachineType {
        context: String,
        machine_type: String,
    },

    /// A running node has no instance type to look up.
    #[error("{context}: no machine type")]
    MissingMachineType { context: String },
}

impl ReportedError {
    pub fn fetch(context: impl Into<String>, error: &crate::error::FetchError) -> Self {
        let status = match error {
            crate::error::FetchError::Client(e) => e.status(),
            _ => None,
        };
        Self::Fetch {
            context: context.into(),
            status,
            message: error.to_string(),
        }
    }

    pub fn client(context: impl Into<String>, error: &happa_client::ClientError) -> Self {
        Self::Fetch {
            context: context.into(),
            status: error.status(),
            message: error.to_string(),
        }
    }
}

/// Error collector capability.
pub trait ErrorReporter: Send + Sync {
    fn notify(&self, error: &ReportedError);
}

/// Logs every notification with `tracing::error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn notify(&self, error: &ReportedError) {
        match error {
            ReportedError::Fetch {
                context,
                status,
                message,
            } => error!(context = %context, status = ?status, message = %message, "Fetch failed"),
            ReportedError::InvalidMachineType {
                context,
                machine_type,
            } => error!(context = %context, machine_type = %machine_type, "Invalid machine type"),
            ReportedError::MissingMachineType { context } => {
                error!(context = %context, "Missing machine type")
            }
        }
    }
}

/// Stores notifications in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    errors: Mutex<Vec<ReportedError>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<ReportedError> {
        self.errors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.errors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for RecordingReporter {
    fn notify(&self, error: &ReportedError) {
        self.errors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(error.clone());
    }
}
