//! Raw machine-type capability tables.
//!
//! The installation publishes its instance types as JSON documents, one
//! format per provider. This crate only carries the raw text; the core
//! crate parses it into an immutable catalog.

use serde::{Deserialize, Serialize};

/// Capability JSON documents for the installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineTypeSource {
    /// `{"m5.xlarge": {"cpu_cores": 4, "memory_size_gb": 16, ...}, ...}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_capabilities: Option<String>,
    /// `{"Standard_D4s_v3": {"numberOfCores": 4, "memoryInMb": 16384, ...}, ...}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_capabilities: Option<String>,
}
