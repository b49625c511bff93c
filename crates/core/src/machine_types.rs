//! Purpose: Machine-type catalog mapping instance/VM type names to CPU cores and memory.
//! Responsibilities: Parse the installation's capability tables once per provider.
//! Non-scope: Does not read files or environment (see `happa_config`).
//! Invariants/Assumptions: Memory is stored in decimal bytes; a lookup miss is an error.

use std::collections::HashMap;

use happa_config::{MachineTypeSource, Provider};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const BYTES_PER_GB: f64 = 1_000_000_000.0;
const BYTES_PER_MB: u64 = 1_000_000;

/// Capacity of a single node of some machine type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineTypeProperties {
    /// CPU cores.
    pub cpu: u32,
    /// Memory in bytes.
    pub memory: u64,
}

#[derive(Debug, Deserialize)]
struct RawAwsInstanceType {
    cpu_cores: u32,
    memory_size_gb: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAzureVmSize {
    number_of_cores: u32,
    memory_in_mb: u64,
}

/// Immutable lookup table of machine types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineTypeCatalog {
    types: HashMap<String, MachineTypeProperties>,
}

impl MachineTypeCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse an AWS capability table (`cpu_cores`, `memory_size_gb`).
    pub fn from_aws_json(json: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, RawAwsInstanceType> =
            serde_json::from_str(json).map_err(|e| CatalogError::InvalidCapabilities {
                format: "AWS",
                message: e.to_string(),
            })?;

        let types = raw
            .into_iter()
            .map(|(name, props)| {
                let memory = (props.memory_size_gb.max(0.0) * BYTES_PER_GB).round() as u64;
                (
                    name,
                    MachineTypeProperties {
                        cpu: props.cpu_cores,
                        memory,
                    },
                )
            })
            .collect();
        Ok(Self { types })
    }

    /// Parse an Azure capability table (`numberOfCores`, `memoryInMb`).
    pub fn from_azure_json(json: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, RawAzureVmSize> =
            serde_json::from_str(json).map_err(|e| CatalogError::InvalidCapabilities {
                format: "Azure",
                message: e.to_string(),
            })?;

        let types = raw
            .into_iter()
            .map(|(name, props)| {
                (
                    name,
                    MachineTypeProperties {
                        cpu: props.number_of_cores,
                        memory: props.memory_in_mb.saturating_mul(BYTES_PER_MB),
                    },
                )
            })
            .collect();
        Ok(Self { types })
    }

    /// Build the catalog for a provider from the configured tables.
    ///
    /// AWS and CAPA read the AWS table, Azure the Azure table. GCP has no
    /// table format of its own and gets whatever tables are configured.
    pub fn for_provider(
        provider: Provider,
        source: &MachineTypeSource,
    ) -> Result<Self, CatalogError> {
        let aws = || {
            source
                .aws_capabilities
                .as_deref()
                .map(Self::from_aws_json)
                .transpose()
        };
        let azure = || {
            source
                .azure_capabilities
                .as_deref()
                .map(Self::from_azure_json)
                .transpose()
        };

        let catalog = match provider {
            Provider::Aws | Provider::Capa => aws()?.unwrap_or_default(),
            Provider::Azure => azure()?.unwrap_or_default(),
            Provider::Gcp => {
                let mut merged = aws()?.unwrap_or_default();
                if let Some(other) = azure()? {
                    merged.types.extend(other.types);
                }
                merged
            }
        };

        tracing::debug!(
            provider = %provider,
            machine_types = catalog.len(),
            "Loaded machine-type catalog"
        );
        Ok(catalog)
    }

    /// Add a type. Intended for building catalogs in code and tests.
    pub fn with_type(mut self, name: impl Into<String>, properties: MachineTypeProperties) -> Self {
        self.types.insert(name.into(), properties);
        self
    }

    pub fn lookup(&self, name: &str) -> Result<&MachineTypeProperties, CatalogError> {
        self.types
            .get(name)
            .ok_or_else(|| CatalogError::UnknownMachineType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AWS: &str = r#"{
        "m5.xlarge": {"cpu_cores": 4, "memory_size_gb": 16, "description": "M5 Extra Large"},
        "t2.nano": {"cpu_cores": 1, "memory_size_gb": 0.5}
    }"#;

    const AZURE: &str = r#"{
        "Standard_D4s_v3": {"numberOfCores": 4, "memoryInMb": 16384, "maxDataDiskCount": 8}
    }"#;

    #[test]
    fn test_aws_table_in_bytes() {
        let catalog = MachineTypeCatalog::from_aws_json(AWS).unwrap();
        assert_eq!(
            catalog.lookup("m5.xlarge").unwrap(),
            &MachineTypeProperties {
                cpu: 4,
                memory: 16_000_000_000
            }
        );
        assert_eq!(catalog.lookup("t2.nano").unwrap().memory, 500_000_000);
    }

    #[test]
    fn test_azure_table_in_bytes() {
        let catalog = MachineTypeCatalog::from_azure_json(AZURE).unwrap();
        assert_eq!(
            catalog.lookup("Standard_D4s_v3").unwrap(),
            &MachineTypeProperties {
                cpu: 4,
                memory: 16_384_000_000
            }
        );
    }

    #[test]
    fn test_lookup_miss_is_error() {
        let catalog = MachineTypeCatalog::from_aws_json(AWS).unwrap();
        assert_eq!(
            catalog.lookup("m5.mega"),
            Err(CatalogError::UnknownMachineType("m5.mega".to_string()))
        );
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = MachineTypeCatalog::from_azure_json("[1,2]").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidCapabilities { format: "Azure", .. }
        ));
    }

    #[test]
    fn test_for_provider_picks_table() {
        let source = MachineTypeSource {
            aws_capabilities: Some(AWS.to_string()),
            azure_capabilities: Some(AZURE.to_string()),
        };

        let aws = MachineTypeCatalog::for_provider(Provider::Capa, &source).unwrap();
        assert!(aws.contains("m5.xlarge"));
        assert!(!aws.contains("Standard_D4s_v3"));

        let azure = MachineTypeCatalog::for_provider(Provider::Azure, &source).unwrap();
        assert_eq!(azure.len(), 1);

        let gcp = MachineTypeCatalog::for_provider(Provider::Gcp, &source).unwrap();
        assert_eq!(gcp.len(), 3);

        let none = MachineTypeCatalog::for_provider(Provider::Aws, &MachineTypeSource::default())
            .unwrap();
        assert!(none.is_empty());
    }
}
