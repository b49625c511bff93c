//! Infrastructure provider of an installation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider family an installation runs on.
///
/// `Aws` is the Giant Swarm vintage AWS flavour; `Capa` is Cluster API for AWS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
    Capa,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
            Provider::Capa => "capa",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(Provider::Aws),
            "azure" => Ok(Provider::Azure),
            "gcp" => Ok(Provider::Gcp),
            "capa" => Ok(Provider::Capa),
            other => Err(format!(
                "unknown provider '{other}' (expected aws, azure, gcp or capa)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("AWS".parse::<Provider>().unwrap(), Provider::Aws);
        assert_eq!(" Azure ".parse::<Provider>().unwrap(), Provider::Azure);
        assert_eq!("capa".parse::<Provider>().unwrap(), Provider::Capa);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "openstack".parse::<Provider>().unwrap_err();
        assert!(err.contains("openstack"));
    }

    #[test]
    fn test_display_matches_serde_name() {
        for provider in [Provider::Aws, Provider::Azure, Provider::Gcp, Provider::Capa] {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider));
        }
    }
}
