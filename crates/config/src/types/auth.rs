//! Authentication settings.
//!
//! The management API accepts a bearer token; obtaining and refreshing it
//! is done elsewhere. This module only carries the token safely.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Credentials presented to the management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token sent in the `Authorization` header.
    #[serde(with = "secret_string")]
    pub token: SecretString,
}

impl AuthConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_debug_output_redacts_token() {
        let auth = AuthConfig::new("super-secret-token");
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn test_serde_roundtrip_keeps_token() {
        let auth = AuthConfig::new("abc");
        let json = serde_json::to_string(&auth).unwrap();
        let back: AuthConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.token.expose_secret(), "abc");
    }
}
