//! Management API client.
//!
//! This module provides the primary [`HappaClient`] for reading and writing
//! cluster-scoped and namespaced resources on the management API.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - [`cache`]: Response caching for reads
//! - `resources`: Typed list/get/patch methods
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Aggregation of resources into summaries (see the `happa-core` crate)
//!
//! # Invariants
//! - Reads go through the response cache when the path's policy allows it
//! - Every write invalidates cached reads of the written kind

pub mod builder;
pub mod cache;
mod resources;

use secrecy::SecretString;

use crate::metrics::MetricsCollector;
use cache::ResponseCache;

/// Management API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use happa_client::HappaClient;
/// use secrecy::SecretString;
///
/// let client = HappaClient::builder()
///     .base_url("https://api.g8s.example.io".to_string())
///     .token(SecretString::from("my-token"))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct HappaClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) token: SecretString,
    pub(crate) max_retries: usize,
    pub(crate) metrics: Option<MetricsCollector>,
    pub(crate) cache: ResponseCache,
}

impl HappaClient {
    /// Create a new client builder.
    pub fn builder() -> builder::HappaClientBuilder {
        builder::HappaClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    fn token() -> SecretString {
        SecretString::from("test-token")
    }

    #[test]
    fn test_client_builder_with_token() {
        let client = HappaClient::builder()
            .base_url("https://api.g8s.example.io".to_string())
            .token(token())
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://api.g8s.example.io");
    }

    #[test]
    fn test_client_builder_missing_base_url() {
        let client = HappaClient::builder().token(token()).build();
        assert!(matches!(client.unwrap_err(), ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_client_builder_missing_token() {
        let client = HappaClient::builder()
            .base_url("https://api.g8s.example.io".to_string())
            .build();
        assert!(matches!(client.unwrap_err(), ClientError::MissingToken));
    }

    #[test]
    fn test_skip_verify_with_http_url() {
        // Logs a warning, still builds.
        let client = HappaClient::builder()
            .base_url("http://localhost:8080".to_string())
            .token(token())
            .skip_verify(true)
            .build();

        assert!(client.is_ok());
    }
}
