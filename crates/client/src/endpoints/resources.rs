//! Generic list/get/patch endpoints for resource kinds.
//!
//! Responsibilities:
//! - Build resource URLs and label-selector queries.
//! - Issue requests through `send_request_with_retry`.
//! - Decode response bodies into typed resources.
//!
//! Does NOT handle:
//! - Response caching (see `crate::client::cache`).
//! - Any aggregation logic.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::endpoints::paths::{collection_path, object_path};
use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{Resource, ResourceList};

/// Label selector in the Kubernetes string form (`a=b,c`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    terms: Vec<String>,
}

impl LabelSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key=value`.
    pub fn eq(mut self, key: &str, value: &str) -> Self {
        self.terms.push(format!("{key}={value}"));
        self
    }

    /// Require the label to exist, whatever its value.
    pub fn exists(mut self, key: &str) -> Self {
        self.terms.push(key.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl std::fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.terms.join(","))
    }
}

/// Options for a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub namespace: Option<String>,
    pub label_selector: Option<LabelSelector>,
}

impl ListOptions {
    pub fn in_namespace(namespace: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            label_selector: None,
        }
    }

    pub fn with_selector(mut self, selector: LabelSelector) -> Self {
        self.label_selector = Some(selector);
        self
    }

    /// Query parameters for the request.
    pub fn query_params(&self) -> Vec<(String, String)> {
        match &self.label_selector {
            Some(selector) if !selector.is_empty() => {
                vec![("labelSelector".to_string(), selector.to_string())]
            }
            _ => Vec::new(),
        }
    }
}

/// Decode a JSON body, mapping failures to `InvalidResponse`.
pub fn parse_body<T: DeserializeOwned>(body: &[u8], url: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        ClientError::InvalidResponse(format!("failed to decode response from {url}: {e}"))
    })
}

/// GET a URL and return the raw body bytes.
#[allow(clippy::too_many_arguments)]
pub async fn get_raw(
    client: &Client,
    url: &str,
    auth_token: &str,
    query_params: &[(String, String)],
    max_retries: usize,
    resource: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<u8>> {
    debug!(url, ?query_params, "GET");
    let builder = client
        .get(url)
        .bearer_auth(auth_token)
        .header("Accept", "application/json")
        .query(query_params);
    let response = send_request_with_retry(builder, max_retries, resource, "GET", metrics).await?;
    Ok(response.bytes().await?.to_vec())
}

/// List resources of a kind.
pub async fn list_resources<R: Resource>(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    options: &ListOptions,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<ResourceList<R>> {
    let url = format!(
        "{}{}",
        base_url,
        collection_path::<R>(options.namespace.as_deref())
    );
    let body = get_raw(
        client,
        &url,
        auth_token,
        &options.query_params(),
        max_retries,
        R::PLURAL,
        metrics,
    )
    .await?;
    parse_body(&body, &url)
}

/// Get a single resource by name.
pub async fn get_resource<R: Resource>(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    namespace: Option<&str>,
    name: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<R> {
    let url = format!("{}{}", base_url, object_path::<R>(namespace, name));
    let body = get_raw(client, &url, auth_token, &[], max_retries, R::PLURAL, metrics).await?;
    parse_body(&body, &url)
}

/// Apply a JSON merge patch to a resource and return the updated object.
#[allow(clippy::too_many_arguments)]
pub async fn patch_resource<R: Resource>(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    namespace: Option<&str>,
    name: &str,
    patch: &serde_json::Value,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<R> {
    let url = format!("{}{}", base_url, object_path::<R>(namespace, name));
    debug!(url, kind = R::KIND, "PATCH");
    let body = serde_json::to_vec(patch)
        .map_err(|e| ClientError::InvalidResponse(format!("failed to encode patch: {e}")))?;
    let builder = client
        .patch(&url)
        .bearer_auth(auth_token)
        .header("Content-Type", "application/merge-patch+json")
        .header("Accept", "application/json")
        .body(body);
    let response =
        send_request_with_retry(builder, max_retries, R::PLURAL, "PATCH", metrics).await?;
    let bytes = response.bytes().await?;
    parse_body(&bytes, &url)
}

/// Create a resource and return the object echoed by the server.
pub async fn create_resource<R: Resource>(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    namespace: Option<&str>,
    resource: &R,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<R> {
    let url = format!("{}{}", base_url, collection_path::<R>(namespace));
    debug!(url, kind = R::KIND, "POST");
    let builder = client
        .post(&url)
        .bearer_auth(auth_token)
        .header("Accept", "application/json")
        .json(resource);
    let response =
        send_request_with_retry(builder, max_retries, R::PLURAL, "POST", metrics).await?;
    let bytes = response.bytes().await?;
    parse_body(&bytes, &url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_selector_display() {
        let selector = LabelSelector::new()
            .eq("cluster.x-k8s.io/cluster-name", "a1b2c")
            .exists("cluster.x-k8s.io/control-plane");
        assert_eq!(
            selector.to_string(),
            "cluster.x-k8s.io/cluster-name=a1b2c,cluster.x-k8s.io/control-plane"
        );
    }

    #[test]
    fn test_query_params_skip_empty_selector() {
        let options = ListOptions::in_namespace("org-acme").with_selector(LabelSelector::new());
        assert!(options.query_params().is_empty());

        let options = ListOptions::in_namespace("org-acme")
            .with_selector(LabelSelector::new().eq("giantswarm.io/cluster", "x"));
        assert_eq!(
            options.query_params(),
            vec![(
                "labelSelector".to_string(),
                "giantswarm.io/cluster=x".to_string()
            )]
        );
    }

    #[test]
    fn test_parse_body_reports_url() {
        let err = parse_body::<serde_json::Value>(b"not json", "https://x/y").unwrap_err();
        match err {
            ClientError::InvalidResponse(message) => assert!(message.contains("https://x/y")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
