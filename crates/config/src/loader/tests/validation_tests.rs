//! Validation tests for the configuration loader.

use crate::constants::MAX_TIMEOUT_SECS;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::Provider;
use std::time::Duration;

fn loader_with_url(url: &str) -> ConfigLoader {
    ConfigLoader::new()
        .with_base_url(url.to_string())
        .with_token("t".to_string())
        .with_provider(Provider::Gcp)
}

#[test]
fn test_rejects_non_http_scheme() {
    let err = loader_with_url("ftp://api.example.io").build().unwrap_err();
    match err {
        ConfigError::InvalidValue { var, message } => {
            assert_eq!(var, "base_url");
            assert!(message.contains("ftp"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_rejects_relative_url() {
    let err = loader_with_url("api.example.io").build().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_rejects_whitespace_url_as_missing() {
    let err = loader_with_url("   ").build().unwrap_err();
    assert!(matches!(err, ConfigError::MissingBaseUrl));
}

#[test]
fn test_rejects_zero_timeout() {
    let err = loader_with_url("https://api.example.io")
        .with_timeout(Duration::from_secs(0))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
}

#[test]
fn test_rejects_excessive_timeout() {
    let err = loader_with_url("https://api.example.io")
        .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS + 1))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
}

#[test]
fn test_rejects_inverted_scaling_limits() {
    let err = loader_with_url("https://api.example.io")
        .with_scaling_limits(10, 5)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidScalingLimits { .. }));
}

#[test]
fn test_rejects_negative_scaling_minimum() {
    let err = loader_with_url("https://api.example.io")
        .with_scaling_limits(-1, 5)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidScalingLimits { .. }));
}
