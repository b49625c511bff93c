//! Environment variable tests for the configuration loader.

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::Provider;
use secrecy::ExposeSecret;
use serial_test::serial;
use std::time::Duration;

use super::env_lock;

const ALL_VARS: [&str; 12] = [
    "HAPPA_BASE_URL",
    "HAPPA_TOKEN",
    "HAPPA_PROVIDER",
    "HAPPA_SKIP_VERIFY",
    "HAPPA_TIMEOUT",
    "HAPPA_MAX_RETRIES",
    "HAPPA_AWS_CAPABILITIES",
    "HAPPA_AWS_CAPABILITIES_FILE",
    "HAPPA_AZURE_CAPABILITIES",
    "HAPPA_AZURE_CAPABILITIES_FILE",
    "HAPPA_MIN_NODES_PER_POOL",
    "HAPPA_MAX_NODES_PER_POOL",
];

fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let mut all: Vec<(&str, Option<&str>)> = ALL_VARS.iter().map(|k| (*k, None)).collect();
    for (key, value) in vars {
        all.retain(|(k, _)| k != key);
        all.push((key, Some(value)));
    }
    temp_env::with_vars(all, f);
}

#[test]
#[serial]
fn test_from_env_reads_all_values() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[
            ("HAPPA_BASE_URL", "https://api.g8s.example.io"),
            ("HAPPA_TOKEN", "env-token"),
            ("HAPPA_PROVIDER", "azure"),
            ("HAPPA_SKIP_VERIFY", "true"),
            ("HAPPA_TIMEOUT", "12"),
            ("HAPPA_MAX_RETRIES", "2"),
            ("HAPPA_AZURE_CAPABILITIES", "{}"),
            ("HAPPA_MIN_NODES_PER_POOL", "1"),
            ("HAPPA_MAX_NODES_PER_POOL", "50"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.connection.base_url, "https://api.g8s.example.io");
            assert_eq!(config.auth.token.expose_secret(), "env-token");
            assert_eq!(config.provider, Provider::Azure);
            assert!(config.connection.skip_verify);
            assert_eq!(config.connection.timeout, Duration::from_secs(12));
            assert_eq!(config.connection.max_retries, 2);
            assert_eq!(config.machine_types.azure_capabilities.as_deref(), Some("{}"));
            assert_eq!(config.scaling.min_nodes, 1);
            assert_eq!(config.scaling.max_nodes, 50);
        },
    );
}

#[test]
#[serial]
fn test_builder_overrides_env() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[
            ("HAPPA_BASE_URL", "https://env.example.io"),
            ("HAPPA_TOKEN", "env-token"),
            ("HAPPA_PROVIDER", "aws"),
        ],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .with_base_url("https://flag.example.io".to_string())
                .with_provider(Provider::Capa)
                .build()
                .unwrap();

            assert_eq!(config.connection.base_url, "https://flag.example.io");
            assert_eq!(config.provider, Provider::Capa);
        },
    );
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[
            ("HAPPA_BASE_URL", "https://api.example.io"),
            ("HAPPA_TOKEN", "   "),
            ("HAPPA_PROVIDER", "aws"),
        ],
        || {
            let result = ConfigLoader::new().from_env().unwrap().build();
            assert!(matches!(result, Err(ConfigError::MissingToken)));
        },
    );
}

#[test]
#[serial]
fn test_invalid_provider_env() {
    let _lock = env_lock().lock().unwrap();

    with_env(&[("HAPPA_PROVIDER", "kvm")], || {
        let err = ConfigLoader::new().from_env().err().unwrap();
        match err {
            ConfigError::InvalidValue { var, .. } => assert_eq!(var, "HAPPA_PROVIDER"),
            other => panic!("unexpected error: {other:?}"),
        }
    });
}

#[test]
#[serial]
fn test_invalid_numeric_env() {
    let _lock = env_lock().lock().unwrap();

    with_env(&[("HAPPA_TIMEOUT", "soon")], || {
        let err = ConfigLoader::new().from_env().err().unwrap();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "HAPPA_TIMEOUT"));
    });

    with_env(&[("HAPPA_MAX_RETRIES", "99")], || {
        let err = ConfigLoader::new().from_env().err().unwrap();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref var, .. } if var == "HAPPA_MAX_RETRIES"
        ));
    });
}

#[test]
#[serial]
fn test_dotenv_disabled_is_noop() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars([("DOTENV_DISABLED", Some("1"))], || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}
