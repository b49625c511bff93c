//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON

#[allow(unused_imports)]
pub use happa_client::testing::{load_fixture, resource_list, status_body};
#[allow(unused_imports)]
pub use happa_client::{HappaClient, ListOptions, LabelSelector, ResponseCache};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// A client pointed at the mock server with a fresh cache and no retries.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> HappaClient {
    client_with(server, ResponseCache::with_capacity(100), 0)
}

#[allow(dead_code)]
pub fn client_with(server: &MockServer, cache: ResponseCache, max_retries: usize) -> HappaClient {
    HappaClient::builder()
        .base_url(server.uri())
        .token(secrecy::SecretString::from("test-token"))
        .max_retries(max_retries)
        .cache(cache)
        .build()
        .expect("client builds")
}
