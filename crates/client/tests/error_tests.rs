//! Error mapping tests.
//!
//! # Invariants
//! - 403 and 404 surface as `ApiError` carrying the `Status.reason`
//! - 500 is not retried
//! - Throttling that outlasts the retry budget yields `MaxRetriesExceeded`
//! - Undecodable bodies yield `InvalidResponse`

mod common;

use common::*;
use happa_client::ClientError;
use happa_client::models::{MachinePool, Release};
use wiremock::matchers::{method, path};

const POOLS_PATH: &str = "/apis/cluster.x-k8s.io/v1beta1/namespaces/org-acme/machinepools";

#[tokio::test]
async fn test_forbidden_carries_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POOLS_PATH))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(load_fixture("errors/forbidden.json")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .list::<MachinePool>(&ListOptions::in_namespace("org-acme"))
        .await
        .unwrap_err();

    assert!(err.is_forbidden());
    assert!(!err.is_not_found());
    match err {
        ClientError::ApiError {
            status,
            reason,
            message,
            ..
        } => {
            assert_eq!(status, 403);
            assert_eq!(reason.as_deref(), Some("Forbidden"));
            assert!(message.contains("cannot list resource"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_release_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apis/release.giantswarm.io/v1alpha1/releases/v99.0.0"))
        .respond_with(ResponseTemplate::new(404).set_body_json(status_body(
            404,
            "NotFound",
            "releases.release.giantswarm.io \"v99.0.0\" not found",
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get::<Release>(None, "v99.0.0").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_server_error_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POOLS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, ResponseCache::disabled(), 3);
    let err = client
        .list::<MachinePool>(&ListOptions::in_namespace("org-acme"))
        .await
        .unwrap_err();

    match err {
        ClientError::ApiError {
            status,
            reason,
            message,
            ..
        } => {
            assert_eq!(status, 500);
            assert!(reason.is_none());
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_throttled_without_retries_exceeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POOLS_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .list::<MachinePool>(&ListOptions::in_namespace("org-acme"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MaxRetriesExceeded(1)));
}

#[tokio::test]
async fn test_undecodable_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POOLS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .list::<MachinePool>(&ListOptions::in_namespace("org-acme"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidResponse(_)));
}
