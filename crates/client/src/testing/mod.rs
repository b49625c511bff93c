//! Testing utilities for client and aggregation tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use happa_client::testing::{load_fixture, resource_list};
//!
//! let fixture = load_fixture("clusters/list_clusters.json");
//! let empty = resource_list("MachinePoolList", vec![]);
//! ```

use std::path::Path;

use serde_json::{Value, json};

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// A list response body with the given items.
pub fn resource_list(kind: &str, items: Vec<Value>) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": kind,
        "metadata": {"resourceVersion": "1"},
        "items": items,
    })
}

/// A Kubernetes `Status` failure body.
pub fn status_body(code: u16, reason: &str, message: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Status",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_list_shape() {
        let list = resource_list("ClusterList", vec![json!({"metadata": {"name": "a"}})]);
        assert_eq!(list["items"].as_array().map(Vec::len), Some(1));
        assert_eq!(list["kind"], "ClusterList");
    }

    #[test]
    fn test_status_body_shape() {
        let body = status_body(403, "Forbidden", "nope");
        assert_eq!(body["code"], 403);
        assert_eq!(body["reason"], "Forbidden");
    }
}
