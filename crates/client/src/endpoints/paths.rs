//! REST path construction for resource kinds.
//!
//! Paths follow the Kubernetes layout:
//! `/apis/{group}/{version}[/namespaces/{ns}]/{plural}[/{name}]`, or
//! `/api/{version}/...` for the core group. Object names and namespaces
//! are percent-encoded so a name can never add path segments.

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

use crate::models::Resource;

/// Characters that must be percent-encoded in URL path segments.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#');

/// Percent-encode a string for use as a single URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

fn group_prefix<R: Resource>() -> String {
    if R::API_GROUP.is_empty() {
        format!("/api/{}", R::API_VERSION)
    } else {
        format!("/apis/{}/{}", R::API_GROUP, R::API_VERSION)
    }
}

/// Path of a collection, without the base URL.
///
/// A `None` namespace on a namespaced kind lists across all namespaces.
pub fn collection_path<R: Resource>(namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if R::NAMESPACED => format!(
            "{}/namespaces/{}/{}",
            group_prefix::<R>(),
            encode_path_segment(ns),
            R::PLURAL
        ),
        _ => format!("{}/{}", group_prefix::<R>(), R::PLURAL),
    }
}

/// Path of a single object, without the base URL.
pub fn object_path<R: Resource>(namespace: Option<&str>, name: &str) -> String {
    format!(
        "{}/{}",
        collection_path::<R>(namespace),
        encode_path_segment(name)
    )
}

/// Path prefix shared by every cached response of a kind, in any namespace.
pub fn kind_prefix<R: Resource>() -> String {
    group_prefix::<R>()
}
