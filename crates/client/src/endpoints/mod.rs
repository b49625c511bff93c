//! REST API endpoint implementations.
//!
//! Stateless functions taking an HTTP client, base URL and token. The
//! [`crate::HappaClient`] wraps them with caching and configuration.

pub mod paths;
mod request;
mod resources;

pub use paths::encode_path_segment;
pub use request::send_request_with_retry;
pub use resources::{
    LabelSelector, ListOptions, create_resource, get_raw, get_resource, list_resources,
    parse_body, patch_resource,
};
