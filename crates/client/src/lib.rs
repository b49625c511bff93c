//! Management API client.
//!
//! Typed access to the Cluster API, provider and Giant Swarm resources a
//! management cluster serves, with retry on throttling, response caching
//! and per-request metrics.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use client::HappaClient;
pub use client::builder::HappaClientBuilder;
pub use client::cache::{CacheConfig, CachePolicy, ResponseCache};
pub use endpoints::{LabelSelector, ListOptions};
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::Resource;
