//! Centralized constants for the Happa workspace.
//!
//! Default values shared by the config loader, the HTTP client and the
//! aggregation core live here so that crates agree on them.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for throttled or unavailable requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for `HAPPA_MAX_RETRIES`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Request Cache Defaults
// =============================================================================

/// Default time-to-live for cached list/get responses in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Time-to-live for release resources, which change rarely.
pub const DEFAULT_RELEASE_CACHE_TTL_SECS: u64 = 300;

/// Maximum number of cached responses.
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 1000;

// =============================================================================
// Node Pool Scaling Bounds
// =============================================================================

/// Lowest accepted minimum for a node pool.
pub const DEFAULT_MIN_NODES_PER_POOL: i64 = 0;

/// Highest accepted maximum for a node pool.
pub const DEFAULT_MAX_NODES_PER_POOL: i64 = 100;
