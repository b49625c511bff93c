//! Request-deduplicating response cache for resource reads.
//!
//! Repeated reads of the same collection or object within a TTL window are
//! served from memory, so a summary that fans out over many clusters does
//! not re-fetch shared resources such as releases.
//!
//! # What this module does NOT handle:
//! - Persistent disk caching (in-memory only)
//! - Cross-process cache sharing
//!
//! # Invariants
//! - Only GET responses are cached
//! - Mutations invalidate every cached entry of the mutated kind
//! - TTL is enforced per entry, chosen by the longest matching path prefix

use std::collections::HashMap;
use std::time::{Duration, Instant};

use happa_config::constants::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_SECS, DEFAULT_RELEASE_CACHE_TTL_SECS,
};
use moka::future::Cache as MokaCache;
use tracing::{debug, trace};

use crate::metrics::MetricsCollector;

fn env_u64_or_default(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    matches!(
        std::env::var(key).ok().as_deref().map(str::trim),
        Some("1") | Some("true")
    )
}

/// A cached response body.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub body: Vec<u8>,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(body: Vec<u8>, ttl: Duration) -> Self {
        Self {
            body,
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// Check if this entry has expired relative to a given reference time.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.cached_at) > self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Cache key: full request URL plus sorted query parameters.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CacheKey {
    pub url: String,
    pub query_params: Vec<(String, String)>,
}

impl CacheKey {
    pub fn new(url: String, mut query_params: Vec<(String, String)>) -> Self {
        query_params.sort();
        Self { url, query_params }
    }
}

/// Cache policy for a path prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CachePolicy {
    NoCache,
    CacheWithTtl(Duration),
}

/// TTL policies keyed by REST path prefix.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    policies: HashMap<String, CachePolicy>,
    default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let default_ttl = env_u64_or_default("HAPPA_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS);
        let release_ttl = env_u64_or_default(
            "HAPPA_CACHE_TTL_RELEASE_SECS",
            DEFAULT_RELEASE_CACHE_TTL_SECS,
        );

        let mut policies = HashMap::new();
        // Releases are immutable once published.
        policies.insert(
            "/apis/release.giantswarm.io".to_string(),
            CachePolicy::CacheWithTtl(Duration::from_secs(release_ttl)),
        );
        policies.insert(
            "/apis/authorization.k8s.io".to_string(),
            CachePolicy::NoCache,
        );

        Self {
            policies,
            default_ttl: Duration::from_secs(default_ttl),
        }
    }
}

impl CacheConfig {
    /// Policy for a REST path, picking the longest matching prefix.
    pub fn policy_for(&self, path: &str) -> CachePolicy {
        let mut best_match: Option<(&str, CachePolicy)> = None;

        for (prefix, policy) in &self.policies {
            if path.starts_with(prefix.as_str())
                && best_match.is_none_or(|(current, _)| prefix.len() > current.len())
            {
                best_match = Some((prefix, *policy));
            }
        }

        best_match.map_or(
            CachePolicy::CacheWithTtl(self.default_ttl),
            |(_, policy)| policy,
        )
    }

    pub fn set_policy(&mut self, prefix: impl Into<String>, policy: CachePolicy) {
        self.policies.insert(prefix.into(), policy);
    }

    pub fn set_default_ttl(&mut self, ttl: Duration) {
        self.default_ttl = ttl;
    }
}

/// Client-side response cache.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    inner: MokaCache<CacheKey, CacheEntry>,
    config: CacheConfig,
    enabled: bool,
    metrics: Option<MetricsCollector>,
}

impl ResponseCache {
    /// Create a cache honoring `HAPPA_CACHE_SIZE` and `HAPPA_CACHE_DISABLED`.
    pub fn new() -> Self {
        if env_flag("HAPPA_CACHE_DISABLED") {
            return Self::disabled();
        }
        let capacity = env_u64_or_default("HAPPA_CACHE_SIZE", DEFAULT_CACHE_MAX_ENTRIES);
        Self::with_capacity(capacity)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        let inner = MokaCache::builder()
            .max_capacity(capacity)
            .support_invalidation_closures()
            .build();

        Self {
            inner,
            config: CacheConfig::default(),
            enabled: true,
            metrics: None,
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            inner: MokaCache::builder().max_capacity(1).build(),
            config: CacheConfig::default(),
            enabled: false,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.get_at(key, Instant::now()).await
    }

    /// Get an entry, checking expiration relative to a given time.
    pub async fn get_at(&self, key: &CacheKey, now: Instant) -> Option<CacheEntry> {
        if !self.enabled {
            return None;
        }

        match self.inner.get(key).await {
            Some(entry) if entry.is_expired_at(now) => {
                trace!(url = %key.url, "Cache entry expired");
                self.inner.invalidate(key).await;
                self.record_miss();
                None
            }
            Some(entry) => {
                trace!(url = %key.url, "Cache hit");
                self.record_hit();
                Some(entry)
            }
            None => {
                trace!(url = %key.url, "Cache miss");
                self.record_miss();
                None
            }
        }
    }

    pub async fn insert(&self, key: CacheKey, entry: CacheEntry) {
        if !self.enabled {
            return;
        }
        trace!(url = %key.url, "Caching entry");
        self.inner.insert(key, entry).await;
    }

    pub async fn invalidate(&self, key: &CacheKey) {
        self.inner.invalidate(key).await;
        self.record_invalidation();
    }

    /// Invalidate every entry whose URL starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.invalidate_matching(prefix, "");
    }

    /// Invalidate every entry whose URL starts with `prefix` and contains `segment`.
    pub fn invalidate_matching(&self, prefix: &str, segment: &str) {
        if !self.enabled {
            return;
        }
        let prefix_owned = prefix.to_string();
        let segment_owned = segment.to_string();
        if let Err(e) = self.inner.invalidate_entries_if(move |key, _| {
            key.url.starts_with(&prefix_owned) && key.url.contains(&segment_owned)
        }) {
            debug!(error = %e, "Predicate invalidation unavailable, clearing cache");
            self.inner.invalidate_all();
        }
        self.record_invalidation();
        debug!(prefix, segment, "Invalidated cache entries");
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
        self.record_invalidation();
        debug!("Invalidated all cache entries");
    }

    /// Policy for a GET of `path`.
    pub fn policy_for(&self, path: &str) -> CachePolicy {
        if !self.enabled {
            return CachePolicy::NoCache;
        }
        self.config.policy_for(path)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.inner.entry_count(),
            enabled: self.enabled,
        }
    }

    fn record_hit(&self) {
        if let Some(m) = &self.metrics {
            m.record_cache_hit();
        }
    }

    fn record_miss(&self) {
        if let Some(m) = &self.metrics {
            m.record_cache_miss();
        }
    }

    fn record_invalidation(&self) {
        if let Some(m) = &self.metrics {
            m.record_cache_invalidation();
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheStats {
    pub entry_count: u64,
    pub enabled: bool,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache {{ entries: {}, enabled: {} }}",
            self.entry_count, self.enabled
        )
    }
}
