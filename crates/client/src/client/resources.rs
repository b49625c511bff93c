//! Typed resource methods for [`HappaClient`].
//!
//! Reads are served from the response cache when allowed; writes
//! invalidate cached reads of the written kind.

use secrecy::ExposeSecret;
use serde_json::Value;

use crate::client::HappaClient;
use crate::client::cache::{CacheEntry, CacheKey, CachePolicy};
use crate::endpoints::paths::{collection_path, kind_prefix, object_path};
use crate::endpoints::{self, ListOptions, parse_body};
use crate::error::Result;
use crate::models::{Resource, ResourceList, SelfSubjectRulesReview};

impl HappaClient {
    /// GET a path, consulting the cache first.
    async fn cached_get(
        &self,
        path: &str,
        query_params: Vec<(String, String)>,
        resource: &str,
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let policy = self.cache.policy_for(path);

        let key = CacheKey::new(url.clone(), query_params);
        if let CachePolicy::CacheWithTtl(_) = policy
            && let Some(entry) = self.cache.get(&key).await
        {
            return Ok(entry.body);
        }

        let body = endpoints::get_raw(
            &self.http,
            &url,
            self.token.expose_secret(),
            &key.query_params,
            self.max_retries,
            resource,
            self.metrics.as_ref(),
        )
        .await?;

        if let CachePolicy::CacheWithTtl(ttl) = policy {
            self.cache
                .insert(key, CacheEntry::new(body.clone(), ttl))
                .await;
        }
        Ok(body)
    }

    fn invalidate_kind<R: Resource>(&self) {
        let prefix = format!("{}{}", self.base_url, kind_prefix::<R>());
        self.cache
            .invalidate_matching(&prefix, &format!("/{}", R::PLURAL));
    }

    /// List resources of a kind, optionally scoped to a namespace and label selector.
    pub async fn list<R: Resource>(&self, options: &ListOptions) -> Result<Vec<R>> {
        let path = collection_path::<R>(options.namespace.as_deref());
        let body = self
            .cached_get(&path, options.query_params(), R::PLURAL)
            .await?;
        let list: ResourceList<R> = parse_body(&body, &path)?;
        Ok(list.items)
    }

    /// Get a single resource. `namespace` is ignored for cluster-scoped kinds.
    pub async fn get<R: Resource>(&self, namespace: Option<&str>, name: &str) -> Result<R> {
        let path = object_path::<R>(namespace, name);
        let body = self.cached_get(&path, Vec::new(), R::PLURAL).await?;
        parse_body(&body, &path)
    }

    /// Apply a JSON merge patch and return the updated object.
    pub async fn patch<R: Resource>(
        &self,
        namespace: Option<&str>,
        name: &str,
        patch: &Value,
    ) -> Result<R> {
        let result = endpoints::patch_resource::<R>(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            namespace,
            name,
            patch,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await;
        self.invalidate_kind::<R>();
        result
    }

    /// Create a resource and return the stored object.
    pub async fn create<R: Resource>(&self, namespace: Option<&str>, resource: &R) -> Result<R> {
        let result = endpoints::create_resource::<R>(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            namespace,
            resource,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await;
        self.invalidate_kind::<R>();
        result
    }

    /// Ask the server which actions the caller may perform in `namespace`.
    pub async fn review_permissions(&self, namespace: &str) -> Result<SelfSubjectRulesReview> {
        self.create(None, &SelfSubjectRulesReview::for_namespace(namespace))
            .await
    }
}
