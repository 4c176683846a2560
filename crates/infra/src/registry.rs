//! Client handle registry
//!
//! Maps a logical target name to a reusable [`SearchExecutor`]. Concurrent
//! first lookups for the same target share one creation, so at most one
//! handle exists per key.

use crate::client::EngineClient;
use async_trait::async_trait;
use docsearch_core::{ClientProvider, DocSearchError, EngineConfig, Result, SearchExecutor};
use moka::future::Cache;
use std::sync::Arc;
use tracing::debug;

/// Builds an executor for a target name
pub type ClientFactory = Arc<dyn Fn(&str) -> Result<Arc<dyn SearchExecutor>> + Send + Sync>;

/// Concurrent get-or-create cache of client handles
#[derive(Clone)]
pub struct ClientRegistry {
    cache: Cache<String, Arc<dyn SearchExecutor>>,
    factory: ClientFactory,
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl ClientRegistry {
    /// Registry creating one [`EngineClient`] per target from `config`
    pub fn new(config: EngineConfig) -> Self {
        let capacity = config.max_cached_clients;
        let factory: ClientFactory =
            Arc::new(move |target: &str| -> Result<Arc<dyn SearchExecutor>> {
                debug!(target_name = target, url = %config.url, "Creating engine client");
                Ok(Arc::new(EngineClient::new(&config)?))
            });
        Self::with_factory(capacity, factory)
    }

    /// Registry with a custom factory
    pub fn with_factory(capacity: u64, factory: ClientFactory) -> Self {
        Self {
            cache: Cache::new(capacity),
            factory,
        }
    }

    /// Handle for `target`, creating it on first use
    pub async fn get_or_create(&self, target: &str) -> Result<Arc<dyn SearchExecutor>> {
        let factory = Arc::clone(&self.factory);
        let name = target.to_string();
        self.cache
            .try_get_with(name.clone(), async move { factory(&name) })
            .await
            .map_err(|e| DocSearchError::execution("create client", target, e))
    }

    /// Whether a handle for `target` is cached
    pub fn contains(&self, target: &str) -> bool {
        self.cache.contains_key(target)
    }

    /// Drop the cached handle for `target`
    pub async fn invalidate(&self, target: &str) {
        self.cache.invalidate(target).await;
    }

    /// Approximate number of cached handles
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ClientProvider for ClientRegistry {
    async fn client(&self, target: &str) -> Result<Arc<dyn SearchExecutor>> {
        self.get_or_create(target).await
    }
}
