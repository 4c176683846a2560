//! Collaborator traits for executing requests against the engine

use crate::query::{BatchRequest, ComposedRequest};
use crate::response::{EngineResponse, MultiSearchResponse};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Sends composed requests to the search engine
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    /// Execute a single search
    async fn execute(&self, request: &ComposedRequest) -> Result<EngineResponse>;

    /// Execute a batch search in one round trip
    async fn execute_batch(&self, batch: &BatchRequest) -> Result<MultiSearchResponse>;
}

/// Resolves a logical target name to a reusable executor handle
#[async_trait]
pub trait ClientProvider: Send + Sync {
    /// Executor for `target`, created on first use
    async fn client(&self, target: &str) -> Result<Arc<dyn SearchExecutor>>;
}

/// Provider that hands out the same executor for every target
#[derive(Clone)]
pub struct SingleClientProvider {
    executor: Arc<dyn SearchExecutor>,
}

impl SingleClientProvider {
    pub fn new(executor: Arc<dyn SearchExecutor>) -> Self {
        Self { executor }
    }
}

impl std::fmt::Debug for SingleClientProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleClientProvider").finish_non_exhaustive()
    }
}

#[async_trait]
impl ClientProvider for SingleClientProvider {
    async fn client(&self, _target: &str) -> Result<Arc<dyn SearchExecutor>> {
        Ok(Arc::clone(&self.executor))
    }
}
