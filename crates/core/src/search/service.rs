//! Search service: intent in, normalized result out

use super::executor::ClientProvider;
use super::profile::SearchProfile;
use crate::query::{BatchComposer, BatchRequest, ComposedRequest};
use crate::response::{MultiResponseNormalizer, Paging, ResponseNormalizer, SearchResult};
use crate::types::SearchIntent;
use crate::{DocSearchError, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Composes, executes and normalizes searches for one profile
#[derive(Clone)]
pub struct SearchService {
    provider: Arc<dyn ClientProvider>,
    profile: SearchProfile,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("profile", &self.profile.name)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    pub fn new(provider: Arc<dyn ClientProvider>, profile: SearchProfile) -> Self {
        Self { provider, profile }
    }

    pub fn profile(&self) -> &SearchProfile {
        &self.profile
    }

    /// Build the request for `intent` without executing it
    pub fn compose(&self, intent: &SearchIntent) -> Result<ComposedRequest> {
        intent.validate()?;
        let request = self.profile.composer(intent).compose();
        debug!(
            index = %request.index,
            body = %serde_json::to_string(&request)?,
            "Composed search request"
        );
        Ok(request)
    }

    /// Run a single search
    #[instrument(skip(self, intent), fields(index = %intent.index_name, profile = %self.profile.name))]
    pub async fn search(&self, intent: &SearchIntent) -> Result<SearchResult> {
        let request = self.compose(intent)?;
        self.execute_search(&intent.index_name, &request).await
    }

    /// Run several searches in one batch round trip
    ///
    /// The batch is sent through the first intent's client target. Results come
    /// back in intent order.
    #[instrument(skip(self, intents), fields(count = intents.len(), profile = %self.profile.name))]
    pub async fn multi_search(&self, intents: &[SearchIntent]) -> Result<Vec<SearchResult>> {
        let first = intents.first().ok_or_else(|| {
            DocSearchError::validation("multi-search requires at least one search intent")
        })?;

        let requests = intents
            .iter()
            .map(|intent| self.compose(intent))
            .collect::<Result<Vec<_>>>()?;
        let batch = BatchComposer::compose(requests);

        self.execute_multi_search(&first.index_name, &batch).await
    }

    /// Execute a composed request against `target` and normalize the response
    pub async fn execute_search(
        &self,
        target: &str,
        request: &ComposedRequest,
    ) -> Result<SearchResult> {
        validate_target(target)?;

        let client = self.provider.client(target).await?;
        let response = client.execute(request).await.map_err(|e| {
            error!("Search failed for target {}: {}", target, e);
            DocSearchError::execution("search", target, e)
        })?;

        let result = ResponseNormalizer::normalize(response, Paging::from(request));
        info!(
            index = target,
            total = result.total,
            took = result.took,
            hits = result.len(),
            "Search completed"
        );
        Ok(result)
    }

    /// Execute a batch against `target` and normalize every item
    pub async fn execute_multi_search(
        &self,
        target: &str,
        batch: &BatchRequest,
    ) -> Result<Vec<SearchResult>> {
        validate_target(target)?;
        if batch.is_empty() {
            return Err(DocSearchError::validation(
                "multi-search batch must not be empty",
            ));
        }

        let client = self.provider.client(target).await?;
        let response = client.execute_batch(batch).await.map_err(|e| {
            error!("Multi-search failed for target {}: {}", target, e);
            DocSearchError::execution("multi-search", target, e)
        })?;

        let results = MultiResponseNormalizer::normalize(response, batch);
        info!(
            index = target,
            items = results.len(),
            failed = results.iter().filter(|r| r.is_error()).count(),
            "Multi-search completed"
        );
        Ok(results)
    }
}

fn validate_target(target: &str) -> Result<()> {
    if target.trim().is_empty() {
        return Err(DocSearchError::validation(
            "indexName must not be null or empty",
        ));
    }
    Ok(())
}
