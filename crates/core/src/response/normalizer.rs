//! Normalization of engine responses into [`SearchResult`]

use super::engine::{EngineResponse, MultiSearchItem, MultiSearchResponse};
use super::result::SearchResult;
use crate::query::{BatchRequest, ComposedRequest};
use crate::types::DEFAULT_PAGE_SIZE;
use serde_json::{Map, Value};
use tracing::warn;

/// Reason reported for a failed batch item that carries no reason of its own
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Reason reported for a batch item the engine sent no response for
pub const MISSING_RESPONSE_ERROR: &str = "No response returned for batch item";

/// Paging a request asked for, as needed to resolve page and size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paging {
    pub from: Option<u32>,
    pub size: Option<u32>,
}

impl Paging {
    pub fn new(from: Option<u32>, size: Option<u32>) -> Self {
        Self { from, size }
    }

    /// Requested size, or the default page size
    pub fn resolved_size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// `from / size + 1`, or 1 when size is zero
    pub fn resolved_page(&self) -> u32 {
        let size = self.resolved_size();
        if size > 0 {
            self.from.unwrap_or(0) / size + 1
        } else {
            1
        }
    }
}

impl From<&ComposedRequest> for Paging {
    fn from(request: &ComposedRequest) -> Self {
        Self::new(request.from, request.size)
    }
}

/// Reshapes a single-search response
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Normalize `response` using the paging of the request that produced it
    pub fn normalize(response: EngineResponse, paging: Paging) -> SearchResult {
        let index_name = response.hits().first().and_then(|hit| hit.index.clone());
        let took = response.took.unwrap_or(0);

        let (total, max_score, hits) = match response.hits {
            Some(metadata) => (
                metadata.total.map(|total| total.value()).unwrap_or(0),
                metadata.max_score.unwrap_or(0.0),
                metadata.hits,
            ),
            None => (0, 0.0, Vec::new()),
        };

        let mut results = Vec::with_capacity(hits.len());
        let mut sort_values_list = Vec::with_capacity(hits.len());
        let mut highlights = Vec::with_capacity(hits.len());

        for hit in hits {
            let mut document = hit.source.unwrap_or_default();
            document.insert("_index".to_string(), Value::from(hit.index));
            document.insert("_id".to_string(), Value::String(hit.id));
            document.insert("_score".to_string(), Value::from(hit.score));
            results.push(document);
            sort_values_list.push(hit.sort.unwrap_or_default());
            highlights.push(hit.highlight.unwrap_or_default());
        }

        SearchResult {
            index_name,
            total,
            took,
            max_score,
            page: paging.resolved_page(),
            size: paging.resolved_size(),
            scroll_id: response.scroll_id,
            results,
            sort_values_list,
            aggregations: response.aggregations.unwrap_or_else(Map::new),
            highlights,
            error_message: String::new(),
        }
    }
}

/// Reshapes a batch response item by item, in request order
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiResponseNormalizer;

impl MultiResponseNormalizer {
    /// Normalize every item of `response` against the matching batch entry
    ///
    /// The output always has one result per batch entry. A failed item turns
    /// into an error result without touching its siblings.
    pub fn normalize(response: MultiSearchResponse, batch: &BatchRequest) -> Vec<SearchResult> {
        let expected = batch.len();
        let received = response.responses.len();
        if received > expected {
            warn!(
                expected,
                received, "Batch response has more items than requested, ignoring extras"
            );
        }

        let mut items = response.responses.into_iter();
        batch
            .items()
            .iter()
            .enumerate()
            .map(|(position, request)| match items.next() {
                Some(MultiSearchItem::Success(item)) => ResponseNormalizer::normalize(
                    item,
                    Paging::new(request.body.from, request.body.size),
                ),
                Some(MultiSearchItem::Failure { error, status }) => {
                    let reason = error.reason().unwrap_or(UNKNOWN_ERROR);
                    warn!(
                        position,
                        index = %request.index,
                        status = ?status,
                        "Batch item failed: {}",
                        reason
                    );
                    SearchResult::error(reason)
                }
                None => {
                    warn!(position, index = %request.index, "{}", MISSING_RESPONSE_ERROR);
                    SearchResult::error(MISSING_RESPONSE_ERROR)
                }
            })
            .collect()
    }
}
