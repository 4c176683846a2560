//! Common test helpers for search service integration tests

use async_trait::async_trait;
use docsearch_core::query::{BatchRequest, ComposedRequest};
use docsearch_core::response::{EngineResponse, MultiSearchResponse};
use docsearch_core::search::{SearchExecutor, SingleClientProvider};
use docsearch_core::{DocSearchError, Result, SearchProfile, SearchService};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Executor that answers from canned responses and records what it was sent
#[derive(Default)]
pub struct InMemoryExecutor {
    search_response: Mutex<Option<Value>>,
    batch_response: Mutex<Option<Value>>,
    pub requests: Mutex<Vec<Value>>,
    pub batches: Mutex<Vec<String>>,
}

impl InMemoryExecutor {
    pub fn with_search_response(response: Value) -> Self {
        let executor = Self::default();
        *executor.search_response.lock().unwrap() = Some(response);
        executor
    }

    pub fn with_batch_response(response: Value) -> Self {
        let executor = Self::default();
        *executor.batch_response.lock().unwrap() = Some(response);
        executor
    }

    pub fn last_request(&self) -> Value {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl SearchExecutor for InMemoryExecutor {
    async fn execute(&self, request: &ComposedRequest) -> Result<EngineResponse> {
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::to_value(request)?);
        let response = self
            .search_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DocSearchError::network("no canned search response"))?;
        Ok(serde_json::from_value(response)?)
    }

    async fn execute_batch(&self, batch: &BatchRequest) -> Result<MultiSearchResponse> {
        self.batches.lock().unwrap().push(batch.to_ndjson()?);
        let response = self
            .batch_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DocSearchError::network("no canned batch response"))?;
        Ok(serde_json::from_value(response)?)
    }
}

/// Service over `executor` using `profile`
pub fn service_with(executor: Arc<InMemoryExecutor>, profile: SearchProfile) -> SearchService {
    SearchService::new(Arc::new(SingleClientProvider::new(executor)), profile)
}

/// A successful single-search payload with two article hits
pub fn article_hits() -> Value {
    json!({
        "took": 7,
        "timed_out": false,
        "hits": {
            "total": {"value": 2, "relation": "eq"},
            "max_score": 2.4,
            "hits": [
                {
                    "_index": "articles",
                    "_id": "1",
                    "_score": 2.4,
                    "_source": {"title": "Title 1", "content": "first body"},
                    "highlight": {"title.korean": ["<em>Title</em> 1"]}
                },
                {
                    "_index": "articles",
                    "_id": "2",
                    "_score": 1.1,
                    "_source": {"title": "Title 10", "content": "second body"}
                }
            ]
        },
        "aggregations": {
            "count_by_field": {
                "doc_count_error_upper_bound": 0,
                "sum_other_doc_count": 0,
                "buckets": [{"key": "articles", "doc_count": 2}]
            }
        }
    })
}
