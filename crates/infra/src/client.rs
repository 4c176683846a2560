//! HTTP client for the search engine

use async_trait::async_trait;
use docsearch_core::query::{BatchRequest, ComposedRequest};
use docsearch_core::response::{EngineResponse, MultiSearchResponse};
use docsearch_core::{DocSearchError, EngineConfig, Result, SearchExecutor};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Content type of batch search bodies
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Search engine client speaking the JSON search and multi-search APIs
#[derive(Debug, Clone)]
pub struct EngineClient {
    base_url: Url,
    credentials: Option<(String, Option<String>)>,
    client: reqwest::Client,
}

impl EngineClient {
    /// Create a new engine client
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let mut base_url = config.base_url()?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            base_url,
            credentials: config
                .credentials()
                .map(|(user, password)| (user.to_string(), password.map(str::to_string))),
            client,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check if the engine answers on its root endpoint
    pub async fn health_check(&self) -> Result<bool> {
        match self
            .authorize(self.client.get(self.base_url.clone()))
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                warn!("Search engine health check failed: {}", e);
                Ok(false)
            }
        }
    }

    /// `POST {base}/{index}/_search`
    pub async fn search(&self, request: &ComposedRequest) -> Result<EngineResponse> {
        let url = self.endpoint(&[request.index.as_str(), "_search"])?;
        debug!(url = %url, "Sending search request");

        let response = self
            .authorize(self.client.post(url))
            .json(request)
            .send()
            .await
            .map_err(|e| DocSearchError::network(format!("Failed to send search request: {}", e)))?;

        read_json(response).await
    }

    /// `POST {base}/_msearch` with a newline-delimited body
    pub async fn multi_search(&self, batch: &BatchRequest) -> Result<MultiSearchResponse> {
        let url = self.endpoint(&["_msearch"])?;
        debug!(url = %url, items = batch.len(), "Sending multi-search request");

        let response = self
            .authorize(self.client.post(url))
            .header(reqwest::header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)
            .body(batch.to_ndjson()?)
            .send()
            .await
            .map_err(|e| {
                DocSearchError::network(format!("Failed to send multi-search request: {}", e))
            })?;

        read_json(response).await
    }

    /// Append `segments` to the base path, each percent-encoded as one segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(DocSearchError::validation(format!(
                "Invalid path segment for engine request: '{}'",
                bad
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DocSearchError::configuration(format!(
                    "Engine URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, password.as_deref()),
            None => builder,
        }
    }
}

#[async_trait]
impl SearchExecutor for EngineClient {
    async fn execute(&self, request: &ComposedRequest) -> Result<EngineResponse> {
        self.search(request).await
    }

    async fn execute_batch(&self, batch: &BatchRequest) -> Result<MultiSearchResponse> {
        self.multi_search(batch).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DocSearchError::network(format!("Failed to read engine response: {}", e)))?;

    if !status.is_success() {
        return Err(DocSearchError::engine(status.as_u16(), body));
    }

    Ok(serde_json::from_str(&body)?)
}
