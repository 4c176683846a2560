//! Wire types for search engine responses
//!
//! Every field the engine may leave out is optional here; defaulting happens
//! in the normalizers, not during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Response to a single search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub took: Option<u64>,
    #[serde(
        rename = "_scroll_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub scroll_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<HitsMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Map<String, Value>>,
}

impl EngineResponse {
    /// Hits in engine order, empty when the engine sent none
    pub fn hits(&self) -> &[Hit] {
        self.hits
            .as_ref()
            .map(|hits| hits.hits.as_slice())
            .unwrap_or_default()
    }
}

/// The `hits` envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitsMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalHits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Total hit count, either a bare number or `{value, relation}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Detailed {
        value: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        relation: Option<String>,
    },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            Self::Count(value) | Self::Detailed { value, .. } => *value,
        }
    }
}

/// One matching document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<BTreeMap<String, Vec<String>>>,
}

/// Response to a batch search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub took: Option<u64>,
    #[serde(default)]
    pub responses: Vec<MultiSearchItem>,
}

/// One entry of a batch response, in request order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultiSearchItem {
    Failure {
        error: ErrorCause,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
    },
    Success(EngineResponse),
}

impl MultiSearchItem {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// Failure description attached to a failed batch entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCause {
    Message(String),
    Detailed {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl ErrorCause {
    /// Engine-supplied reason, if any
    pub fn reason(&self) -> Option<&str> {
        let reason = match self {
            Self::Message(message) => Some(message.as_str()),
            Self::Detailed { reason, .. } => reason.as_deref(),
        };
        reason.filter(|reason| !reason.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_total_hits_shapes() {
        let plain: HitsMetadata = serde_json::from_value(json!({"total": 7, "hits": []})).unwrap();
        assert_eq!(plain.total.unwrap().value(), 7);

        let detailed: HitsMetadata = serde_json::from_value(json!({
            "total": {"value": 42, "relation": "eq"},
            "max_score": 1.5,
            "hits": []
        }))
        .unwrap();
        assert_eq!(detailed.total.unwrap().value(), 42);
        assert_eq!(detailed.max_score, Some(1.5));
    }

    #[test]
    fn test_sparse_response() {
        let response: EngineResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.took.is_none());
        assert!(response.hits().is_empty());

        let response: EngineResponse = serde_json::from_value(json!({
            "took": 3,
            "hits": {"max_score": null, "hits": [{"_index": "articles", "_id": "1", "_score": null}]}
        }))
        .unwrap();
        assert_eq!(response.hits().len(), 1);
        assert!(response.hits()[0].score.is_none());
        assert!(response.hits()[0].source.is_none());
    }

    #[test]
    fn test_multi_search_items() {
        let response: MultiSearchResponse = serde_json::from_value(json!({
            "took": 5,
            "responses": [
                {"took": 2, "hits": {"total": {"value": 1, "relation": "eq"}, "hits": []}, "status": 200},
                {"error": {"type": "query_shard_exception", "reason": "failed to create query"}, "status": 400},
                {"error": {"type": "index_not_found_exception"}, "status": 404}
            ]
        }))
        .unwrap();

        assert_eq!(response.responses.len(), 3);
        assert_matches!(&response.responses[0], MultiSearchItem::Success(r) if r.took == Some(2));
        assert_matches!(
            &response.responses[1],
            MultiSearchItem::Failure { error, status: Some(400) }
                if error.reason() == Some("failed to create query")
        );
        assert_matches!(
            &response.responses[2],
            MultiSearchItem::Failure { error, .. } if error.reason().is_none()
        );
    }

    #[test]
    fn test_string_error_cause() {
        let item: MultiSearchItem =
            serde_json::from_value(json!({"error": "search rejected"})).unwrap();
        assert!(item.is_failure());
        assert_matches!(item, MultiSearchItem::Failure { error, .. } if error.reason() == Some("search rejected"));
    }
}
