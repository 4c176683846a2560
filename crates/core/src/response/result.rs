//! The uniform search result contract

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field name to matched fragments for one hit
pub type HighlightMap = BTreeMap<String, Vec<String>>;

/// Normalized outcome of one search, successful or failed
///
/// `results`, `sort_values_list` and `highlights` are positionally aligned:
/// entry `i` of each describes the same hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Owning index of the first hit; `None` when there are no hits
    pub index_name: Option<String>,
    pub total: u64,
    /// Engine-reported elapsed time in milliseconds
    pub took: u64,
    pub max_score: f64,
    pub page: u32,
    pub size: u32,
    pub scroll_id: Option<String>,
    /// Source fields of each hit plus `_index`, `_id` and `_score`
    pub results: Vec<Map<String, Value>>,
    pub sort_values_list: Vec<Vec<Value>>,
    pub aggregations: Map<String, Value>,
    pub highlights: Vec<HighlightMap>,
    /// Empty on success
    pub error_message: String,
}

impl SearchResult {
    /// Placeholder result for a search the engine reported as failed
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            index_name: None,
            total: 0,
            took: 0,
            max_score: 0.0,
            page: 1,
            size: 0,
            scroll_id: None,
            results: Vec::new(),
            sort_values_list: Vec::new(),
            aggregations: Map::new(),
            highlights: Vec::new(),
            error_message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error_message.is_empty()
    }

    /// Number of hits on this page
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
