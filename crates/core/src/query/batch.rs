//! Batch (multi-search) request composition

use super::assembler::ComposedQuery;
use super::composer::ComposedRequest;
use super::dsl::{Highlight, SortClause, SourceFilter};
use crate::Result;
use serde::Serialize;

/// Reduced request body used inside a batch; carries no aggregations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchBody {
    pub query: ComposedQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortClause>,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceFilter>,
}

impl From<ComposedRequest> for BatchBody {
    fn from(request: ComposedRequest) -> Self {
        Self {
            query: request.query,
            from: request.from,
            size: request.size,
            highlight: request.highlight,
            sort: request.sort,
            source: request.source,
        }
    }
}

/// Header line preceding each body in the batch wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchHeader {
    pub index: String,
}

/// One batch entry: target index plus reduced body
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub index: String,
    pub body: BatchBody,
}

/// Ordered batch of request bodies
///
/// Responses carry no correlation id, so item order is the only link between
/// a request and its result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchRequest {
    items: Vec<BatchItem>,
}

impl BatchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a composed request, dropping its aggregation directive
    pub fn push(&mut self, request: ComposedRequest) {
        let index = request.index.clone();
        self.items.push(BatchItem {
            index,
            body: BatchBody::from(request),
        });
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Newline-delimited JSON: header line then body line per item
    pub fn to_ndjson(&self) -> Result<String> {
        let mut out = String::new();
        for item in &self.items {
            let header = BatchHeader {
                index: item.index.clone(),
            };
            out.push_str(&serde_json::to_string(&header)?);
            out.push('\n');
            out.push_str(&serde_json::to_string(&item.body)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl FromIterator<ComposedRequest> for BatchRequest {
    fn from_iter<I: IntoIterator<Item = ComposedRequest>>(iter: I) -> Self {
        let mut batch = Self::new();
        for request in iter {
            batch.push(request);
        }
        batch
    }
}

/// Converts composed requests into a batch request
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchComposer;

impl BatchComposer {
    /// Reduce a single composed request to its batch body
    pub fn to_batch_body(request: ComposedRequest) -> BatchBody {
        BatchBody::from(request)
    }

    /// Package requests in order
    pub fn compose<I>(requests: I) -> BatchRequest
    where
        I: IntoIterator<Item = ComposedRequest>,
    {
        requests.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RequestComposer;
    use crate::types::FieldGroup;
    use serde_json::{json, Value};

    fn request(index: &str, keyword: &str) -> ComposedRequest {
        RequestComposer::new(index)
            .keyword(keyword)
            .field_groups(vec![FieldGroup::new(["title.korean"])])
            .include_fields(vec!["title".into()])
            .from(0)
            .size(5)
            .compose()
    }

    #[test]
    fn test_batch_body_drops_aggregations() {
        let body = BatchComposer::to_batch_body(request("articles", "kw"));
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("aggregations").is_none());
        assert!(value.get("track_scores").is_none());
        assert_eq!(value["size"], 5);
        assert_eq!(value["_source"], json!({"includes": ["title"]}));
        assert!(value["highlight"]["fields"]["title.korean"].is_object());
    }

    #[test]
    fn test_batch_preserves_order() {
        let batch = BatchComposer::compose(vec![
            request("articles", "first"),
            request("news", "second"),
        ]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.items()[0].index, "articles");
        assert_eq!(batch.items()[1].index, "news");
    }

    #[test]
    fn test_ndjson_layout() {
        let batch = BatchComposer::compose(vec![
            request("articles", "first"),
            request("articles", "second"),
        ]);
        let ndjson = batch.to_ndjson().unwrap();
        assert!(ndjson.ends_with('\n'));

        let lines: Vec<&str> = ndjson.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], r#"{"index":"articles"}"#);

        let second: Value = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(
            second["query"]["bool"]["should"][0]["multi_match"]["query"],
            "second"
        );
    }

    #[test]
    fn test_empty_batch_serializes_to_nothing() {
        let batch = BatchRequest::new();
        assert!(batch.is_empty());
        assert_eq!(batch.to_ndjson().unwrap(), "");
    }
}
