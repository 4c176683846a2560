//! Composition of complete search request bodies

use super::assembler::{ComposedQuery, QueryAssembler};
use super::dsl::{Aggregation, Highlight, Query, SortClause, SourceFilter, TermsAggregation};
use crate::types::{FieldGroup, NestedFieldGroup, SortField};
use serde::Serialize;
use std::collections::BTreeMap;

/// Name of the aggregation attached to every single search
pub const COUNT_BY_INDEX_AGGREGATION: &str = "count_by_field";

/// Engine metadata field holding a document's owning index
pub const INDEX_METADATA_FIELD: &str = "_index";

/// Bucket cap of the count-by-index aggregation
pub const COUNT_BY_INDEX_BUCKETS: u32 = 10;

/// A fully composed single-search request
///
/// Serializes to the request body; `index` travels in the request path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedRequest {
    #[serde(skip)]
    pub index: String,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceFilter>,
    pub query: ComposedQuery,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aggregations: BTreeMap<String, Aggregation>,
    pub track_scores: bool,
}

impl ComposedRequest {
    /// Highlight fields in request order, empty when highlighting is off
    pub fn highlight_fields(&self) -> &[String] {
        self.highlight
            .as_ref()
            .map(Highlight::fields)
            .unwrap_or_default()
    }
}

/// Builder for [`ComposedRequest`]
///
/// ```
/// use docsearch_core::query::RequestComposer;
/// use docsearch_core::types::FieldGroup;
///
/// let request = RequestComposer::new("articles")
///     .keyword("Title 1")
///     .field_groups(vec![FieldGroup::new(["title.korean", "title.english"])])
///     .from(20)
///     .size(20)
///     .compose();
///
/// assert_eq!(request.from, Some(20));
/// assert_eq!(request.highlight_fields(), ["title.korean", "title.english"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestComposer {
    index: String,
    include_fields: Vec<String>,
    keyword: String,
    field_groups: Vec<FieldGroup>,
    nested_groups: Vec<NestedFieldGroup>,
    filter: Option<Query>,
    sort_fields: Vec<SortField>,
    from: Option<u32>,
    size: Option<u32>,
}

impl RequestComposer {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Default::default()
        }
    }

    /// Restrict returned source fields; an empty list returns everything
    pub fn include_fields(mut self, fields: Vec<String>) -> Self {
        self.include_fields = fields;
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn field_groups(mut self, groups: Vec<FieldGroup>) -> Self {
        self.field_groups = groups;
        self
    }

    pub fn nested_groups(mut self, groups: Vec<NestedFieldGroup>) -> Self {
        self.nested_groups = groups;
        self
    }

    /// Non-scoring AND clause; `None` leaves the filter slot absent
    pub fn filter(mut self, filter: Option<Query>) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort_fields(mut self, sort_fields: Vec<SortField>) -> Self {
        self.sort_fields = sort_fields;
        self
    }

    pub fn from(mut self, from: u32) -> Self {
        self.from = Some(from);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Build the request
    pub fn compose(self) -> ComposedRequest {
        let source = if self.include_fields.is_empty() {
            None
        } else {
            Some(SourceFilter {
                includes: self.include_fields,
            })
        };

        let query = QueryAssembler::assemble(
            &self.keyword,
            &self.field_groups,
            &self.nested_groups,
            self.filter,
        );

        let highlight = if self.keyword.is_empty() {
            None
        } else {
            let plain = self
                .field_groups
                .iter()
                .flat_map(|group| group.fields.iter().cloned());
            let nested = self
                .nested_groups
                .iter()
                .flat_map(NestedFieldGroup::qualified_fields);
            Some(Highlight::from_fields(plain.chain(nested)))
        };

        let mut aggregations = BTreeMap::new();
        aggregations.insert(
            COUNT_BY_INDEX_AGGREGATION.to_string(),
            Aggregation::Terms(TermsAggregation {
                field: INDEX_METADATA_FIELD.to_string(),
                size: COUNT_BY_INDEX_BUCKETS,
            }),
        );

        ComposedRequest {
            index: self.index,
            source,
            query,
            sort: self.sort_fields.into_iter().map(SortClause).collect(),
            from: self.from,
            size: self.size,
            highlight,
            aggregations,
            track_scores: true,
        }
    }
}
