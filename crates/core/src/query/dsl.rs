//! Typed query descriptions that serialize to the engine's JSON query DSL
//!
//! Slots that are absent are left out of the serialized JSON entirely rather
//! than being sent as `null` or empty placeholders.

use crate::types::SortField;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Fuzziness setting that lets the engine pick edit distance by term length
pub const FUZZINESS_AUTO: &str = "AUTO";

/// A single query clause
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    Bool(BoolQuery),
    MultiMatch(MultiMatchQuery),
    Nested(NestedQuery),
    Term(TermQuery),
    Range(RangeQuery),
    MatchAll(MatchAllQuery),
}

impl Query {
    /// Fuzzy multi-match over `fields`
    pub fn multi_match(query: impl Into<String>, fields: Vec<String>) -> Self {
        Self::MultiMatch(MultiMatchQuery {
            query: query.into(),
            fields,
            fuzziness: Some(FUZZINESS_AUTO.to_string()),
        })
    }

    /// Wrap `query` so it matches inside the nested object at `path`
    pub fn nested(path: impl Into<String>, query: Query) -> Self {
        Self::Nested(NestedQuery {
            path: path.into(),
            query: Box::new(query),
        })
    }

    /// Exact value match on `field`
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Term(TermQuery {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Inclusive range on `field`; a missing bound is left open
    pub fn range(field: impl Into<String>, gte: Option<Value>, lte: Option<Value>) -> Self {
        Self::Range(RangeQuery {
            field: field.into(),
            gte,
            lte,
        })
    }

    pub fn match_all() -> Self {
        Self::MatchAll(MatchAllQuery {})
    }
}

/// Boolean combination of clauses
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_should_match: Option<u32>,
}

impl BoolQuery {
    pub fn is_empty(&self) -> bool {
        self.should.is_empty() && self.filter.is_empty() && self.must_not.is_empty()
    }
}

/// Match one query string against several fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiMatchQuery {
    pub query: String,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzziness: Option<String>,
}

/// Query scoped to a nested object path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedQuery {
    pub path: String,
    pub query: Box<Query>,
}

/// `{"<field>": {"value": <value>}}`
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    pub field: String,
    pub value: Value,
}

impl Serialize for TermQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Inner<'a> {
            value: &'a Value,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &Inner { value: &self.value })?;
        map.end()
    }
}

/// `{"<field>": {"gte": .., "lte": ..}}`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    pub field: String,
    pub gte: Option<Value>,
    pub lte: Option<Value>,
}

impl Serialize for RangeQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Bounds<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            gte: Option<&'a Value>,
            #[serde(skip_serializing_if = "Option::is_none")]
            lte: Option<&'a Value>,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.field,
            &Bounds {
                gte: self.gte.as_ref(),
                lte: self.lte.as_ref(),
            },
        )?;
        map.end()
    }
}

/// Matches every document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchAllQuery {}

/// Restricts which source fields come back with each hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFilter {
    pub includes: Vec<String>,
}

/// Sort key in wire form: `{"<field>": {"order": "asc"}}`
#[derive(Debug, Clone, PartialEq)]
pub struct SortClause(pub SortField);

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Order {
            order: crate::types::SortOrder,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.0.field, &Order { order: self.0.order })?;
        map.end()
    }
}

/// Highlight directive; fields keep the order they were added in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlight {
    fields: Vec<String>,
}

impl Highlight {
    /// Build from field names, dropping repeats but keeping first-seen order
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for field in fields {
            if !unique.contains(&field) {
                unique.push(field);
            }
        }
        Self { fields: unique }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl Serialize for Highlight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Fields<'a>(&'a [String]);

        impl Serialize for Fields<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for field in self.0 {
                    map.serialize_entry(field, &MatchAllQuery {})?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("fields", &Fields(&self.fields))?;
        map.end()
    }
}

/// Aggregation directive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Terms(TermsAggregation),
}

/// Bucket documents by the distinct values of `field`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermsAggregation {
    pub field: String,
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_multi_match_serialization() {
        let query = Query::multi_match("Title 1", vec!["title.korean".into()]);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"multi_match": {
                "query": "Title 1",
                "fields": ["title.korean"],
                "fuzziness": "AUTO"
            }})
        );
    }

    #[test]
    fn test_nested_serialization() {
        let query = Query::nested(
            "area",
            Query::multi_match("seoul", vec!["area.country.korean".into()]),
        );
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["nested"]["path"], "area");
        assert_eq!(
            value["nested"]["query"]["multi_match"]["fields"],
            json!(["area.country.korean"])
        );
    }

    #[test]
    fn test_term_and_range_serialization() {
        assert_eq!(
            serde_json::to_value(Query::term("price", 0)).unwrap(),
            json!({"term": {"price": {"value": 0}}})
        );
        assert_eq!(
            serde_json::to_value(Query::range("year", Some(json!(2020)), None)).unwrap(),
            json!({"range": {"year": {"gte": 2020}}})
        );
    }

    #[test]
    fn test_empty_bool_slots_are_omitted() {
        let query = Query::Bool(BoolQuery {
            must_not: vec![Query::term("price", 0)],
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"bool": {"must_not": [{"term": {"price": {"value": 0}}}]}})
        );
        assert_eq!(
            serde_json::to_value(Query::match_all()).unwrap(),
            json!({"match_all": {}})
        );
    }

    #[test]
    fn test_highlight_keeps_order_and_drops_repeats() {
        let highlight = Highlight::from_fields(
            ["title.korean", "content.korean", "title.korean"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(highlight.fields(), ["title.korean", "content.korean"]);

        let json = serde_json::to_string(&highlight).unwrap();
        assert_eq!(
            json,
            r#"{"fields":{"title.korean":{},"content.korean":{}}}"#
        );
    }

    #[test]
    fn test_sort_clause_serialization() {
        let clause = SortClause(SortField::desc("year"));
        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({"year": {"order": "desc"}})
        );
    }
}
