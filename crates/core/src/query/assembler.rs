//! Keyword query assembly
//!
//! Turns a keyword plus plain and nested field groups into scoring OR clauses,
//! and attaches an optional non-scoring filter clause.

use super::dsl::{BoolQuery, Query};
use crate::types::{FieldGroup, NestedFieldGroup};
use serde::{Serialize, Serializer};

/// Boolean query with should, filter and minimum-should-match slots
///
/// `minimum_should_match` is `Some(1)` exactly when `should` is non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedQuery {
    should: Vec<Query>,
    filter: Option<Query>,
    minimum_should_match: Option<u32>,
}

impl ComposedQuery {
    pub fn should(&self) -> &[Query] {
        &self.should
    }

    pub fn filter(&self) -> Option<&Query> {
        self.filter.as_ref()
    }

    pub fn minimum_should_match(&self) -> Option<u32> {
        self.minimum_should_match
    }

    /// True when the query has neither should nor filter clauses
    pub fn is_match_all(&self) -> bool {
        self.should.is_empty() && self.filter.is_none()
    }

    /// Engine query this description stands for
    pub fn to_query(&self) -> Query {
        if self.is_match_all() {
            return Query::match_all();
        }
        Query::Bool(BoolQuery {
            should: self.should.clone(),
            filter: self.filter.iter().cloned().collect(),
            must_not: Vec::new(),
            minimum_should_match: self.minimum_should_match,
        })
    }
}

impl Serialize for ComposedQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_query().serialize(serializer)
    }
}

/// Builds [`ComposedQuery`] values; performs no validation of field names
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryAssembler;

impl QueryAssembler {
    /// Assemble the keyword and filter clauses into one query
    ///
    /// Nested groups are emitted before plain groups. An empty keyword yields
    /// no should clauses.
    pub fn assemble(
        keyword: &str,
        field_groups: &[FieldGroup],
        nested_groups: &[NestedFieldGroup],
        filter: Option<Query>,
    ) -> ComposedQuery {
        let should: Vec<Query> = if keyword.is_empty() {
            Vec::new()
        } else {
            let nested = nested_groups.iter().map(|group| {
                Query::nested(
                    group.path.as_str(),
                    Query::multi_match(keyword, group.qualified_fields().collect()),
                )
            });
            let plain = field_groups
                .iter()
                .map(|group| Query::multi_match(keyword, group.fields.clone()));
            nested.chain(plain).collect()
        };

        let minimum_should_match = if should.is_empty() { None } else { Some(1) };

        ComposedQuery {
            should,
            filter,
            minimum_should_match,
        }
    }
}
