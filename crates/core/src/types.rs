//! Core type definitions for docsearch

use crate::{DocSearchError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default page size used when a caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Caller-supplied description of what to search for and how to page it
///
/// An intent is built once per inbound request and not mutated afterwards.
/// Structured filter attributes are free-form; filter rules look them up by
/// name and skip themselves when the attribute is missing or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIntent {
    /// Index (and client target) to search
    pub index_name: String,
    /// 1-based page number
    pub page: u32,
    /// Number of results per page
    pub size: u32,
    /// Keyword to match, may be empty
    #[serde(default)]
    pub keyword: String,
    /// Optional structured filter attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl SearchIntent {
    /// Create an intent for the first page of `index_name`
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            keyword: String::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Set the page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Add a structured filter attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Offset of the first result: `(page - 1) * size`
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Look up an attribute, treating null and empty strings as absent
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        match self.attributes.get(name)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::Array(items) if items.is_empty() => None,
            value => Some(value),
        }
    }

    /// Reject intents that can never produce a valid request
    pub fn validate(&self) -> Result<()> {
        if self.index_name.trim().is_empty() {
            return Err(DocSearchError::validation(
                "indexName must not be null or empty",
            ));
        }

        if self.page == 0 {
            return Err(DocSearchError::validation("page must be 1 or greater"));
        }

        Ok(())
    }
}

/// Fields searched together with fuzzy OR semantics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub fields: Vec<String>,
}

impl FieldGroup {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// A field group matched inside a nested object path
///
/// Field names are relative to `path`. The path is prepended when queries
/// and highlights are built, so a name already written as `path.field`
/// ends up as `path.path.field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedFieldGroup {
    pub path: String,
    pub fields: Vec<String>,
}

impl NestedFieldGroup {
    pub fn new<I, S>(path: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Field names qualified with the nesting path (`path.field`)
    pub fn qualified_fields(&self) -> impl Iterator<Item = String> + '_ {
        self.fields
            .iter()
            .map(move |field| format!("{}.{}", self.path, field))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = DocSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(DocSearchError::validation(format!(
                "Invalid sort order: {}",
                s
            ))),
        }
    }
}

/// One sort key; ties fall through to the next key in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
}

impl SortField {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}
