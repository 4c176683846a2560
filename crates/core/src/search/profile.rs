//! Named search profiles
//!
//! A profile holds everything about a search that does not come from the
//! caller: which fields are returned, which field groups the keyword is
//! matched against, the sort order and the filter rules.

use crate::query::{FilterPipeline, FilterRuleSpec, RequestComposer};
use crate::types::{FieldGroup, NestedFieldGroup, SearchIntent, SortField};
use crate::{DocSearchError, Result};
use serde::{Deserialize, Serialize};

/// Name of the built-in article profile
pub const ARTICLE_PROFILE: &str = "article";

/// Name of the built-in car master profile
pub const CAR_MASTER_PROFILE: &str = "car_master";

/// Request-shaping inputs for one kind of search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchProfile {
    pub name: String,
    #[serde(default)]
    pub include_fields: Vec<String>,
    #[serde(default)]
    pub field_groups: Vec<FieldGroup>,
    #[serde(default)]
    pub nested_field_groups: Vec<NestedFieldGroup>,
    #[serde(default)]
    pub sort_fields: Vec<SortField>,
    #[serde(default)]
    pub filters: Vec<FilterRuleSpec>,
}

impl SearchProfile {
    /// Empty profile: no projection, no field groups, no sort, no filters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            include_fields: Vec::new(),
            field_groups: Vec::new(),
            nested_field_groups: Vec::new(),
            sort_fields: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Full-text search over article bodies, titles and attachments
    pub fn article() -> Self {
        Self {
            include_fields: strings(["attachments_content", "content", "title"]),
            field_groups: vec![FieldGroup::new([
                "attachments_content.korean",
                "attachments_content.english",
                "content.korean",
                "content.english",
                "title.korean",
                "title.english",
            ])],
            ..Self::new(ARTICLE_PROFILE)
        }
    }

    /// Used-car listing search with structured filters
    pub fn car_master() -> Self {
        let term = |name: &str| FilterRuleSpec::Term {
            field: name.to_string(),
            attribute: name.to_string(),
        };
        let range = |name: &str| FilterRuleSpec::Range {
            field: name.to_string(),
            start_attribute: format!("start_{}", name),
            end_attribute: format!("end_{}", name),
        };

        let mut filters = vec![FilterRuleSpec::NotZero {
            field: "price".to_string(),
        }];
        filters.extend(
            [
                "manufacturer",
                "model",
                "color",
                "fuel",
                "type",
                "transmission",
                "cylinders",
            ]
            .into_iter()
            .map(term),
        );
        filters.extend(["year", "price", "odometer"].into_iter().map(range));

        Self {
            include_fields: strings([
                "image_url",
                "brand",
                "model",
                "price",
                "odometer",
                "year",
                "color",
            ]),
            field_groups: vec![FieldGroup::new([
                "brand.standard",
                "model.standard",
                "color.standard",
                "brand.english",
                "model.english",
                "color.english",
            ])],
            nested_field_groups: vec![NestedFieldGroup::new(
                "area",
                [
                    "country.standard",
                    "country.english",
                    "country.korean",
                    "country.combine",
                    "region.standard",
                    "region.english",
                    "region.korean",
                    "region.combine",
                ],
            )],
            sort_fields: vec![
                SortField::desc("year"),
                SortField::asc("price"),
                SortField::asc("odometer"),
            ],
            filters,
            ..Self::new(CAR_MASTER_PROFILE)
        }
    }

    /// Look up a built-in profile by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            ARTICLE_PROFILE => Some(Self::article()),
            CAR_MASTER_PROFILE => Some(Self::car_master()),
            _ => None,
        }
    }

    /// Filter pipeline built from this profile's rules
    pub fn pipeline(&self) -> FilterPipeline {
        self.filters
            .iter()
            .cloned()
            .fold(FilterPipeline::new(), |pipeline, spec| {
                pipeline.register_shared(spec.into_rule())
            })
    }

    /// Request composer for `intent` with this profile's inputs applied
    pub fn composer(&self, intent: &SearchIntent) -> RequestComposer {
        let filter = self.pipeline().apply(intent).into_query();

        RequestComposer::new(intent.index_name.as_str())
            .include_fields(self.include_fields.clone())
            .keyword(intent.keyword.as_str())
            .field_groups(self.field_groups.clone())
            .nested_groups(self.nested_field_groups.clone())
            .filter(filter)
            .sort_fields(self.sort_fields.clone())
            .from(intent.offset())
            .size(intent.size)
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DocSearchError::configuration(
                "Profile name cannot be empty",
            ));
        }

        for group in &self.field_groups {
            if group.fields.is_empty() {
                return Err(DocSearchError::configuration(format!(
                    "Profile '{}' has a field group with no fields",
                    self.name
                )));
            }
        }

        for group in &self.nested_field_groups {
            if group.path.trim().is_empty() || group.fields.is_empty() {
                return Err(DocSearchError::configuration(format!(
                    "Profile '{}' has a nested field group without a path or fields",
                    self.name
                )));
            }
        }

        if let Some(spec) = self.filters.iter().find(|spec| spec.field().trim().is_empty()) {
            return Err(DocSearchError::configuration(format!(
                "Profile '{}' has a filter rule without a field: {:?}",
                self.name, spec
            )));
        }

        Ok(())
    }
}

impl Default for SearchProfile {
    fn default() -> Self {
        Self::article()
    }
}

fn strings<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.into_iter().map(String::from).collect()
}
