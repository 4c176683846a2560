//! Filter rules and the pipeline that folds them into AND/NOT clauses
//!
//! Each rule looks at a [`SearchIntent`] on its own and either contributes a
//! single clause or nothing. Rules are combined with logical AND, so the order
//! they are registered in does not change which documents match.

use super::dsl::{BoolQuery, Query};
use crate::types::SearchIntent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a rule's clause lands in the boolean query
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Non-scoring AND clause
    Filter(Query),
    /// Non-scoring negated clause
    MustNot(Query),
}

/// A named, independent filter predicate
pub trait FilterRule: Send + Sync + std::fmt::Debug {
    /// Rule name, used for logging
    fn name(&self) -> &str;

    /// Clause to add for this intent, or `None` when the rule's guard fails
    fn apply_filter(&self, intent: &SearchIntent) -> Option<Clause>;
}

/// Excludes documents whose numeric `field` equals exactly zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotZeroRule {
    field: String,
}

impl NotZeroRule {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl FilterRule for NotZeroRule {
    fn name(&self) -> &str {
        "not_zero"
    }

    fn apply_filter(&self, _intent: &SearchIntent) -> Option<Clause> {
        Some(Clause::MustNot(Query::term(self.field.as_str(), 0)))
    }
}

/// Exact match on `field` using the intent attribute named `attribute`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRule {
    field: String,
    attribute: String,
}

impl TermRule {
    pub fn new(field: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            attribute: attribute.into(),
        }
    }
}

impl FilterRule for TermRule {
    fn name(&self) -> &str {
        "term"
    }

    fn apply_filter(&self, intent: &SearchIntent) -> Option<Clause> {
        let value = intent.attribute(&self.attribute)?;
        Some(Clause::Filter(Query::term(
            self.field.as_str(),
            value.clone(),
        )))
    }
}

/// Inclusive range on `field` bounded by two optional intent attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRule {
    field: String,
    start_attribute: String,
    end_attribute: String,
}

impl RangeRule {
    pub fn new(
        field: impl Into<String>,
        start_attribute: impl Into<String>,
        end_attribute: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            start_attribute: start_attribute.into(),
            end_attribute: end_attribute.into(),
        }
    }
}

impl FilterRule for RangeRule {
    fn name(&self) -> &str {
        "range"
    }

    fn apply_filter(&self, intent: &SearchIntent) -> Option<Clause> {
        let gte = intent.attribute(&self.start_attribute).cloned();
        let lte = intent.attribute(&self.end_attribute).cloned();
        if gte.is_none() && lte.is_none() {
            return None;
        }
        Some(Clause::Filter(Query::range(self.field.as_str(), gte, lte)))
    }
}

/// Append-only accumulation of filter and must-not clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseSet {
    filter: Vec<Query>,
    must_not: Vec<Query>,
}

impl ClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new set with `clause` appended
    pub fn with(mut self, clause: Clause) -> Self {
        match clause {
            Clause::Filter(query) => self.filter.push(query),
            Clause::MustNot(query) => self.must_not.push(query),
        }
        self
    }

    pub fn filter(&self) -> &[Query] {
        &self.filter
    }

    pub fn must_not(&self) -> &[Query] {
        &self.must_not
    }

    pub fn len(&self) -> usize {
        self.filter.len() + self.must_not.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finalize into one boolean clause, or `None` when nothing was added
    pub fn into_query(self) -> Option<Query> {
        if self.is_empty() {
            return None;
        }
        Some(Query::Bool(BoolQuery {
            filter: self.filter,
            must_not: self.must_not,
            ..Default::default()
        }))
    }
}

/// Ordered registry of independent filter rules
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    rules: Vec<Arc<dyn FilterRule>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule
    pub fn register<R: FilterRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Register an already shared rule
    pub fn register_shared(mut self, rule: Arc<dyn FilterRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `intent` and collect their clauses
    pub fn apply(&self, intent: &SearchIntent) -> ClauseSet {
        self.rules
            .iter()
            .fold(ClauseSet::new(), |clauses, rule| match rule.apply_filter(intent) {
                Some(clause) => {
                    tracing::trace!(rule = rule.name(), "Filter rule contributed a clause");
                    clauses.with(clause)
                }
                None => clauses,
            })
    }
}

/// Serializable description of a filter rule, as found in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterRuleSpec {
    /// Must-not `field == 0`
    NotZero { field: String },
    /// Filter `field == intent[attribute]`
    Term { field: String, attribute: String },
    /// Filter `intent[start_attribute] <= field <= intent[end_attribute]`
    Range {
        field: String,
        start_attribute: String,
        end_attribute: String,
    },
}

impl FilterRuleSpec {
    /// Build the rule object this spec describes
    pub fn into_rule(self) -> Arc<dyn FilterRule> {
        match self {
            Self::NotZero { field } => Arc::new(NotZeroRule::new(field)),
            Self::Term { field, attribute } => Arc::new(TermRule::new(field, attribute)),
            Self::Range {
                field,
                start_attribute,
                end_attribute,
            } => Arc::new(RangeRule::new(field, start_attribute, end_attribute)),
        }
    }

    /// Field the rule constrains
    pub fn field(&self) -> &str {
        match self {
            Self::NotZero { field } | Self::Term { field, .. } | Self::Range { field, .. } => field,
        }
    }
}
