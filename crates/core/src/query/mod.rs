//! Search request assembly
//!
//! A [`SearchIntent`](crate::types::SearchIntent) flows through the
//! [`FilterPipeline`], the [`QueryAssembler`] and the [`RequestComposer`] to
//! become a [`ComposedRequest`]; several of those are packaged by the
//! [`BatchComposer`] into a [`BatchRequest`].

pub mod assembler;
pub mod batch;
pub mod composer;
pub mod dsl;
pub mod filter;

pub use assembler::{ComposedQuery, QueryAssembler};
pub use batch::{BatchBody, BatchComposer, BatchItem, BatchRequest};
pub use composer::{ComposedRequest, RequestComposer, COUNT_BY_INDEX_AGGREGATION};
pub use dsl::{Highlight, Query};
pub use filter::{
    Clause, ClauseSet, FilterPipeline, FilterRule, FilterRuleSpec, NotZeroRule, RangeRule,
    TermRule,
};
