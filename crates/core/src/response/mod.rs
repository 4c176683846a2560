//! Engine response types and their normalization into [`SearchResult`]

pub mod engine;
pub mod normalizer;
pub mod result;

pub use engine::{EngineResponse, Hit, HitsMetadata, MultiSearchItem, MultiSearchResponse, TotalHits};
pub use normalizer::{MultiResponseNormalizer, Paging, ResponseNormalizer, UNKNOWN_ERROR};
pub use result::SearchResult;
