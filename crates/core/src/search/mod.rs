//! Search execution for docsearch
//!
//! This module ties request composition to execution:
//! - [`SearchProfile`] names the fields, sort keys and filter rules of a search
//! - [`SearchExecutor`] and [`ClientProvider`] are the seams to the engine
//! - [`SearchService`] runs single and batch searches and normalizes results
//!
//! # Examples
//!
//! ```rust
//! use docsearch_core::search::SearchProfile;
//! use docsearch_core::types::SearchIntent;
//!
//! let intent = SearchIntent::new("articles")
//!     .with_page(2)
//!     .with_size(20)
//!     .with_keyword("Title 1");
//! let request = SearchProfile::article().composer(&intent).compose();
//!
//! assert_eq!(request.from, Some(20));
//! assert_eq!(request.size, Some(20));
//! assert!(request.highlight.is_some());
//! ```

pub mod executor;
pub mod profile;
pub mod service;

pub use executor::{ClientProvider, SearchExecutor, SingleClientProvider};
pub use profile::{SearchProfile, ARTICLE_PROFILE, CAR_MASTER_PROFILE};
pub use service::SearchService;
