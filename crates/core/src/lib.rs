//! docsearch Core Library
//!
//! Search-request assembly and response normalization for a remote document
//! search engine. A [`SearchIntent`] is turned into a composed boolean query
//! with fuzzy multi-field matching, nested-object matching, sorting,
//! highlighting and a fixed aggregation; engine responses are reshaped into a
//! uniform [`SearchResult`].

pub mod config;
pub mod error;
pub mod query;
pub mod response;
pub mod search;
pub mod types;

// Re-export commonly used types
pub use config::{DocSearchConfig, EngineConfig, LoggingConfig};
pub use error::{DocSearchError, ErrorCategory, Result};
pub use query::{
    BatchComposer, BatchRequest, ComposedQuery, ComposedRequest, FilterPipeline, FilterRule,
    FilterRuleSpec, QueryAssembler, RequestComposer,
};
pub use response::{
    EngineResponse, MultiResponseNormalizer, MultiSearchResponse, ResponseNormalizer,
    SearchResult,
};
pub use search::{ClientProvider, SearchExecutor, SearchProfile, SearchService};
pub use types::{FieldGroup, NestedFieldGroup, SearchIntent, SortField, SortOrder};

/// Initialize logging with custom configuration
///
/// Events go to stderr so command output on stdout stays machine readable.
pub fn init_logging_with_config(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_new(level)
        .map_err(|e| DocSearchError::validation(format!("Invalid log level '{}': {}", level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let initialized = match format {
        "json" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        "text" | "pretty" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        "compact" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        _ => {
            return Err(DocSearchError::validation(format!(
                "Unknown log format: {}",
                format
            )));
        }
    };

    initialized
        .map_err(|e| DocSearchError::configuration(format!("Logging already initialized: {}", e)))
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _: Result<()> = Ok(());
        let intent = SearchIntent::new("articles");
        let _request = SearchProfile::default().composer(&intent).compose();
        let _config = DocSearchConfig::default();
    }

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert!(info.contains("docsearch-core"));
        assert!(info.contains("v"));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let result = init_logging_with_config("info", "xml");
        assert!(matches!(result, Err(DocSearchError::Validation { .. })));
    }

    #[test]
    fn test_second_logging_init_is_rejected() {
        // Whichever call comes first in this process may install the subscriber
        let _ = init_logging_with_config("debug", "compact");
        let result = init_logging_with_config("debug", "compact");
        assert!(matches!(result, Err(DocSearchError::Configuration { .. })));
    }
}
