//! Error handling for the docsearch core library

use std::fmt;
use thiserror::Error;

/// Result type alias for docsearch operations
pub type Result<T> = std::result::Result<T, DocSearchError>;

/// Boxed cause carried by execution failures
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for docsearch operations
#[derive(Error, Debug)]
pub enum DocSearchError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),

    /// Invalid argument passed to an operation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Network connectivity errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// The search engine answered with a non-success status
    #[error("Search engine error (HTTP {status}): {message}")]
    Engine { status: u16, message: String },

    /// A search or multi-search call failed against a target
    #[error("Failed to execute {operation} on target: {target}")]
    Execution {
        operation: String,
        target: String,
        #[source]
        source: BoxedCause,
    },

    /// Invalid configuration values
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// Resource not found errors
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },
}

impl DocSearchError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an engine error from an HTTP status and response body
    pub fn engine<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Engine {
            status,
            message: message.into(),
        }
    }

    /// Wrap a failure raised while executing against `target`
    pub fn execution<O, T, E>(operation: O, target: T, source: E) -> Self
    where
        O: Into<String>,
        T: Into<String>,
        E: Into<BoxedCause>,
    {
        Self::Execution {
            operation: operation.into(),
            target: target.into(),
            source: source.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Http(_) => true,
            Self::Engine { status, .. } => *status >= 500,
            Self::Execution { source, .. } => source
                .downcast_ref::<DocSearchError>()
                .map(DocSearchError::is_retryable)
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Http(_) | Self::Network { .. } => ErrorCategory::Network,
            Self::Json(_) | Self::Yaml(_) => ErrorCategory::Serialization,
            Self::Config(_) | Self::Configuration { .. } | Self::Url(_) => {
                ErrorCategory::Configuration
            }
            Self::Engine { .. } => ErrorCategory::Engine,
            Self::Execution { .. } => ErrorCategory::Execution,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Generic(_) => ErrorCategory::Generic,
        }
    }
}

/// Error categories for metrics and logging
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    FileSystem,
    Network,
    Serialization,
    Configuration,
    Engine,
    Execution,
    Validation,
    NotFound,
    Generic,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem => write!(f, "filesystem"),
            Self::Network => write!(f, "network"),
            Self::Serialization => write!(f, "serialization"),
            Self::Configuration => write!(f, "configuration"),
            Self::Engine => write!(f, "engine"),
            Self::Execution => write!(f, "execution"),
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_creation() {
        let err = DocSearchError::validation("indexName must not be null or empty");
        assert!(matches!(err, DocSearchError::Validation { .. }));
        assert_eq!(
            err.to_string(),
            "Validation error: indexName must not be null or empty"
        );
    }

    #[test]
    fn test_error_categories() {
        let err = DocSearchError::engine(400, "parsing_exception");
        assert_eq!(err.category(), ErrorCategory::Engine);

        let err = DocSearchError::network("connection refused");
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(DocSearchError::network("test").is_retryable());
        assert!(DocSearchError::engine(503, "unavailable").is_retryable());
        assert!(!DocSearchError::engine(400, "bad query").is_retryable());
        assert!(!DocSearchError::validation("test").is_retryable());
    }

    #[test]
    fn test_execution_keeps_target_and_cause() {
        let err = DocSearchError::execution(
            "search",
            "articles",
            DocSearchError::network("connection reset"),
        );
        assert_eq!(err.to_string(), "Failed to execute search on target: articles");
        assert!(err.is_retryable());

        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "Network error: connection reset");
    }

    #[test]
    fn test_error_from_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DocSearchError = io_err.into();
        assert!(matches!(err, DocSearchError::Io(_)));

        let json_err = serde_json::from_str::<i32>("invalid json").unwrap_err();
        let err: DocSearchError = json_err.into();
        assert!(matches!(err, DocSearchError::Json(_)));
    }
}
