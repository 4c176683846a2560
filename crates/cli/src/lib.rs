//! docsearch CLI Library
//!
//! Command-line interface components for docsearch: command arguments,
//! invocation context and output formatting.

use docsearch_core::{DocSearchError, Result};

pub mod commands;
pub mod config;
pub mod output;

pub use commands::*;
pub use config::*;
pub use output::*;

/// CLI version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the CLI environment
pub fn init() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("docsearch encountered an error: {}", info);
    }));

    Ok(())
}

/// Check if running in CI environment
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Get the appropriate exit code for an error
pub fn exit_code_for_error(error: &DocSearchError) -> i32 {
    match error {
        DocSearchError::Validation { .. } => 2,
        DocSearchError::NotFound { .. } => 3,
        DocSearchError::Network { .. }
        | DocSearchError::Execution { .. }
        | DocSearchError::Http(_) => 5,
        DocSearchError::Engine { .. } => 6,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert!(init().is_ok());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for_error(&DocSearchError::validation("test")), 2);
        assert_eq!(exit_code_for_error(&DocSearchError::not_found("test")), 3);
        assert_eq!(exit_code_for_error(&DocSearchError::network("down")), 5);
        assert_eq!(
            exit_code_for_error(&DocSearchError::execution(
                "search",
                "articles",
                DocSearchError::network("down")
            )),
            5
        );
        assert_eq!(exit_code_for_error(&DocSearchError::engine(400, "bad")), 6);
        assert_eq!(
            exit_code_for_error(&DocSearchError::configuration("bad")),
            1
        );
    }
}
