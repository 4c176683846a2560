//! docsearch Infrastructure Library
//!
//! Infrastructure components for docsearch: the HTTP transport to the search
//! engine, the concurrent client handle registry, and logger setup.

use docsearch_core::{EngineConfig, Result};

pub mod client;
pub mod logger;
pub mod registry;

pub use client::*;
pub use logger::*;
pub use registry::*;

/// Infrastructure version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check for infrastructure components
pub async fn health_check(config: &EngineConfig) -> Result<HealthStatus> {
    let client = EngineClient::new(config)?;
    let engine_reachable = client.health_check().await?;

    tracing::info!(
        url = %client.base_url(),
        engine_reachable,
        "Infrastructure health check"
    );

    Ok(HealthStatus {
        engine_url: client.base_url().to_string(),
        engine_reachable,
    })
}

/// Health status for infrastructure components
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HealthStatus {
    pub engine_url: String,
    pub engine_reachable: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.engine_reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_reachable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"{"tagline":"You Know, for Search"}"#)
            .create_async()
            .await;

        let status = health_check(&EngineConfig::new(server.url())).await.unwrap();
        assert!(status.is_healthy());
        assert!(status.engine_url.starts_with("http://"));
    }

    #[tokio::test]
    async fn test_health_check_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(503)
            .create_async()
            .await;

        let status = health_check(&EngineConfig::new(server.url())).await.unwrap();
        assert!(!status.is_healthy());
    }

    #[tokio::test]
    async fn test_health_check_bad_url() {
        assert!(health_check(&EngineConfig::new("nope")).await.is_err());
    }
}
