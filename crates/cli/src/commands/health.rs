//! Health command: probe the configured search engine

use crate::commands::CliCommand;
use crate::config::{CliContext, OutputFormat};
use clap::Args;
use docsearch_core::{DocSearchError, Result};
use docsearch_infra::HealthStatus;

/// Check that the configured search engine answers
#[derive(Debug, Clone, Default, Args)]
pub struct HealthCommand {}

impl HealthCommand {
    /// Probe the engine named by the context's configuration
    pub async fn run(&self, context: &CliContext) -> Result<HealthStatus> {
        let config = context.load_config()?;
        docsearch_infra::health_check(&config.engine).await
    }
}

impl CliCommand for HealthCommand {
    async fn execute(&self, context: &CliContext) -> Result<()> {
        let status = self.run(context).await?;
        let mut formatter = context.formatter();

        match context.output() {
            OutputFormat::Pretty if status.is_healthy() => {
                formatter.success(&format!("Search engine reachable at {}", status.engine_url))?
            }
            OutputFormat::Pretty => formatter.error(&format!(
                "Search engine unreachable at {}",
                status.engine_url
            ))?,
            _ => formatter.output(&status)?,
        }

        if status.is_healthy() {
            Ok(())
        } else {
            Err(DocSearchError::network(format!(
                "Search engine at {} is unreachable",
                status.engine_url
            )))
        }
    }

    fn name(&self) -> &'static str {
        "health"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::stub_context;

    #[tokio::test]
    async fn test_health_reports_reachable_engine() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let (context, _executor, _dir) =
            stub_context(&format!("engine:\n  url: {}\n", server.url()));
        let status = HealthCommand::default().run(&context).await.unwrap();

        assert!(status.is_healthy());
    }

    #[tokio::test]
    async fn test_unreachable_engine_fails_with_network_error() {
        let (context, _executor, _dir) = stub_context("engine:\n  url: http://127.0.0.1:1\n");

        let err = HealthCommand::default().execute(&context).await.unwrap_err();

        assert!(matches!(err, DocSearchError::Network { .. }));
    }
}
