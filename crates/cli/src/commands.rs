//! CLI commands module

use crate::config::CliContext;
use docsearch_core::Result;

pub mod compose;
pub mod health;
pub mod multi_search;
pub mod search;
pub mod validate;

pub use compose::*;
pub use health::*;
pub use multi_search::*;
pub use search::*;
pub use validate::*;

/// Base trait for CLI commands
#[allow(async_fn_in_trait)]
pub trait CliCommand {
    /// Execute the command
    async fn execute(&self, context: &CliContext) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;

    /// Validate command arguments
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Common command execution wrapper
pub async fn execute_command<T: CliCommand>(command: &T, context: &CliContext) -> Result<()> {
    tracing::info!("Executing command: {}", command.name());

    command.validate()?;
    command.execute(context).await?;

    tracing::info!("Command {} completed successfully", command.name());
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned executor and context shared by the command tests

    use crate::config::{CliContext, OutputFormat};
    use async_trait::async_trait;
    use docsearch_core::query::{BatchRequest, ComposedRequest};
    use docsearch_core::response::{EngineResponse, MultiSearchResponse};
    use docsearch_core::search::SingleClientProvider;
    use docsearch_core::{Result, SearchExecutor};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Answers every call with fixed payloads and records what it was sent
    #[derive(Default)]
    pub(crate) struct StubExecutor {
        pub(crate) requests: Mutex<Vec<Value>>,
        pub(crate) batches: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchExecutor for StubExecutor {
        async fn execute(&self, request: &ComposedRequest) -> Result<EngineResponse> {
            self.requests
                .lock()
                .unwrap()
                .push(serde_json::to_value(request)?);
            Ok(serde_json::from_value(json!({
                "took": 2,
                "hits": {
                    "total": {"value": 1, "relation": "eq"},
                    "max_score": 2.0,
                    "hits": [{"_index": request.index, "_id": "1", "_score": 2.0,
                        "_source": {"title": "Title 1"}}]
                }
            }))?)
        }

        async fn execute_batch(&self, batch: &BatchRequest) -> Result<MultiSearchResponse> {
            self.batches.lock().unwrap().push(batch.to_ndjson()?);
            let responses: Vec<Value> = (0..batch.len())
                .map(|_| json!({"took": 1, "hits": {"total": 0, "hits": []}, "status": 200}))
                .collect();
            Ok(serde_json::from_value(json!({"took": 3, "responses": responses}))?)
        }
    }

    /// Context over a temporary config file and a stub executor
    pub(crate) fn stub_context(yaml: &str) -> (CliContext, Arc<StubExecutor>, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docsearch.yaml");
        std::fs::write(&path, yaml).unwrap();

        let executor = Arc::new(StubExecutor::default());
        let context = CliContext::new(Some(path), OutputFormat::Json)
            .with_colors(false)
            .with_provider(Arc::new(SingleClientProvider::new(executor.clone())));
        (context, executor, dir)
    }
}
