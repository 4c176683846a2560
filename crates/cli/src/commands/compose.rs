//! Compose command: print the request body without executing it

use crate::commands::{CliCommand, IntentArgs};
use crate::config::{CliContext, OutputFormat};
use clap::Args;
use docsearch_core::query::{BatchComposer, ComposedRequest};
use docsearch_core::Result;

/// Show the search request a set of arguments would send
///
/// # Examples
///
/// ```bash
/// docsearch compose --index cars --profile car_master -k bmw -a start_price=1000
///
/// # As a multi-search body
/// docsearch compose --index articles -k rust --ndjson
/// ```
#[derive(Args, Debug, Clone)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub intent: IntentArgs,

    /// Print the newline-delimited multi-search body instead of the JSON request
    #[arg(long)]
    pub ndjson: bool,
}

impl ComposeArgs {
    /// Compose the request for these arguments
    pub fn run(&self, context: &CliContext) -> Result<ComposedRequest> {
        let service = context.service(self.intent.profile.as_deref())?;
        service.compose(&self.intent.to_intent())
    }
}

impl CliCommand for ComposeArgs {
    async fn execute(&self, context: &CliContext) -> Result<()> {
        let request = self.run(context)?;

        if self.ndjson {
            let body = BatchComposer::compose([request]).to_ndjson()?;
            print!("{}", body);
            return Ok(());
        }

        // The request is a JSON document; the key/value listing hides its shape
        match context.output() {
            OutputFormat::Pretty => {
                crate::output::OutputFormatter::with_format(OutputFormat::Json, false)
                    .output(&request)
            }
            _ => context.formatter().output(&request),
        }
    }

    fn name(&self) -> &'static str {
        "compose"
    }

    fn validate(&self) -> Result<()> {
        self.intent.validate()
    }
}
