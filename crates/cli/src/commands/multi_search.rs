//! Multi-search command: several keywords in one batch round trip

use crate::commands::{parse_attribute, CliCommand};
use crate::config::CliContext;
use clap::Args;
use docsearch_core::types::DEFAULT_PAGE_SIZE;
use docsearch_core::{Result, SearchIntent, SearchResult};
use serde_json::Value;
use tracing::{info, warn};

/// Search one index for several keywords at once
///
/// Each `--keyword` becomes one batch item; results are printed in the same
/// order. Without any keyword a single unfiltered item is sent.
///
/// # Examples
///
/// ```bash
/// docsearch multi-search --index articles -k rust -k elastic -k search
/// ```
#[derive(Args, Debug, Clone)]
pub struct MultiSearchArgs {
    /// Index or alias to search
    #[arg(short, long)]
    pub index: String,

    /// Keyword for one batch item (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Page number applied to every item
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Hits per page applied to every item
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,

    /// Search profile (defaults to the configured default profile)
    #[arg(long)]
    pub profile: Option<String>,

    /// Filter attribute applied to every item
    #[arg(
        short = 'a',
        long = "attr",
        value_name = "KEY=VALUE",
        value_parser = parse_attribute
    )]
    pub attributes: Vec<(String, Value)>,
}

impl MultiSearchArgs {
    /// One intent per keyword, in argument order
    pub fn to_intents(&self) -> Vec<SearchIntent> {
        let keywords: Vec<&str> = if self.keywords.is_empty() {
            vec![""]
        } else {
            self.keywords.iter().map(String::as_str).collect()
        };

        keywords
            .into_iter()
            .map(|keyword| {
                self.attributes.iter().fold(
                    SearchIntent::new(&self.index)
                        .with_page(self.page)
                        .with_size(self.size)
                        .with_keyword(keyword),
                    |intent, (name, value)| intent.with_attribute(name, value.clone()),
                )
            })
            .collect()
    }

    /// Execute the batch and return one result per keyword
    pub async fn run(&self, context: &CliContext) -> Result<Vec<SearchResult>> {
        let service = context.service(self.profile.as_deref())?;
        service.multi_search(&self.to_intents()).await
    }
}

impl CliCommand for MultiSearchArgs {
    async fn execute(&self, context: &CliContext) -> Result<()> {
        let results = self.run(context).await?;

        let failed = results.iter().filter(|r| r.is_error()).count();
        if failed > 0 {
            warn!(failed, items = results.len(), "Some batch items failed");
        }
        info!(index = %self.index, items = results.len(), "Multi-search completed");

        context.formatter().output_results(&results)
    }

    fn name(&self) -> &'static str {
        "multi-search"
    }

    fn validate(&self) -> Result<()> {
        self.to_intents().iter().try_for_each(SearchIntent::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::stub_context;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: MultiSearchArgs,
    }

    fn parse(argv: &[&str]) -> MultiSearchArgs {
        Harness::try_parse_from(std::iter::once("multi-search").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_one_intent_per_keyword() {
        let args = parse(&["-i", "articles", "-k", "rust", "-k", "search", "-a", "lang=en"]);
        let intents = args.to_intents();

        assert_eq!(intents.len(), 2);
        assert_eq!(intents[0].keyword, "rust");
        assert_eq!(intents[1].keyword, "search");
        assert!(intents.iter().all(|i| i.attribute("lang").is_some()));
    }

    #[test]
    fn test_no_keyword_yields_single_item() {
        let args = parse(&["-i", "articles"]);
        let intents = args.to_intents();

        assert_eq!(intents.len(), 1);
        assert!(intents[0].keyword.is_empty());
        assert!(args.validate().is_ok());
    }

    #[tokio::test]
    async fn test_run_sends_one_batch() {
        let (context, executor, _dir) = stub_context("{}\n");
        let args = parse(&["-i", "articles", "-k", "one", "-k", "two", "-k", "three"]);

        let results = args.run(&context).await.unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| !r.is_error()));

        let batches = executor.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].lines().count(), 6);
        assert!(batches[0].ends_with('\n'));
    }
}
