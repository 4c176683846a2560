//! Search command: one keyword search against one index
//!
//! Also home of the intent arguments shared with `compose`.

use crate::commands::CliCommand;
use crate::config::CliContext;
use clap::Args;
use docsearch_core::types::DEFAULT_PAGE_SIZE;
use docsearch_core::{Result, SearchIntent, SearchResult};
use serde_json::Value;
use tracing::info;

/// Arguments describing one search intent
#[derive(Args, Debug, Clone)]
pub struct IntentArgs {
    /// Index or alias to search
    #[arg(short, long)]
    pub index: String,

    /// Keyword matched fuzzily against the profile's fields
    ///
    /// Leave empty to rely on filters alone.
    #[arg(short, long, default_value = "")]
    pub keyword: String,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Hits per page
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,

    /// Search profile (defaults to the configured default profile)
    #[arg(long)]
    pub profile: Option<String>,

    /// Filter attribute consumed by the profile's filter rules
    ///
    /// Values that parse as JSON (numbers, booleans, arrays) keep their type;
    /// anything else is taken as a string.
    #[arg(
        short = 'a',
        long = "attr",
        value_name = "KEY=VALUE",
        value_parser = parse_attribute
    )]
    pub attributes: Vec<(String, Value)>,
}

impl IntentArgs {
    /// Build the search intent these arguments describe
    pub fn to_intent(&self) -> SearchIntent {
        self.attributes.iter().fold(
            SearchIntent::new(&self.index)
                .with_page(self.page)
                .with_size(self.size)
                .with_keyword(&self.keyword),
            |intent, (name, value)| intent.with_attribute(name, value.clone()),
        )
    }

    pub fn validate(&self) -> Result<()> {
        self.to_intent().validate()
    }
}

/// Parse a `KEY=VALUE` filter attribute
pub fn parse_attribute(raw: &str) -> std::result::Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("attribute name is empty in '{}'", raw));
    }

    let value = serde_json::from_str::<Value>(value)
        .ok()
        .filter(|parsed| !parsed.is_object())
        .unwrap_or_else(|| Value::String(value.to_string()));

    Ok((name.to_string(), value))
}

/// Run a keyword search and print the normalized result
///
/// # Examples
///
/// ```bash
/// # Fuzzy keyword search over articles
/// docsearch search --index articles --keyword "search engine"
///
/// # Filtered search with the car profile
/// docsearch search --index cars --profile car_master -a start_year=2015 -a color=red
/// ```
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub intent: IntentArgs,
}

impl SearchArgs {
    /// Execute the search and return the normalized result
    pub async fn run(&self, context: &CliContext) -> Result<SearchResult> {
        let service = context.service(self.intent.profile.as_deref())?;
        service.search(&self.intent.to_intent()).await
    }
}

impl CliCommand for SearchArgs {
    async fn execute(&self, context: &CliContext) -> Result<()> {
        let result = self.run(context).await?;

        info!(
            index = %self.intent.index,
            total = result.total,
            hits = result.len(),
            "Search completed"
        );

        context
            .formatter()
            .output_results(std::slice::from_ref(&result))
    }

    fn name(&self) -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<()> {
        self.intent.validate()
    }
}
