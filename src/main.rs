//! docsearch - keyword search over a remote document search engine
//!
//! Composes fuzzy multi-field boolean queries with filters, sorting,
//! highlighting and aggregation from a search profile, runs them against an
//! Elasticsearch-compatible engine and prints normalized results.

use clap::{Parser, Subcommand};
use docsearch_cli::{
    execute_command, exit_code_for_error, CliContext, ComposeArgs, HealthCommand,
    MultiSearchArgs, OutputFormat, SearchArgs, ValidateCommand,
};
use docsearch_core::Result;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keyword search over a remote document search engine")]
#[command(long_about = r#"
docsearch builds search requests from a named profile (projection fields,
fuzzy field groups, nested groups, sort keys and filter rules), sends them to
an Elasticsearch-compatible engine and prints a uniform result shape.

Built-in profiles: article, car_master. More can be defined in the
configuration file; DOCSEARCH__* environment variables override file values.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (json, yaml, pretty, compact)
    #[arg(short, long, default_value = "pretty", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one keyword search
    Search(SearchArgs),

    /// Run one search per keyword in a single batch
    MultiSearch(MultiSearchArgs),

    /// Print the request a search would send, without sending it
    Compose(ComposeArgs),

    /// Validate configuration file
    Validate(ValidateCommand),

    /// Check that the search engine answers
    Health(HealthCommand),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(exit_code_for_error(&e));
    }
}

async fn run(cli: Cli) -> Result<()> {
    docsearch_cli::init()?;
    init_logging(&cli)?;

    info!("Starting docsearch v{}", env!("CARGO_PKG_VERSION"));

    let context = CliContext::new(cli.config.clone(), cli.output);

    match &cli.command {
        Commands::Search(args) => execute_command(args, &context).await?,
        Commands::MultiSearch(args) => execute_command(args, &context).await?,
        Commands::Compose(args) => execute_command(args, &context).await?,
        Commands::Validate(command) => execute_command(command, &context).await?,
        Commands::Health(command) => execute_command(command, &context).await?,
        Commands::Version => handle_version(),
    }

    Ok(())
}

/// `DOCSEARCH_LOG_*` variables take precedence over the global flags
fn init_logging(cli: &Cli) -> Result<()> {
    if docsearch_infra::logger_env_present() {
        return docsearch_infra::init_logger(docsearch_infra::logger_config_from_env());
    }

    let log_level = if cli.verbose { "debug" } else { "warn" };
    docsearch_core::init_logging_with_config(log_level, cli.output.log_format())
}

fn handle_version() {
    println!("{}", docsearch_core::version_info());
    println!("  cli: v{}", docsearch_cli::VERSION);
    println!("  infra: v{}", docsearch_infra::VERSION);
}
