//! CLI configuration module

use docsearch_core::{
    ClientProvider, DocSearchConfig, DocSearchError, Result, SearchProfile, SearchService,
};
use docsearch_infra::ClientRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::output::OutputFormatter;

/// File name looked up in the user config directory
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    #[default]
    Pretty,
    Compact,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = DocSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            _ => Err(DocSearchError::validation(format!(
                "Invalid output format: {}",
                s
            ))),
        }
    }
}

impl OutputFormat {
    /// Log format matching this output format
    pub fn log_format(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Compact => "compact",
            Self::Yaml | Self::Pretty => "pretty",
        }
    }
}

/// State shared by every command of one invocation
///
/// The search configuration is loaded on demand so that commands which read
/// their own file (such as `validate`) do not fail on a broken default file.
#[derive(Clone)]
pub struct CliContext {
    config_file: Option<PathBuf>,
    output: OutputFormat,
    use_colors: bool,
    provider: Option<Arc<dyn ClientProvider>>,
}

impl std::fmt::Debug for CliContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliContext")
            .field("config_file", &self.config_file)
            .field("output", &self.output)
            .field("use_colors", &self.use_colors)
            .finish_non_exhaustive()
    }
}

impl CliContext {
    /// Create a context; without an explicit file the user config file is used if present
    pub fn new(config_file: Option<PathBuf>, output: OutputFormat) -> Self {
        Self {
            config_file: config_file.or_else(default_config_path),
            output,
            use_colors: supports_color(),
            provider: None,
        }
    }

    /// Use a fixed client provider instead of an engine-backed registry
    pub fn with_provider(mut self, provider: Arc<dyn ClientProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Enable or disable colored output
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors && supports_color();
        self
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    /// Load the layered search configuration
    pub fn load_config(&self) -> Result<DocSearchConfig> {
        DocSearchConfig::load_layered(self.config_file.as_deref())
    }

    /// Resolve a search profile by name, or the configured default
    pub fn profile(&self, name: Option<&str>) -> Result<SearchProfile> {
        self.load_config()?.resolve_profile(name)
    }

    /// Search service bound to the named profile
    pub fn service(&self, profile: Option<&str>) -> Result<SearchService> {
        let config = self.load_config()?;
        let profile = config.resolve_profile(profile)?;
        let provider = match &self.provider {
            Some(provider) => Arc::clone(provider),
            None => Arc::new(ClientRegistry::new(config.engine.clone())),
        };
        Ok(SearchService::new(provider, profile))
    }

    /// Formatter writing to stdout in the selected format
    pub fn formatter(&self) -> OutputFormatter {
        OutputFormatter::with_format(self.output, self.use_colors)
    }
}

/// `<user config dir>/docsearch/config.yaml`, when that file exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("docsearch").join(DEFAULT_CONFIG_FILE))
        .filter(|path| path.is_file())
}

/// Check if output supports colors
pub fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    !crate::is_ci() && atty::is(atty::Stream::Stdout)
}
