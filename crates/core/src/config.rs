//! Configuration types for the docsearch core library

use crate::search::SearchProfile;
use crate::{DocSearchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "DOCSEARCH";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSearchConfig {
    /// Search engine connection settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Profile used when a command does not name one
    #[serde(default = "default_profile_name")]
    pub default_profile: String,
    /// Search profiles in addition to the built-in ones
    #[serde(default)]
    pub profiles: Vec<SearchProfile>,
}

impl Default for DocSearchConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            logging: LoggingConfig::default(),
            default_profile: default_profile_name(),
            profiles: Vec::new(),
        }
    }
}

/// Search engine connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the engine
    #[serde(default = "default_engine_url")]
    pub url: String,
    /// Basic auth user name
    #[serde(default)]
    pub username: Option<String>,
    /// Basic auth password
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Upper bound on cached client handles
    #[serde(default = "default_max_cached_clients")]
    pub max_cached_clients: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            username: None,
            password: None,
            timeout_seconds: default_timeout(),
            max_cached_clients: default_max_cached_clients(),
        }
    }
}

impl EngineConfig {
    /// Create a config pointing at `url` with default settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Parsed base URL
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.url)?)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Basic auth credentials, when a user name is configured
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        self.username
            .as_deref()
            .map(|user| (user, self.password.as_deref()))
    }

    fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DocSearchError::configuration(
                "Engine URL must use http or https scheme",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(DocSearchError::configuration(
                "Engine timeout must be greater than zero",
            ));
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(DocSearchError::configuration(
                "Engine password is set without a username",
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format (json, pretty, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl DocSearchConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // Try YAML first, then JSON
        match serde_yaml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(_) => {
                let config = serde_json::from_str(&content)?;
                Ok(config)
            }
        }
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load defaults, then an optional file, then `DOCSEARCH__*` variables
    ///
    /// `DOCSEARCH__ENGINE__URL` overrides `engine.url`, and so on.
    pub fn load_layered<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path.as_ref())
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve a profile by name, configured profiles first
    pub fn profile(&self, name: &str) -> Result<SearchProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .or_else(|| SearchProfile::builtin(name))
            .ok_or_else(|| DocSearchError::not_found(format!("search profile '{}'", name)))
    }

    /// Profile named by `name`, or the default profile
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<SearchProfile> {
        self.profile(name.unwrap_or(&self.default_profile))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;

        if !matches!(
            self.logging.format.as_str(),
            "json" | "pretty" | "text" | "compact"
        ) {
            return Err(DocSearchError::configuration(format!(
                "Unknown log format: {}",
                self.logging.format
            )));
        }

        // Check for duplicate profile names
        let mut names = HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !names.insert(profile.name.as_str()) {
                return Err(DocSearchError::configuration(format!(
                    "Duplicate profile name: {}",
                    profile.name
                )));
            }
        }

        self.resolve_profile(None).map_err(|_| {
            DocSearchError::configuration(format!(
                "Default profile '{}' is not defined",
                self.default_profile
            ))
        })?;

        Ok(())
    }
}

// Default value functions
fn default_engine_url() -> String {
    "http://localhost:9200".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_max_cached_clients() -> u64 {
    64
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
fn default_profile_name() -> String {
    crate::search::ARTICLE_PROFILE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = DocSearchConfig::default();
        assert_eq!(config.engine.url, "http://localhost:9200");
        assert_eq!(config.engine.timeout_seconds, 30);
        assert_eq!(config.engine.max_cached_clients, 64);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.default_profile, "article");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = DocSearchConfig::default();
        config.engine.url = "ftp://localhost".to_string();
        assert!(config.validate().is_err());

        let mut config = DocSearchConfig::default();
        config.engine.url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = DocSearchConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = DocSearchConfig::default();
        config.profiles.push(SearchProfile::new("news"));
        config.profiles.push(SearchProfile::new("news"));
        assert!(config.validate().is_err());

        let mut config = DocSearchConfig::default();
        config.default_profile = "missing".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_profile_resolution() {
        let mut config = DocSearchConfig::default();
        let mut custom = SearchProfile::article();
        custom.include_fields = vec!["title".to_string()];
        config.profiles.push(custom);

        let article = config.profile("article").unwrap();
        assert_eq!(article.include_fields, vec!["title"]);
        assert_eq!(config.profile("car_master").unwrap().sort_fields.len(), 3);
        assert!(matches!(
            config.profile("boats"),
            Err(DocSearchError::NotFound { .. })
        ));
        assert_eq!(config.resolve_profile(None).unwrap().name, "article");
    }

    #[test]
    fn test_file_io() {
        let mut config = DocSearchConfig::default();
        config.profiles.push(SearchProfile::car_master());
        let temp_file = NamedTempFile::new().unwrap();

        config.to_file(temp_file.path()).unwrap();

        let loaded = DocSearchConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_json_file_and_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"engine": {{"url": "https://search.internal:9200", "username": "elastic"}}}}"#
        )
        .unwrap();

        let config = DocSearchConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.engine.url, "https://search.internal:9200");
        assert_eq!(config.engine.credentials(), Some(("elastic", None)));
        assert_eq!(config.engine.timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_layered_file_and_env() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "engine:\n  url: https://search.example.com\nlogging:\n  level: debug").unwrap();

        std::env::set_var("DOCSEARCH__ENGINE__TIMEOUT_SECONDS", "5");
        let config = DocSearchConfig::load_layered(Some(temp_file.path()));
        std::env::remove_var("DOCSEARCH__ENGINE__TIMEOUT_SECONDS");

        let config = config.unwrap();
        assert_eq!(config.engine.url, "https://search.example.com");
        assert_eq!(config.engine.timeout_seconds, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.engine.max_cached_clients, 64);
    }
}
