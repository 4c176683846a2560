//! Validate command implementation

use crate::commands::CliCommand;
use crate::config::{CliContext, OutputFormat};
use clap::Args;
use docsearch_core::{DocSearchConfig, DocSearchError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Validate a docsearch configuration file
#[derive(Debug, Clone, Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG")]
    pub file: PathBuf,
}

/// Outcome of validating one configuration file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateCommand {
    /// Load and check the file; the report also describes failures
    pub fn check(path: &Path) -> (ValidationReport, Result<()>) {
        let mut report = ValidationReport {
            valid: false,
            path: path.display().to_string(),
            engine_url: None,
            default_profile: None,
            profiles: Vec::new(),
            error: None,
        };

        let outcome = Self::load(path).map(|config| {
            report.engine_url = Some(config.engine.url.clone());
            report.default_profile = Some(config.default_profile.clone());
            report.profiles = config.profiles.iter().map(|p| p.name.clone()).collect();
        });

        match &outcome {
            Ok(()) => report.valid = true,
            Err(e) => report.error = Some(e.to_string()),
        }
        (report, outcome)
    }

    fn load(path: &Path) -> Result<DocSearchConfig> {
        if !path.exists() {
            return Err(DocSearchError::not_found(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let config = DocSearchConfig::from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}

impl CliCommand for ValidateCommand {
    async fn execute(&self, context: &CliContext) -> Result<()> {
        tracing::info!("Validating configuration at {}", self.file.display());

        let (report, outcome) = Self::check(&self.file);
        let mut formatter = context.formatter();

        match context.output() {
            OutputFormat::Pretty => match &outcome {
                Ok(()) => {
                    formatter.success("Configuration is valid")?;
                    if let Some(url) = &report.engine_url {
                        formatter.message(&format!("  engine: {}", url))?;
                    }
                    if let Some(profile) = &report.default_profile {
                        formatter.message(&format!("  default profile: {}", profile))?;
                    }
                    if !report.profiles.is_empty() {
                        formatter.message(&format!(
                            "  configured profiles: {}",
                            report.profiles.join(", ")
                        ))?;
                    }
                }
                Err(e) => formatter.error(&format!("Configuration is invalid: {}", e))?,
            },
            _ => formatter.output(&report)?,
        }

        outcome
    }

    fn name(&self) -> &'static str {
        "validate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, yaml: &str) -> PathBuf {
        let path = dir.path().join("docsearch.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
engine:
  url: http://search.internal:9200
default_profile: used_cars
profiles:
  - name: used_cars
    include_fields: [brand, model]
    field_groups:
      - fields: [brand.standard, model.standard]
"#,
        );

        let (report, outcome) = ValidateCommand::check(&path);

        assert!(outcome.is_ok());
        assert!(report.valid);
        assert_eq!(
            report.engine_url.as_deref(),
            Some("http://search.internal:9200")
        );
        assert_eq!(report.profiles, vec!["used_cars".to_string()]);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_unknown_default_profile() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "default_profile: nowhere\n");

        let (report, outcome) = ValidateCommand::check(&path);

        assert!(matches!(outcome, Err(DocSearchError::Configuration { .. })));
        assert!(!report.valid);
        assert!(report.error.unwrap().contains("nowhere"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (report, outcome) = ValidateCommand::check(Path::new("/nonexistent/docsearch.yaml"));

        assert!(matches!(outcome, Err(DocSearchError::NotFound { .. })));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert!(json.get("profiles").is_none());
    }
}
