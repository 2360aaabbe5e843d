use crate::app::render::OutputFormat;
use crate::config::AppConfig;
use crate::utils::error::{ActivationError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// On-disk configuration. Every key is optional; missing keys keep defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| ActivationError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let name = &caps[1];
                std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
            })
            .into_owned()
    }

    pub fn apply_to(&self, mut config: AppConfig) -> AppConfig {
        if let Some(endpoint) = &self.source.endpoint {
            config.endpoint = endpoint.clone();
        }
        if self.source.timeout_seconds.is_some() {
            config.timeout_seconds = self.source.timeout_seconds;
        }
        if let Some(format) = self.output.format {
            config.format = format;
        }
        if self.output.path.is_some() {
            config.output_path = self.output.path.clone();
        }
        if let Some(json) = self.logging.json {
            config.json_logs = json;
        }
        if let Some(verbose) = self.logging.verbose {
            config.verbose = verbose;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
endpoint = "http://triplestore:3030/samur/sparql"
timeout_seconds = 15

[output]
format = "csv"
path = "./activations.csv"

[logging]
json = true
"#;

        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        let config = file.apply_to(AppConfig::default());

        assert_eq!(config.endpoint, "http://triplestore:3030/samur/sparql");
        assert_eq!(config.timeout_seconds, Some(15));
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.output_path.as_deref(), Some("./activations.csv"));
        assert!(config.json_logs);
        assert!(!config.verbose);
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let file = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(file.apply_to(AppConfig::default()), AppConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SAMUR_TEST_SPARQL_HOST", "fuseki.internal");

        let toml_content = r#"
[source]
endpoint = "http://${SAMUR_TEST_SPARQL_HOST}:3030/ds/sparql"
"#;
        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            file.source.endpoint.as_deref(),
            Some("http://fuseki.internal:3030/ds/sparql")
        );

        std::env::remove_var("SAMUR_TEST_SPARQL_HOST");
    }

    #[test]
    fn test_unset_env_var_is_kept_and_fails_validation() {
        let toml_content = r#"
[source]
endpoint = "${SAMUR_TEST_DEFINITELY_UNSET}"
"#;
        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            file.source.endpoint.as_deref(),
            Some("${SAMUR_TEST_DEFINITELY_UNSET}")
        );
        assert!(file.apply_to(AppConfig::default()).validate().is_err());
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = TomlConfig::from_toml_str("[output]\nformat = \"xml\"\n");
        assert!(matches!(result, Err(ActivationError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nendpoint = \"https://example.org/sparql\"\n")
            .unwrap();

        let file = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(file.source.endpoint.as_deref(), Some("https://example.org/sparql"));
    }
}
