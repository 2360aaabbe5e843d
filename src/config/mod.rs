#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

use crate::app::render::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3030/samur-activations-complete/sparql";

/// Effective settings after merging the config file and command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub format: OutputFormat,
    pub output_path: Option<String>,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
            format: OutputFormat::default(),
            output_path: None,
            json_logs: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for AppConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;

        if let Some(seconds) = self.timeout_seconds {
            validate_range("timeout_seconds", seconds, 1, 3600)?;
        }

        if let Some(path) = &self.output_path {
            validate_path("output_path", path)?;
        }

        Ok(())
    }
}
