use crate::app::render::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "activations")]
#[command(about = "List the latest SAMUR ambulance activations from a SPARQL endpoint")]
pub struct CliConfig {
    /// SPARQL query endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format: cards, json or csv
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Abort the request after this many seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Print the SPARQL query and exit
    #[arg(long)]
    pub print_query: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the config file, then flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            config = TomlConfig::from_file(path)?.apply_to(config);
        }

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if self.timeout_seconds.is_some() {
            config.timeout_seconds = self.timeout_seconds;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.output.is_some() {
            config.output_path = self.output.clone();
        }
        config.json_logs |= self.json_logs;
        config.verbose |= self.verbose;

        Ok(config)
    }
}
