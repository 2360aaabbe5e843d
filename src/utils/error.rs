use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivationError {
    #[error("Transport failed: {0}")]
    TransportFailed(#[source] reqwest::Error),

    #[error("Request failed with status {status}: {status_text}")]
    RequestFailed { status: u16, status_text: String },

    #[error("Failed to decode query results: {message}")]
    DecodeFailed { message: String },

    #[error("Missing required field '{field}' in row {row}")]
    MissingFieldError { field: String, row: usize },

    #[error("Fetch cancelled before completion")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ActivationError {
    /// Classifies a reqwest failure: status and decode errors get their own
    /// variants, everything else is a transport problem.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::DecodeFailed {
                message: err.to_string(),
            };
        }
        if let Some(status) = err.status() {
            return Self::RequestFailed {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            };
        }
        Self::TransportFailed(err)
    }

    pub fn missing_field(field: &str, row: usize) -> Self {
        Self::MissingFieldError {
            field: field.to_string(),
            row,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TransportFailed(_) | Self::RequestFailed { .. } => ErrorCategory::Network,
            Self::DecodeFailed { .. }
            | Self::MissingFieldError { .. }
            | Self::SerializationError(_)
            | Self::CsvError(_) => ErrorCategory::Data,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
            Self::Cancelled => ErrorCategory::Interrupted,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Interrupted => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::TransportFailed(_) => "Could not reach the SPARQL endpoint".to_string(),
            Self::RequestFailed { status, status_text } => {
                format!("The SPARQL endpoint answered {} {}", status, status_text)
            }
            Self::DecodeFailed { .. } => {
                "The SPARQL endpoint returned an unreadable result".to_string()
            }
            Self::MissingFieldError { field, row } => {
                format!("Activation #{} has no value for '{}'", row + 1, field)
            }
            Self::Cancelled => "Fetch cancelled".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::TransportFailed(_) => "Check that the triple store is running and the endpoint URL is correct",
            Self::RequestFailed { .. } => "Check the dataset name in the endpoint URL and the store logs",
            Self::DecodeFailed { .. } => {
                "Make sure the endpoint supports application/sparql-results+json"
            }
            Self::MissingFieldError { .. } => {
                "The dataset does not match the activation schema; reload the data"
            }
            Self::Cancelled => "Run the command again",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
            Self::IoError(_) => "Check the output path and file permissions",
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Try a different output format"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ActivationError>;
