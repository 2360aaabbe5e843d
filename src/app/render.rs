use crate::domain::model::{ActivationRecord, LabeledLink, LoadState};
use crate::utils::error::{ActivationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

pub const HEADING: &str = "Latest Samur Activations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Cards,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Cards => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ActivationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cards" => Ok(Self::Cards),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ActivationError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: cards, json, csv".to_string(),
            }),
        }
    }
}

const LABEL_WIDTH: usize = 18;

fn push_row(out: &mut String, label: &str, data: &str) {
    let _ = writeln!(out, "  {:<width$}{}", label, data, width = LABEL_WIDTH);
}

// A link is only emitted when a target exists, so an unresolved district never
// prints an empty `<>`.
fn push_link_row(out: &mut String, label: &str, value: LabeledLink<'_>) {
    match value.link {
        Some(link) => push_row(out, label, &format!("{} <{}>", value.label, link)),
        None => push_row(out, label, value.label),
    }
}

pub fn render_card(record: &ActivationRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.id);
    push_row(&mut out, "Year", &record.year);
    push_row(&mut out, "Month", &record.month);
    push_row(&mut out, "Request Time", &record.request_time);
    push_row(&mut out, "Intervention Time", &record.intervention_time);
    push_row(&mut out, "Emergency Type", &record.emergency_type);
    push_link_row(&mut out, "District", record.district());
    push_link_row(&mut out, "Hospital", record.hospital());
    out
}

pub fn render_cards(records: &[ActivationRecord]) -> String {
    records
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_state(state: LoadState, records: &[ActivationRecord]) -> String {
    let body = match state {
        LoadState::NotLoaded => "Loading...\n".to_string(),
        LoadState::LoadedEmpty => "No activations found.\n".to_string(),
        LoadState::Loaded(_) => render_cards(records),
    };
    format!("{}\n\n{}", HEADING, body)
}

pub fn to_json(records: &[ActivationRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn to_csv(records: &[ActivationRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| ActivationError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| ActivationError::DecodeFailed {
        message: e.to_string(),
    })
}

pub fn render(format: OutputFormat, state: LoadState, records: &[ActivationRecord]) -> Result<String> {
    match format {
        OutputFormat::Cards => Ok(render_state(state, records)),
        OutputFormat::Json => to_json(records),
        OutputFormat::Csv => to_csv(records),
    }
}
