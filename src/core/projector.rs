use crate::domain::model::{ActivationRecord, RawBinding};
use crate::utils::error::{ActivationError, Result};

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Prefix of an `xsd:gMonth` literal such as `--03`.
const MONTH_PREFIX: &str = "--";

/// Maps result rows to records in input order. The first row missing a
/// required variable fails the whole call.
pub fn project(rows: &[RawBinding]) -> Result<Vec<ActivationRecord>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| project_row(index, row))
        .collect()
}

pub fn project_row(index: usize, row: &RawBinding) -> Result<ActivationRecord> {
    let required = |variable: &str| {
        row.value(variable)
            .map(str::to_string)
            .ok_or_else(|| ActivationError::missing_field(variable, index))
    };
    let optional = |variable: &str| row.value(variable).map(str::to_string);

    let id = row
        .value("label")
        .or_else(|| row.value("activation"))
        .map(str::to_string)
        .ok_or_else(|| ActivationError::missing_field("id", index))?;

    Ok(ActivationRecord {
        id,
        year: required("year")?,
        month: strip_month_prefix(&required("month")?).to_string(),
        request_time: required("requestTime")?,
        intervention_time: required("interventionTime")?,
        emergency_type: required("emergencyType")?,
        district_label: optional("districtLabel").unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        hospital_label: optional("hospitalLabel").unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        district_wikidata_link: optional("districtWikidataLink"),
        hospital_wikidata_link: optional("hospitalWikidataLink"),
    })
}

pub fn strip_month_prefix(month: &str) -> &str {
    month.strip_prefix(MONTH_PREFIX).unwrap_or(month)
}
