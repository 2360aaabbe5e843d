use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One bound term in a SPARQL JSON result row. Only `value` is consumed;
/// the other attributes are kept so debug output shows what the store sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTerm {
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl RawTerm {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: Some("literal".to_string()),
            datatype: None,
            lang: None,
        }
    }

    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: Some("uri".to_string()),
            datatype: None,
            lang: None,
        }
    }
}

/// A result row. Variables left unbound by an OPTIONAL pattern are missing keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawBinding {
    pub terms: HashMap<String, RawTerm>,
}

impl RawBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variable: &str, term: RawTerm) -> Self {
        self.terms.insert(variable.to_string(), term);
        self
    }

    pub fn value(&self, variable: &str) -> Option<&str> {
        self.terms.get(variable).map(|term| term.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRows {
    pub bindings: Vec<RawBinding>,
}

/// The `application/sparql-results+json` body of a SELECT query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResultSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<ResultHead>,
    pub results: ResultRows,
}

impl RawResultSet {
    pub fn from_bindings(bindings: Vec<RawBinding>) -> Self {
        Self {
            head: None,
            results: ResultRows { bindings },
        }
    }

    pub fn bindings(&self) -> &[RawBinding] {
        &self.results.bindings
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRecord {
    pub id: String,
    pub year: String,
    pub month: String,
    pub request_time: String,
    pub intervention_time: String,
    pub emergency_type: String,
    pub district_label: String,
    pub hospital_label: String,
    pub district_wikidata_link: Option<String>,
    pub hospital_wikidata_link: Option<String>,
}

impl ActivationRecord {
    pub fn district(&self) -> LabeledLink<'_> {
        LabeledLink {
            label: &self.district_label,
            link: self.district_wikidata_link.as_deref(),
        }
    }

    pub fn hospital(&self) -> LabeledLink<'_> {
        LabeledLink {
            label: &self.hospital_label,
            link: self.hospital_wikidata_link.as_deref(),
        }
    }
}

/// A label that is shown as a hyperlink only when a link target exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledLink<'a> {
    pub label: &'a str,
    pub link: Option<&'a str>,
}

impl LabeledLink<'_> {
    pub fn is_link(&self) -> bool {
        self.link.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    LoadedEmpty,
    Loaded(usize),
}

impl LoadState {
    pub fn of(records: Option<&[ActivationRecord]>) -> Self {
        match records {
            None => Self::NotLoaded,
            Some([]) => Self::LoadedEmpty,
            Some(records) => Self::Loaded(records.len()),
        }
    }
}
