use crate::domain::model::RawResultSet;
use crate::domain::ports::{ConfigProvider, QueryTransport};
use crate::utils::error::{ActivationError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Single-attempt SPARQL client: no retries, no fallback data.
pub struct SparqlClient {
    endpoint: String,
    client: Client,
}

impl SparqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(ActivationError::TransportFailed)?;

        Ok(Self {
            endpoint: config.endpoint().to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Appends the percent-encoded `query` parameter, keeping any existing pairs.
    pub fn query_url(&self, query: &str) -> Result<Url> {
        let mut url =
            Url::parse(&self.endpoint).map_err(|e| ActivationError::InvalidConfigValueError {
                field: "endpoint".to_string(),
                value: self.endpoint.clone(),
                reason: format!("Invalid URL format: {}", e),
            })?;
        url.query_pairs_mut().append_pair("query", query);
        Ok(url)
    }
}

#[async_trait]
impl QueryTransport for SparqlClient {
    async fn fetch_results(&self, query: &str) -> Result<RawResultSet> {
        let url = self.query_url(query)?;

        tracing::debug!("Sending SPARQL query to: {}", self.endpoint);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .send()
            .await
            .map_err(ActivationError::from_reqwest)?;

        let status = response.status();
        tracing::debug!("SPARQL response status: {}", status);

        if !status.is_success() {
            return Err(ActivationError::RequestFailed {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(ActivationError::from_reqwest)?;
        let result_set: RawResultSet =
            serde_json::from_slice(&body).map_err(|e| ActivationError::DecodeFailed {
                message: e.to_string(),
            })?;

        tracing::debug!(
            "Decoded {} bindings ({} bytes)",
            result_set.bindings().len(),
            body.len()
        );
        Ok(result_set)
    }
}
