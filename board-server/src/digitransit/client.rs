//! Digitransit routing API HTTP client.
//!
//! Sends the stop-times GraphQL query and parses the response. One request
//! per call; nothing is cached or retried.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::{debug, warn};

use super::error::DigitransitError;
use super::query::QueryTemplate;
use super::types::StopsResponse;

/// Default GraphQL endpoint (HSL region).
pub const DEFAULT_BASE_URL: &str = "https://api.digitransit.fi/routing/v1/routers/hsl/index/graphql";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Digitransit client.
#[derive(Debug, Clone)]
pub struct DigitransitConfig {
    /// GraphQL endpoint URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DigitransitConfig {
    /// Create a config pointing at the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for DigitransitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Request body.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
}

/// Digitransit API client.
#[derive(Debug, Clone)]
pub struct DigitransitClient {
    http: reqwest::Client,
    base_url: String,
}

impl DigitransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DigitransitConfig) -> Result<Self, DigitransitError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/graphql"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch departures starting `offset_secs` after `now_epoch_secs`.
    ///
    /// The start time placeholder in `template` is replaced with
    /// `now_epoch_secs + offset_secs`. Any status other than 200 is an error.
    pub async fn fetch_departures(
        &self,
        template: &QueryTemplate,
        now_epoch_secs: i64,
        offset_secs: i64,
    ) -> Result<StopsResponse, DigitransitError> {
        let start_time = now_epoch_secs.saturating_add(offset_secs);
        let query = template.render(start_time);
        let body = serde_json::to_string(&GraphQlRequest { query: &query }).map_err(|e| {
            DigitransitError::Json {
                message: e.to_string(),
                body: None,
            }
        })?;

        debug!(url = %self.base_url, start_time, "requesting departures");

        let response = self.http.post(&self.base_url).body(body).send().await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "departure request rejected");
            return Err(DigitransitError::Status {
                status: status.as_u16(),
                message: message.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        let parsed: StopsResponse =
            serde_json::from_str(&body).map_err(|e| DigitransitError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        debug!(
            stops = parsed.data.stops.len(),
            departures = parsed.stop_time_count(),
            "received departures"
        );

        Ok(parsed)
    }
}
