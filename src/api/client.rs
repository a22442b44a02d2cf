//! Green score client for the scoring backend.
//!
//! One request per call: `GET <base>/green-score?zip=<zip>`. The whole
//! exchange (connect, headers, body) is bounded by the caller's timeout.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::GreenScoreResult;

/// Default deadline for a score request.
pub const DEFAULT_SCORE_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Errors that can occur while fetching a green score.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// No backend base URL was configured. Every call fails.
    Config(String),
    /// No response arrived within the deadline.
    Timeout,
    /// The backend answered with a non-2xx status.
    Http { status: u16 },
    /// Transport-level failure (DNS, connection refused, reset).
    Network(String),
    /// The body was not a green score result.
    Decode(String),
    /// The backend has no data for this ZIP (`{ "error": ... }` body).
    NoData(String),
}

impl ScoreError {
    /// Message shown to the user. Transport, status and decode failures
    /// all read the same; the log keeps the detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScoreError::Timeout => "Request timed out. Please try again.",
            ScoreError::NoData(_) => "No data found for this zipcode.",
            ScoreError::Config(_)
            | ScoreError::Http { .. }
            | ScoreError::Network(_)
            | ScoreError::Decode(_) => "Failed to load the eco-score. Please try again.",
        }
    }
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Config(msg) => write!(f, "config error: {msg}"),
            ScoreError::Timeout => write!(f, "request timed out"),
            ScoreError::Http { status } => write!(f, "API responded with status {status}"),
            ScoreError::Network(msg) => write!(f, "network error: {msg}"),
            ScoreError::Decode(msg) => write!(f, "decode error: {msg}"),
            ScoreError::NoData(msg) => write!(f, "no data for zip: {msg}"),
        }
    }
}

impl std::error::Error for ScoreError {}

#[async_trait]
pub trait ScoreClient: Send + Sync {
    /// Fetch the green score for a well-formed ZIP code.
    async fn fetch_score(&self, zip: &str, timeout: Duration)
        -> Result<GreenScoreResult, ScoreError>;

    /// False when the client has nowhere to send requests.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Decodes a 2xx response body.
///
/// A top-level string `error` field means the backend knows the ZIP has no data.
pub fn decode_score_body(body: &str) -> Result<GreenScoreResult, ScoreError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ScoreError::Decode(e.to_string()))?;

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(ScoreError::NoData(message.to_string()));
    }

    serde_json::from_value(value).map_err(|e| ScoreError::Decode(e.to_string()))
}

/// HTTP implementation backed by `reqwest`.
pub struct GreenScoreClient {
    base_url: Option<String>,
    client: reqwest::Client,
}

impl GreenScoreClient {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.map(|url| url.trim_end_matches('/').to_string());
        if base_url.is_none() {
            warn!("Green score client created without a backend base URL");
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn request(&self, base_url: &str, zip: &str) -> Result<GreenScoreResult, ScoreError> {
        let response = self
            .client
            .get(format!("{base_url}/green-score"))
            .query(&[("zip", zip)])
            .send()
            .await
            .map_err(map_transport_error)?;

        debug!("Green score response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Green score API error for {zip}: HTTP {status}");
            return Err(ScoreError::Http { status });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        decode_score_body(&body)
    }
}

fn map_transport_error(e: reqwest::Error) -> ScoreError {
    if e.is_timeout() {
        ScoreError::Timeout
    } else if e.is_decode() {
        ScoreError::Decode(e.to_string())
    } else {
        ScoreError::Network(e.to_string())
    }
}

#[async_trait]
impl ScoreClient for GreenScoreClient {
    fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    async fn fetch_score(
        &self,
        zip: &str,
        timeout: Duration,
    ) -> Result<GreenScoreResult, ScoreError> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Err(ScoreError::Config(
                "backend base URL is not set (ECOSCORE_BASE_URL, config file, or --base-url)"
                    .to_string(),
            ));
        };

        info!("Requesting green score: zip={zip}, timeout={}ms", timeout.as_millis());

        match tokio::time::timeout(timeout, self.request(base_url, zip)).await {
            Ok(result) => {
                if let Err(e) = &result {
                    warn!("Green score request for {zip} failed: {e}");
                }
                result
            }
            Err(_) => {
                warn!("Green score request for {zip} timed out after {}ms", timeout.as_millis());
                Err(ScoreError::Timeout)
            }
        }
    }
}
