use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::EnrichmentError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/gpa-description";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct MotivationConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub enabled: bool,
}

impl MotivationConfig {
    pub fn new(endpoint: &str) -> Self {
        MotivationConfig {
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            enabled: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MotivationRequest {
    pub gpa: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MotivationResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Anything that can turn a score into a one-line motivational message.
#[async_trait]
pub trait MotivationSource: Send + Sync {
    async fn describe(&self, score: f64) -> Result<String, EnrichmentError>;
}

pub struct MotivationClient {
    config: MotivationConfig,
    http: reqwest::Client,
}

impl MotivationClient {
    pub fn new(config: MotivationConfig) -> Result<Self, EnrichmentError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gpa-calculator/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(MotivationClient { config, http })
    }

    pub fn config(&self) -> &MotivationConfig {
        &self.config
    }

    /// GET on the endpoint; the service answers for a perfect score.
    pub async fn probe(&self) -> Result<String, EnrichmentError> {
        if !self.config.enabled {
            return Err(EnrichmentError::Disabled);
        }
        debug!(endpoint = %self.config.endpoint, "probing motivation endpoint");
        let response = self.http.get(&self.config.endpoint).send().await?;
        read_message(response).await
    }
}

#[async_trait]
impl MotivationSource for MotivationClient {
    async fn describe(&self, score: f64) -> Result<String, EnrichmentError> {
        if !self.config.enabled {
            return Err(EnrichmentError::Disabled);
        }
        debug!(endpoint = %self.config.endpoint, score, "requesting motivation");
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&MotivationRequest { gpa: score })
            .send()
            .await?;
        read_message(response).await
    }
}

async fn read_message(response: reqwest::Response) -> Result<String, EnrichmentError> {
    let status = response.status();
    if !status.is_success() {
        return Err(EnrichmentError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    let parsed: MotivationResponse =
        serde_json::from_str(&body).map_err(|err| EnrichmentError::Malformed(err.to_string()))?;

    parsed
        .message
        .as_deref()
        .and_then(normalize_message)
        .ok_or(EnrichmentError::EmptyMessage)
}

pub fn normalize_message(raw: &str) -> Option<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '*' | '_' | '`' | '#'))
        .collect();
    let line = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

pub async fn fetch_motivation(source: &dyn MotivationSource, score: f64) -> Option<String> {
    match source.describe(score).await {
        Ok(message) => Some(message),
        Err(EnrichmentError::Disabled) => None,
        Err(err) => {
            warn!(error = %err, score, "motivation unavailable");
            None
        }
    }
}
