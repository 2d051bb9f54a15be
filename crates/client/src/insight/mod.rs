//! Insight enrichment through an external text-analysis service.
//!
//! ### Contract
//!
//! - Input is the page summary, truncated to 3000 characters and wrapped in a
//!   fixed analysis prompt.
//! - One attempt per request, no retry.
//! - Any failure (network, quota, malformed response, missing key) yields
//!   the "AI analysis unavailable" sentinel. Enrichment never fails a scrape.
//!
//! ### Gemini
//!
//! - **Endpoint**: `{base_url}/v1beta/models/{model}:generateContent`
//! - **Authentication**: `x-goog-api-key` header.

pub mod error;
pub mod request;
pub mod response;

pub use error::InsightError;
pub use request::{GenerateContentRequest, MAX_INPUT_CHARS, build_prompt};
pub use response::GenerateContentResponse;

use async_trait::async_trait;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pagelens_core::{AppConfig, Error};
use pagelens_core::model::INSIGHT_UNAVAILABLE;

/// Default Gemini API root.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Black-box text-in, text-out analysis service.
#[async_trait]
pub trait InsightService: Send + Sync {
    async fn analyze(&self, prompt: &str) -> Result<String, InsightError>;
}

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// API root (default: https://generativelanguage.googleapis.com).
    pub base_url: String,
    pub model: String,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: "pagelens/0.1".to_string(),
        }
    }
}

impl GeminiConfig {
    /// Build from application config. Fails when no API key is configured.
    pub fn from_app(config: &AppConfig) -> Result<Self, InsightError> {
        let api_key = config.require_gemini_api_key().map_err(|_| InsightError::MissingApiKey)?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            timeout: config.insight_timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Gemini generateContent client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, InsightError> {
        if config.api_key.is_empty() {
            return Err(InsightError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| InsightError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.config.base_url, self.config.model)
    }
}

#[async_trait]
impl InsightService for GeminiClient {
    async fn analyze(&self, prompt: &str) -> Result<String, InsightError> {
        let start = Instant::now();

        let http_response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .header(header::USER_AGENT, &self.config.user_agent)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("insight service response status: {}", status);

        if status == 401 || status == 403 {
            return Err(InsightError::AuthError);
        }

        if status == 429 {
            return Err(InsightError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(InsightError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let api_response: GenerateContentResponse =
            serde_json::from_slice(&bytes).map_err(|e| InsightError::Parse(e.to_string()))?;

        if let Some(reason) = api_response.block_reason() {
            tracing::debug!("insight prompt blocked: {reason}");
        }

        let text = api_response.text().ok_or(InsightError::EmptyResponse)?;

        tracing::debug!("insight generated in {:?} ({} chars)", start.elapsed(), text.len());

        Ok(text)
    }
}

/// Turns page text into an insight string, never failing.
#[derive(Clone, Default)]
pub struct Enricher {
    service: Option<Arc<dyn InsightService>>,
}

impl Enricher {
    pub fn new(service: Arc<dyn InsightService>) -> Self {
        Self { service: Some(service) }
    }

    /// An enricher that always answers with the sentinel.
    pub fn disabled() -> Self {
        Self { service: None }
    }

    /// Use Gemini when a key is configured, otherwise disable enrichment.
    pub fn from_config(config: &AppConfig) -> Self {
        match GeminiConfig::from_app(config).and_then(GeminiClient::new) {
            Ok(client) => Self::new(Arc::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "insight enrichment disabled");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.service.is_some()
    }

    /// Analyze `text`, returning the sentinel on any failure.
    pub async fn enrich(&self, text: &str) -> String {
        let Some(service) = &self.service else {
            return INSIGHT_UNAVAILABLE.to_string();
        };

        match service.analyze(&build_prompt(text)).await {
            Ok(insight) => insight,
            Err(e) => {
                let err = Error::from(e);
                tracing::warn!(error = %err, "insight analysis failed, using sentinel");
                INSIGHT_UNAVAILABLE.to_string()
            }
        }
    }
}
