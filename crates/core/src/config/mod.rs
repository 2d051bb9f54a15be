//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PAGELENS_*)
//! 2. TOML config file (if PAGELENS_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PAGELENS_*)
/// 2. TOML config file (if PAGELENS_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the durable SQLite store.
    ///
    /// Set via PAGELENS_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests and the headless browser.
    ///
    /// Set via PAGELENS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Lightweight fetch timeout in milliseconds.
    ///
    /// Set via PAGELENS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes accepted from a lightweight fetch.
    ///
    /// Set via PAGELENS_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Whether the browser fetch strategy may launch a headless browser.
    ///
    /// Set via PAGELENS_RENDER_ENABLED environment variable.
    #[serde(default = "default_true")]
    pub render_enabled: bool,

    /// Fixed wait after navigation before the rendered markup is captured.
    ///
    /// Set via PAGELENS_RENDER_SETTLE_MS environment variable.
    #[serde(default = "default_render_settle_ms")]
    pub render_settle_ms: u64,

    /// Upper bound on browser navigation.
    ///
    /// Set via PAGELENS_RENDER_TIMEOUT_MS environment variable.
    #[serde(default = "default_render_timeout_ms")]
    pub render_timeout_ms: u64,

    /// URL substrings that route a request to the browser fetcher.
    ///
    /// Set via PAGELENS_BROWSER_MARKERS environment variable (e.g. `["amazon.","cloudflare"]`).
    #[serde(default = "default_browser_markers")]
    pub browser_markers: Vec<String>,

    /// Href substrings that mark a recognized social platform link.
    ///
    /// Set via PAGELENS_SOCIAL_MARKERS environment variable.
    #[serde(default = "default_social_markers")]
    pub social_markers: Vec<String>,

    /// Ephemeral tier time-to-live in seconds.
    ///
    /// Set via PAGELENS_EPHEMERAL_TTL_SECS environment variable.
    #[serde(default = "default_ephemeral_ttl_secs")]
    pub ephemeral_ttl_secs: u64,

    /// Ephemeral tier capacity; the oldest entry is evicted when full.
    ///
    /// Set via PAGELENS_EPHEMERAL_MAX_ENTRIES environment variable.
    #[serde(default = "default_ephemeral_max_entries")]
    pub ephemeral_max_entries: usize,

    /// Consult the durable tier when the ephemeral tier misses.
    ///
    /// Set via PAGELENS_SERVE_FROM_DURABLE environment variable.
    #[serde(default)]
    pub serve_from_durable: bool,

    /// Gemini API key for insight generation.
    ///
    /// Set via PAGELENS_GEMINI_API_KEY environment variable.
    /// When absent every insight is the unavailable sentinel.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name.
    ///
    /// Set via PAGELENS_GEMINI_MODEL environment variable.
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Gemini API root.
    ///
    /// Set via PAGELENS_GEMINI_BASE_URL environment variable.
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Insight request timeout in milliseconds.
    ///
    /// Set via PAGELENS_INSIGHT_TIMEOUT_MS environment variable.
    #[serde(default = "default_insight_timeout_ms")]
    pub insight_timeout_ms: u64,

    /// Worker bound for bulk scrapes.
    ///
    /// Set via PAGELENS_MAX_CONCURRENCY environment variable.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Default CSV export target.
    ///
    /// Set via PAGELENS_EXPORT_PATH environment variable.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./pagelens-cache.sqlite")
}

fn default_user_agent() -> String {
    "pagelens/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_true() -> bool {
    true
}

fn default_render_settle_ms() -> u64 {
    5_000
}

fn default_render_timeout_ms() -> u64 {
    30_000
}

fn default_browser_markers() -> Vec<String> {
    vec!["amazon.".into(), "cloudflare".into()]
}

fn default_social_markers() -> Vec<String> {
    vec!["linkedin.com".into(), "twitter.com".into()]
}

fn default_ephemeral_ttl_secs() -> u64 {
    86_400
}

fn default_ephemeral_max_entries() -> usize {
    10_000
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".into()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}

fn default_insight_timeout_ms() -> u64 {
    30_000
}

fn default_max_concurrency() -> usize {
    4
}

fn default_export_path() -> PathBuf {
    PathBuf::from("./scraped_data.csv")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            render_enabled: true,
            render_settle_ms: default_render_settle_ms(),
            render_timeout_ms: default_render_timeout_ms(),
            browser_markers: default_browser_markers(),
            social_markers: default_social_markers(),
            ephemeral_ttl_secs: default_ephemeral_ttl_secs(),
            ephemeral_max_entries: default_ephemeral_max_entries(),
            serve_from_durable: false,
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_base_url: default_gemini_base_url(),
            insight_timeout_ms: default_insight_timeout_ms(),
            max_concurrency: default_max_concurrency(),
            export_path: default_export_path(),
        }
    }
}

impl AppConfig {
    /// Lightweight fetch timeout as Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn render_settle(&self) -> Duration {
        Duration::from_millis(self.render_settle_ms)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }

    pub fn ephemeral_ttl(&self) -> Duration {
        Duration::from_secs(self.ephemeral_ttl_secs)
    }

    pub fn insight_timeout(&self) -> Duration {
        Duration::from_millis(self.insight_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `PAGELENS_`
    /// 2. TOML file from `PAGELENS_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PAGELENS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PAGELENS_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if a Gemini API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_gemini_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "gemini_api_key".into(),
                hint: "Set PAGELENS_GEMINI_API_KEY environment variable".into(),
            })
    }
}
