//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `render_settle_ms` is not below `render_timeout_ms`
    /// - the ephemeral TTL or capacity is 0
    /// - `max_concurrency` is outside 1..=32
    /// - `user_agent` is empty or a marker list holds a blank entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(invalid("max_bytes", "must not exceed 50MB"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.render_settle_ms >= self.render_timeout_ms {
            return Err(invalid("render_settle_ms", "must be below render_timeout_ms"));
        }

        if self.ephemeral_ttl_secs == 0 {
            return Err(invalid("ephemeral_ttl_secs", "must be greater than 0"));
        }
        if self.ephemeral_max_entries == 0 {
            return Err(invalid("ephemeral_max_entries", "must be greater than 0"));
        }

        if !(1..=32).contains(&self.max_concurrency) {
            return Err(invalid("max_concurrency", "must be between 1 and 32"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.browser_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(invalid("browser_markers", "entries must not be blank"));
        }
        if self.social_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(invalid("social_markers", "entries must not be blank"));
        }

        if self.browser_markers.is_empty() {
            tracing::warn!("browser_markers is empty; every request will use the lightweight fetcher");
        }

        if !self.browser_markers.is_empty() && !self.render_enabled {
            tracing::warn!(
                marker_count = self.browser_markers.len(),
                "render_enabled is false; requests matching browser_markers will fail with RENDER_DISABLED"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_bytes_zero() {
        let config = AppConfig { max_bytes: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_bytes"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { timeout_ms: 301_000, ..Default::default() }; // 5min 1sec
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_settle_not_below_render_timeout() {
        let config = AppConfig { render_settle_ms: 30_000, render_timeout_ms: 30_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "render_settle_ms"));
    }

    #[test]
    fn test_validate_zero_ttl() {
        let config = AppConfig { ephemeral_ttl_secs: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "ephemeral_ttl_secs"));
    }

    #[test]
    fn test_validate_concurrency_bounds() {
        let config = AppConfig { max_concurrency: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "max_concurrency"));

        let config = AppConfig { max_concurrency: 33, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "max_concurrency"));
    }

    #[test]
    fn test_validate_blank_marker() {
        let config = AppConfig { browser_markers: vec!["amazon.".into(), "  ".into()], ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "browser_markers"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { max_bytes: 1, timeout_ms: 100, max_concurrency: 1, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
