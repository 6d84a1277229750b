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

fn check_timeout(field: &str, value: u64) -> Result<(), ConfigError> {
    if value < 100 {
        return Err(ConfigError::Invalid { field: field.into(), reason: "must be at least 100ms".into() });
    }
    if value > 300_000 {
        return Err(ConfigError::Invalid {
            field: field.into(),
            reason: "must not exceed 5 minutes (300000ms)".into(),
        });
    }
    Ok(())
}

fn check_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigError::Invalid { field: field.into(), reason: e.to_string() })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::Invalid { field: field.into(), reason: format!("unsupported scheme: {scheme}") }),
    }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` or `status_timeout_ms` is below 100ms or above 5 minutes
    /// - `cache_ttl_ms` is 0
    /// - `bind_addr` is not a socket address
    /// - `contentful_base_url` or `site_url` is not an absolute http(s) URL
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_timeout("timeout_ms", self.timeout_ms)?;
        check_timeout("status_timeout_ms", self.status_timeout_ms)?;

        if self.cache_ttl_ms == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_ms".into(), reason: "must be greater than 0".into() });
        }

        self.socket_addr()?;
        check_http_url("contentful_base_url", &self.contentful_base_url)?;
        check_http_url("site_url", &self.site_url)?;

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.status_timeout_ms > self.timeout_ms {
            tracing::warn!(
                status_timeout_ms = self.status_timeout_ms,
                timeout_ms = self.timeout_ms,
                "status_timeout_ms exceeds timeout_ms; \
                 the request timeout will fire first"
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
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_status_timeout_exceeds_limit() {
        let config = AppConfig { status_timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "status_timeout_ms"));
    }

    #[test]
    fn test_validate_zero_cache_ttl() {
        let config = AppConfig { cache_ttl_ms: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_ttl_ms"));
    }

    #[test]
    fn test_validate_bad_bind_addr() {
        let config = AppConfig { bind_addr: "localhost".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "bind_addr"));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let config = AppConfig { contentful_base_url: "ftp://cdn.contentful.com".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "contentful_base_url"));
    }

    #[test]
    fn test_validate_relative_site_url() {
        let config = AppConfig { site_url: "/gallery".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "site_url"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { timeout_ms: 100, status_timeout_ms: 100, cache_ttl_ms: 1, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
