//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Bare credential environment variables (CONTENTFUL_SPACE_ID, GMAIL_USER, ...)
//! 2. Environment variables (TECHLENS_*)
//! 3. TOML config file (if TECHLENS_CONFIG_FILE set)
//! 4. Built-in defaults

use std::net::SocketAddr;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Credential variables read without the `TECHLENS_` prefix.
pub const CREDENTIAL_VARS: &[&str] = &[
    "CONTENTFUL_SPACE_ID",
    "CONTENTFUL_ACCESS_TOKEN",
    "GMAIL_USER",
    "GMAIL_APP_PASSWORD",
    "POSTHOG_KEY",
    "POSTHOG_HOST",
];

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Bare credential environment variables
/// 2. Environment variables (TECHLENS_*)
/// 3. TOML config file (if TECHLENS_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Contentful space identifier.
    ///
    /// Set via CONTENTFUL_SPACE_ID environment variable.
    #[serde(default)]
    pub contentful_space_id: Option<String>,

    /// Contentful Delivery API access token.
    ///
    /// Set via CONTENTFUL_ACCESS_TOKEN environment variable.
    #[serde(default)]
    pub contentful_access_token: Option<String>,

    /// Contentful environment (default: master).
    #[serde(default = "default_contentful_environment")]
    pub contentful_environment: String,

    /// Delivery API base URL.
    #[serde(default = "default_contentful_base_url")]
    pub contentful_base_url: String,

    /// Mail account used to send contact form submissions.
    ///
    /// Set via GMAIL_USER environment variable.
    #[serde(default)]
    pub gmail_user: Option<String>,

    /// App password for the mail account.
    ///
    /// Set via GMAIL_APP_PASSWORD environment variable.
    #[serde(default)]
    pub gmail_app_password: Option<String>,

    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// Analytics project key.
    ///
    /// Set via POSTHOG_KEY environment variable.
    #[serde(default)]
    pub posthog_key: Option<String>,

    /// Analytics ingestion host.
    ///
    /// Set via POSTHOG_HOST environment variable.
    #[serde(default)]
    pub posthog_host: Option<String>,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Public base URL of the site, used for the sitemap.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// User-Agent string for outbound HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Outbound HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Abort budget for the diagnostic connectivity probe in milliseconds.
    #[serde(default = "default_status_timeout_ms")]
    pub status_timeout_ms: u64,

    /// Default cache TTL in milliseconds.
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
}

fn default_contentful_environment() -> String {
    "master".into()
}

fn default_contentful_base_url() -> String {
    "https://cdn.contentful.com".into()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".into()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".into()
}

fn default_site_url() -> String {
    "http://localhost:3000".into()
}

fn default_user_agent() -> String {
    "techlens/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_status_timeout_ms() -> u64 {
    5_000
}

fn default_cache_ttl_ms() -> u64 {
    60_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contentful_space_id: None,
            contentful_access_token: None,
            contentful_environment: default_contentful_environment(),
            contentful_base_url: default_contentful_base_url(),
            gmail_user: None,
            gmail_app_password: None,
            smtp_host: default_smtp_host(),
            posthog_key: None,
            posthog_host: None,
            bind_addr: default_bind_addr(),
            site_url: default_site_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            status_timeout_ms: default_status_timeout_ms(),
            cache_ttl_ms: default_cache_ttl_ms(),
        }
    }
}

/// Treat empty strings the same as unset values.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Connectivity probe budget as Duration.
    pub fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }

    /// Default cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `bind_addr` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|e| ConfigError::Invalid { field: "bind_addr".into(), reason: format!("{e}") })
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("TECHLENS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment
            .merge(
                Env::prefixed("TECHLENS_")
                    .ignore(&["CONFIG_FILE"])
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            )
            .merge(Env::raw().only(CREDENTIAL_VARS).map(|key| key.as_str().to_lowercase().into()));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Contentful space id and access token, if both are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the first absent value.
    pub fn require_contentful(&self) -> Result<(&str, &str), ConfigError> {
        let space = present(&self.contentful_space_id).ok_or_else(|| ConfigError::Missing {
            field: "contentful_space_id".into(),
            hint: "Set CONTENTFUL_SPACE_ID environment variable".into(),
        })?;
        let token = present(&self.contentful_access_token).ok_or_else(|| ConfigError::Missing {
            field: "contentful_access_token".into(),
            hint: "Set CONTENTFUL_ACCESS_TOKEN environment variable".into(),
        })?;
        Ok((space, token))
    }

    /// Mail account and app password, if both are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the first absent value.
    pub fn require_mailer(&self) -> Result<(&str, &str), ConfigError> {
        let user = present(&self.gmail_user).ok_or_else(|| ConfigError::Missing {
            field: "gmail_user".into(),
            hint: "Set GMAIL_USER environment variable".into(),
        })?;
        let password = present(&self.gmail_app_password).ok_or_else(|| ConfigError::Missing {
            field: "gmail_app_password".into(),
            hint: "Set GMAIL_APP_PASSWORD environment variable".into(),
        })?;
        Ok((user, password))
    }

    pub fn contentful_configured(&self) -> bool {
        self.require_contentful().is_ok()
    }

    pub fn mailer_configured(&self) -> bool {
        self.require_mailer().is_ok()
    }

    pub fn analytics_configured(&self) -> bool {
        present(&self.posthog_key).is_some() && present(&self.posthog_host).is_some()
    }

    /// Presence of each credential variable, keyed by its environment name.
    ///
    /// Never exposes values.
    pub fn credential_presence(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("CONTENTFUL_SPACE_ID", present(&self.contentful_space_id).is_some()),
            ("CONTENTFUL_ACCESS_TOKEN", present(&self.contentful_access_token).is_some()),
            ("GMAIL_USER", present(&self.gmail_user).is_some()),
            ("GMAIL_APP_PASSWORD", present(&self.gmail_app_password).is_some()),
            ("POSTHOG_KEY", present(&self.posthog_key).is_some()),
            ("POSTHOG_HOST", present(&self.posthog_host).is_some()),
        ]
    }
}
