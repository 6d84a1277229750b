//! Configuration and connectivity reports for the diagnostics endpoints.
//!
//! Reports only ever carry presence flags, never credential values.

use crate::config::AppConfig;
use serde::{Deserialize, Serialize};

/// Presence of one integration's credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationPresence {
    pub primary: bool,
    pub secondary: bool,
    pub configured: bool,
}

impl IntegrationPresence {
    fn new(primary: bool, secondary: bool) -> Self {
        Self { primary, secondary, configured: primary && secondary }
    }
}

/// Grouped view used by `/api/env-check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvReport {
    /// `primary` = space id, `secondary` = access token.
    pub contentful: IntegrationPresence,
    /// `primary` = account, `secondary` = app password.
    pub mailer: IntegrationPresence,
    /// `primary` = project key, `secondary` = host.
    pub analytics: IntegrationPresence,
    pub all_configured: bool,
}

impl EnvReport {
    pub fn from_config(config: &AppConfig) -> Self {
        let presence = config.credential_presence();
        let has = |name: &str| presence.iter().any(|(var, present)| *var == name && *present);

        let contentful = IntegrationPresence::new(has("CONTENTFUL_SPACE_ID"), has("CONTENTFUL_ACCESS_TOKEN"));
        let mailer = IntegrationPresence::new(has("GMAIL_USER"), has("GMAIL_APP_PASSWORD"));
        let analytics = IntegrationPresence::new(has("POSTHOG_KEY"), has("POSTHOG_HOST"));

        Self {
            contentful,
            mailer,
            analytics,
            all_configured: contentful.configured && mailer.configured && analytics.configured,
        }
    }
}

/// One row of the flat view used by `/api/check-env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVarStatus {
    pub name: String,
    pub present: bool,
}

pub fn env_var_statuses(config: &AppConfig) -> Vec<EnvVarStatus> {
    config
        .credential_presence()
        .into_iter()
        .map(|(name, present)| EnvVarStatus { name: name.to_string(), present })
        .collect()
}

/// Result of the live content-types probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityReport {
    pub ok: bool,
    pub latency_ms: u64,
    #[serde(default)]
    pub content_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per content type result of `/api/contentful-test`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeProbe {
    pub content_type: String,
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Total matching entries as reported by the source.
    pub entries: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
