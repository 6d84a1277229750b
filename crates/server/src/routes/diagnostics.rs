//! Configuration and connectivity diagnostics.
//!
//! These handlers always answer 200; failures are encoded in the body as
//! `success: false` with an `error` string. Credential values never leave
//! the process, only their presence.

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use serde::Serialize;
use techlens_client::content::probe;
use techlens_core::diagnostics::{
    ConnectivityReport, ContentTypeProbe, EnvReport, EnvVarStatus, IntegrationPresence, env_var_statuses,
};

/// `GET /api/env-check`
pub async fn env_check(State(state): State<AppState>) -> Json<EnvReport> {
    Json(EnvReport::from_config(&state.config))
}

/// `GET /api/check-env`
pub async fn check_env(State(state): State<AppState>) -> Json<Vec<EnvVarStatus>> {
    Json(env_var_statuses(&state.config))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_url: String,
    pub analytics_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_host: Option<String>,
    pub contentful_configured: bool,
    pub mailer_configured: bool,
}

/// `GET /api/site-config`
pub async fn site_config(State(state): State<AppState>) -> Json<SiteConfig> {
    let config = &state.config;
    let analytics_enabled = config.analytics_configured();

    Json(SiteConfig {
        site_url: config.site_url.clone(),
        analytics_enabled,
        analytics_host: config.posthog_host.clone().filter(|_| analytics_enabled),
        contentful_configured: config.contentful_configured(),
        mailer_configured: config.mailer_configured(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentfulStatus {
    pub success: bool,
    pub contentful: IntegrationPresence,
    pub mailer: IntegrationPresence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<ConnectivityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/contentful-status`
///
/// The live probe is bounded by `status_timeout_ms`.
pub async fn contentful_status(State(state): State<AppState>) -> Json<ContentfulStatus> {
    let presence = EnvReport::from_config(&state.config);

    let (connectivity, error) = match state.content.source() {
        Ok(source) => (Some(probe::connectivity(source.as_ref(), state.config.status_timeout()).await), None),
        Err(err) => (None, Some(err.to_string())),
    };
    let success = connectivity.as_ref().is_some_and(|report| report.ok);
    let error = error.or_else(|| connectivity.as_ref().and_then(|report| report.error.clone()));

    Json(ContentfulStatus { success, contentful: presence.contentful, mailer: presence.mailer, connectivity, error })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentfulTest {
    pub success: bool,
    pub content_types: Vec<ContentTypeProbe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/contentful-test`
pub async fn contentful_test(State(state): State<AppState>) -> Json<ContentfulTest> {
    let outcome = match state.content.source() {
        Ok(source) => probe::probe_content_types(source.as_ref()).await.map_err(|e| e.to_string()),
        Err(err) => Err(err.to_string()),
    };

    match outcome {
        Ok(content_types) => Json(ContentfulTest { success: true, content_types, error: None }),
        Err(error) => {
            tracing::warn!(%error, "content type probe failed");
            Json(ContentfulTest { success: false, content_types: Vec::new(), error: Some(error) })
        }
    }
}
