//! Shared application state.

use std::sync::Arc;
use techlens_client::{ContentService, Mailer, MailerError};
use techlens_core::{AppConfig, CacheStore, SystemClock};

/// Handles shared by every request.
///
/// Built once at startup; the cache inside `content` lives as long as the
/// process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub content: Arc<ContentService>,
    pub mailer: Arc<Mailer>,
}

impl AppState {
    pub fn new(config: AppConfig, content: ContentService, mailer: Mailer) -> Self {
        Self { config: Arc::new(config), content: Arc::new(content), mailer: Arc::new(mailer) }
    }

    /// Wire Contentful and SMTP from `config`.
    ///
    /// Missing credentials leave the matching integration unconfigured.
    pub fn from_config(config: AppConfig) -> Result<Self, MailerError> {
        let cache = Arc::new(CacheStore::new(Arc::new(SystemClock), config.cache_ttl()));
        let content = ContentService::from_config(&config, cache);
        let mailer = Mailer::from_app_config(&config)?;

        tracing::info!(
            contentful = content.is_configured(),
            mailer = mailer.is_configured(),
            analytics = config.analytics_configured(),
            "integrations resolved"
        );

        Ok(Self::new(config, content, mailer))
    }
}
