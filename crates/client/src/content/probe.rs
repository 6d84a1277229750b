//! Live checks behind the diagnostics endpoints.

use super::{ContentSource, EntryPage};
use crate::contentful::{ContentfulError, EntryQuery};
use serde_json::Value;
use std::time::{Duration, Instant};
use techlens_core::diagnostics::{ConnectivityReport, ContentTypeProbe};
use techlens_core::get_field;
use techlens_core::model::CONTENT_TYPES;

/// Field paths tried, in order, for a human-readable entry title.
const TITLE_PATHS: &[&str] = &["fields.title", "fields.name", "fields.heroTitle"];

/// List content types within `budget`.
///
/// Never fails: errors and timeouts are reported in the result.
pub async fn connectivity(source: &dyn ContentSource, budget: Duration) -> ConnectivityReport {
    let start = Instant::now();
    let outcome = tokio::time::timeout(budget, source.content_types()).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(Ok(content_types)) => ConnectivityReport { ok: true, latency_ms, content_types, error: None },
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "Contentful connectivity check failed");
            ConnectivityReport { ok: false, latency_ms, content_types: Vec::new(), error: Some(err.to_string()) }
        }
        Err(_) => {
            tracing::warn!(budget_ms = budget.as_millis() as u64, "Contentful connectivity check timed out");
            ConnectivityReport {
                ok: false,
                latency_ms,
                content_types: Vec::new(),
                error: Some(ContentfulError::Timeout.to_string()),
            }
        }
    }
}

/// First non-empty title-like field of a raw entry.
pub fn entry_title(entry: &Value) -> Option<String> {
    TITLE_PATHS
        .iter()
        .map(|path| get_field(entry, path, String::new()))
        .find(|title| !title.is_empty())
}

/// Check each known content type: existence, entry count and a sample title.
///
/// # Errors
///
/// Fails only when the content type listing itself fails. Per type query
/// errors are recorded on that type's row.
pub async fn probe_content_types(source: &dyn ContentSource) -> Result<Vec<ContentTypeProbe>, ContentfulError> {
    let available = source.content_types().await?;
    let mut probes = Vec::with_capacity(CONTENT_TYPES.len());

    for &content_type in CONTENT_TYPES {
        let mut probe = ContentTypeProbe {
            content_type: content_type.to_string(),
            exists: available.iter().any(|id| id == content_type),
            entries: None,
            sample_title: None,
            error: None,
        };

        if probe.exists {
            let query = EntryQuery::new(content_type).include(0).limit(1);
            match source.entry_page(&query).await {
                Ok(EntryPage { items, total }) => {
                    probe.entries = Some(total);
                    probe.sample_title = items.first().and_then(entry_title);
                }
                Err(err) => probe.error = Some(err.to_string()),
            }
        }

        probes.push(probe);
    }

    Ok(probes)
}
