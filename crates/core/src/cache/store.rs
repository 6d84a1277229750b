//! Key → (data, timestamp) store with TTL expiry and stale-on-error reads.

use super::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// TTL used when a call site does not pass its own.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// A cached value and the time it was stored.
#[derive(Clone)]
pub struct CacheEntry {
    pub data: Arc<dyn Any + Send + Sync>,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now.signed_duration_since(self.timestamp);
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => age < ttl,
            Err(_) => true,
        }
    }

    fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.data.downcast_ref::<T>().cloned()
    }
}

/// Process-wide read-through cache.
///
/// Constructed once at startup and shared behind an `Arc`. The lock is
/// only held for map reads and writes, never across a fetch.
pub struct CacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), DEFAULT_TTL)
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore").field("default_ttl", &self.default_ttl).finish_non_exhaustive()
    }
}

impl CacheStore {
    pub fn new(clock: Arc<dyn Clock>, default_ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), clock, default_ttl }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Return the cached value for `key`, fetching it when missing or expired.
    ///
    /// When `fetch` fails and an entry exists for `key` (even an expired
    /// one), the stale value is returned and a warning is logged. Without
    /// a prior entry the fetch error is returned to the caller.
    ///
    /// A stored value of a different type than `T` counts as a miss.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, ttl: Option<Duration>, fetch: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        E: std::fmt::Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let existing = self.entries.read().await.get(key).cloned();

        if let Some(entry) = &existing
            && entry.is_fresh(self.clock.now(), ttl)
            && let Some(data) = entry.downcast::<T>()
        {
            tracing::debug!(key, "cache hit");
            return Ok(data);
        }

        match fetch().await {
            Ok(data) => {
                let entry = CacheEntry { data: Arc::new(data.clone()), timestamp: self.clock.now() };
                self.entries.write().await.insert(key.to_string(), entry);
                Ok(data)
            }
            Err(err) => match existing.as_ref().and_then(|entry| entry.downcast::<T>()) {
                Some(stale) => {
                    tracing::warn!(key, error = %err, "fetch failed, serving stale cache entry");
                    Ok(stale)
                }
                None => Err(err),
            },
        }
    }

    /// Remove one entry, or every entry when `key` is `None`.
    pub async fn clear(&self, key: Option<&str>) {
        let mut entries = self.entries.write().await;
        match key {
            Some(key) => {
                entries.remove(key);
            }
            None => entries.clear(),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Timestamp of the entry stored under `key`, if any.
    pub async fn stored_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.read().await.get(key).map(|entry| entry.timestamp)
    }
}
