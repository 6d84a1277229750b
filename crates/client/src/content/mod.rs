//! Content accessors with schema checks, caching and sample-data fallback.
//!
//! Every accessor follows the same protocol:
//!
//! 1. Check that the content type exists in the space.
//! 2. Query, decode, and normalize asset URLs.
//! 3. On any failure return the accessor's fallback instead of an error.
//!
//! Fallbacks differ per accessor and callers rely on the difference:
//!
//! | Accessor | Fallback | Cached |
//! |----------|----------|--------|
//! | `homepage` | sample homepage | 5 min |
//! | `all_categories` | sample categories | 30 min |
//! | `all_photos` | sample photos | no |
//! | `all_blog_posts`, `all_parks`, `all_services` | `[]` | no |
//! | `*_by_slug`, `photographer_info` | `None` | no |
//! | `page_banner` | `None` | store default TTL |

pub mod probe;

use crate::contentful::{ContentfulClient, ContentfulError, EntryQuery};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use techlens_core::model::{Author, BlogPost, Category, ContentType, Entry, Homepage, PageBanner, Park, Photo, Service};
use techlens_core::{AppConfig, CacheStore, Error, NormalizeUrls, sample};

/// Query interface of the remote content source.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Ids of every content type defined in the space.
    async fn content_types(&self) -> Result<Vec<String>, ContentfulError>;

    async fn has_content_type(&self, id: &str) -> Result<bool, ContentfulError> {
        Ok(self.content_types().await?.iter().any(|known| known == id))
    }

    /// One page of items matching `query`, links resolved up to
    /// `query.include`, with the source's total match count.
    async fn entry_page(&self, query: &EntryQuery) -> Result<EntryPage, ContentfulError>;

    async fn entries(&self, query: &EntryQuery) -> Result<Vec<Value>, ContentfulError> {
        Ok(self.entry_page(query).await?.items)
    }
}

/// Items of one query plus the total number of matches, which may exceed
/// `items.len()` when a limit applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPage {
    pub items: Vec<Value>,
    pub total: u64,
}

/// Cache keys used by the accessors.
pub mod keys {
    pub const HOMEPAGE: &str = "homepage";
    pub const CATEGORIES: &str = "categories";

    pub fn page_banner(identifier: &str) -> String {
        format!("pageBanner:{identifier}")
    }
}

pub const HOMEPAGE_TTL: Duration = Duration::from_secs(5 * 60);
pub const CATEGORIES_TTL: Duration = Duration::from_secs(30 * 60);

/// Include depth for entities that embed other entries.
const NESTED_INCLUDE: u8 = 2;

fn log_fallback(accessor: &'static str, err: &Error) {
    if err.is_expected() {
        tracing::info!(accessor, error = %err, "content unavailable, using fallback");
    } else {
        tracing::warn!(accessor, error = %err, "content fetch failed, using fallback");
    }
}

fn sort_photos(photos: &mut [Entry<Photo>]) {
    photos.sort_by(|a, b| {
        b.fields
            .date_taken
            .cmp(&a.fields.date_taken)
            .then_with(|| b.sys.created_at.cmp(&a.sys.created_at))
    });
}

fn sort_newest_created(posts: &mut [Entry<BlogPost>]) {
    posts.sort_by(|a, b| b.sys.created_at.cmp(&a.sys.created_at));
}

/// Read side of the site's content.
pub struct ContentService {
    source: Option<Arc<dyn ContentSource>>,
    cache: Arc<CacheStore>,
}

impl ContentService {
    pub fn new(source: Option<Arc<dyn ContentSource>>, cache: Arc<CacheStore>) -> Self {
        Self { source, cache }
    }

    /// Build the service against Contentful when credentials are present.
    ///
    /// Missing credentials are not fatal: every accessor then serves its
    /// fallback.
    pub fn from_config(config: &AppConfig, cache: Arc<CacheStore>) -> Self {
        match ContentfulClient::from_app_config(config) {
            Ok(client) => Self::new(Some(Arc::new(client)), cache),
            Err(err) => {
                tracing::warn!(error = %err, "Contentful not configured, serving sample content");
                Self::new(None, cache)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_some()
    }

    /// The configured content source.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` when Contentful credentials are absent.
    pub fn source(&self) -> Result<&Arc<dyn ContentSource>, Error> {
        self.source.as_ref().ok_or_else(|| {
            Error::Configuration("Contentful credentials missing: set CONTENTFUL_SPACE_ID and CONTENTFUL_ACCESS_TOKEN".into())
        })
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Drop one cached accessor result, or all of them.
    pub async fn clear_cache(&self, key: Option<&str>) {
        self.cache.clear(key).await;
    }

    /// Run `query` for `F`'s content type after checking the type exists.
    ///
    /// Items that fail to decode are skipped with a warning.
    async fn query<F>(&self, query: EntryQuery) -> Result<Vec<Entry<F>>, Error>
    where
        F: ContentType + DeserializeOwned + NormalizeUrls,
    {
        let source = self.source()?;

        if !source.has_content_type(F::ID).await? {
            return Err(Error::SchemaAbsent(format!("content type '{}' is not defined", F::ID)));
        }

        let items = source.entries(&query).await?;
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Entry<F>>(item) {
                Ok(mut entry) => {
                    entry.normalize_urls();
                    entries.push(entry);
                }
                Err(err) => tracing::warn!(content_type = F::ID, error = %err, "skipping malformed entry"),
            }
        }

        Ok(entries)
    }

    async fn query_non_empty<F>(&self, query: EntryQuery) -> Result<Vec<Entry<F>>, Error>
    where
        F: ContentType + DeserializeOwned + NormalizeUrls,
    {
        let entries = self.query::<F>(query).await?;
        if entries.is_empty() {
            return Err(Error::Empty(format!("no '{}' entries", F::ID)));
        }
        Ok(entries)
    }

    async fn first<F>(&self, query: EntryQuery) -> Result<Entry<F>, Error>
    where
        F: ContentType + DeserializeOwned + NormalizeUrls,
    {
        self.query_non_empty::<F>(query.limit(1))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Empty(format!("no '{}' entries", F::ID)))
    }

    /// Slug lookups: absence is a normal outcome, never sample data.
    async fn by_slug<F>(&self, accessor: &'static str, slug: &str) -> Option<Entry<F>>
    where
        F: ContentType + DeserializeOwned + NormalizeUrls,
    {
        let query = EntryQuery::new(F::ID).field_eq("slug", slug).include(NESTED_INCLUDE).limit(1);
        match self.query::<F>(query).await {
            Ok(entries) => entries.into_iter().next(),
            Err(err) => {
                log_fallback(accessor, &err);
                None
            }
        }
    }

    async fn list_or_empty<F>(&self, accessor: &'static str, query: EntryQuery) -> Vec<Entry<F>>
    where
        F: ContentType + DeserializeOwned + NormalizeUrls,
    {
        self.query::<F>(query).await.unwrap_or_else(|err| {
            log_fallback(accessor, &err);
            Vec::new()
        })
    }

    pub async fn homepage(&self) -> Entry<Homepage> {
        let fetch = || self.first::<Homepage>(EntryQuery::new(Homepage::ID).include(NESTED_INCLUDE));
        match self.cache.get_or_fetch(keys::HOMEPAGE, Some(HOMEPAGE_TTL), fetch).await {
            Ok(homepage) => homepage,
            Err(err) => {
                log_fallback("homepage", &err);
                sample::homepage()
            }
        }
    }

    /// Blog posts, newest first. Empty on any failure.
    pub async fn all_blog_posts(&self) -> Vec<Entry<BlogPost>> {
        let query = EntryQuery::new(BlogPost::ID).order_by("-sys.createdAt").include(NESTED_INCLUDE);
        let mut posts = self.list_or_empty::<BlogPost>("all_blog_posts", query).await;
        sort_newest_created(&mut posts);
        posts
    }

    pub async fn blog_post_by_slug(&self, slug: &str) -> Option<Entry<BlogPost>> {
        self.by_slug::<BlogPost>("blog_post_by_slug", slug).await
    }

    /// Gallery items ordered by date taken, then creation time, newest first.
    pub async fn all_photos(&self) -> Vec<Entry<Photo>> {
        let query = EntryQuery::new(Photo::ID)
            .order_by("-fields.dateTaken")
            .order_by("-sys.createdAt")
            .include(NESTED_INCLUDE);

        match self.query_non_empty::<Photo>(query).await {
            Ok(mut photos) => {
                sort_photos(&mut photos);
                photos
            }
            Err(err) => {
                log_fallback("all_photos", &err);
                sample::photos()
            }
        }
    }

    pub async fn all_categories(&self) -> Vec<Entry<Category>> {
        let fetch = || self.query_non_empty::<Category>(EntryQuery::new(Category::ID).order_by("fields.name"));
        match self.cache.get_or_fetch(keys::CATEGORIES, Some(CATEGORIES_TTL), fetch).await {
            Ok(categories) => categories,
            Err(err) => {
                log_fallback("all_categories", &err);
                sample::categories()
            }
        }
    }

    pub async fn photographer_info(&self) -> Option<Entry<Author>> {
        match self.first::<Author>(EntryQuery::new(Author::ID)).await {
            Ok(author) => Some(author),
            Err(err) => {
                log_fallback("photographer_info", &err);
                None
            }
        }
    }

    pub async fn all_parks(&self) -> Vec<Entry<Park>> {
        let query = EntryQuery::new(Park::ID).order_by("fields.name");
        self.list_or_empty::<Park>("all_parks", query).await
    }

    pub async fn park_by_slug(&self, slug: &str) -> Option<Entry<Park>> {
        self.by_slug::<Park>("park_by_slug", slug).await
    }

    pub async fn all_services(&self) -> Vec<Entry<Service>> {
        let query = EntryQuery::new(Service::ID).order_by("sys.createdAt");
        self.list_or_empty::<Service>("all_services", query).await
    }

    pub async fn service_by_slug(&self, slug: &str) -> Option<Entry<Service>> {
        self.by_slug::<Service>("service_by_slug", slug).await
    }

    /// Banner for the page named `identifier`, cached at the store default TTL.
    pub async fn page_banner(&self, identifier: &str) -> Option<Entry<PageBanner>> {
        let key = keys::page_banner(identifier);
        let fetch = || self.first::<PageBanner>(EntryQuery::new(PageBanner::ID).field_eq("identifier", identifier));
        match self.cache.get_or_fetch(&key, None, fetch).await {
            Ok(banner) => Some(banner),
            Err(err) => {
                log_fallback("page_banner", &err);
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use techlens_core::ManualClock;
    use techlens_core::model::{Reference, asset_url};

    /// In-memory content source; filters on `fields.<name>` equality only.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub types: Vec<String>,
        pub items: HashMap<String, Vec<Value>>,
        pub failing: AtomicBool,
        pub entry_calls: AtomicUsize,
        pub queries: Mutex<Vec<EntryQuery>>,
    }

    impl FakeSource {
        pub fn with(content_type: &str, items: Vec<Value>) -> Self {
            let mut source = Self::default();
            source.add(content_type, items);
            source
        }

        pub fn add(&mut self, content_type: &str, items: Vec<Value>) {
            self.types.push(content_type.to_string());
            self.items.insert(content_type.to_string(), items);
        }

        pub fn fail(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ContentSource for FakeSource {
        async fn content_types(&self) -> Result<Vec<String>, ContentfulError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ContentfulError::Timeout);
            }
            Ok(self.types.clone())
        }

        async fn entry_page(&self, query: &EntryQuery) -> Result<EntryPage, ContentfulError> {
            self.entry_calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.clone());
            if self.failing.load(Ordering::SeqCst) {
                return Err(ContentfulError::HttpError { status: 503 });
            }

            let items = self.items.get(&query.content_type).cloned().unwrap_or_default();
            let mut matched: Vec<Value> = items
                .into_iter()
                .filter(|item| query.filters.iter().all(|(field, value)| item["fields"][field] == json!(value)))
                .collect();
            let total = matched.len() as u64;
            if let Some(limit) = query.limit {
                matched.truncate(limit as usize);
            }
            Ok(EntryPage { items: matched, total })
        }
    }

    fn service_with(source: FakeSource) -> (Arc<FakeSource>, Arc<ManualClock>, ContentService) {
        let source = Arc::new(source);
        let clock = Arc::new(ManualClock::default());
        let cache = Arc::new(CacheStore::new(clock.clone(), techlens_core::cache::DEFAULT_TTL));
        let service = ContentService::new(Some(source.clone() as Arc<dyn ContentSource>), cache);
        (source, clock, service)
    }

    fn homepage_item(title: &str) -> Value {
        json!({
            "sys": {"id": "home", "type": "Entry"},
            "fields": {
                "heroTitle": title,
                "heroImage": {"sys": {"id": "hero"}, "fields": {"file": {"url": "//images.ctfassets.net/hero.jpg"}}}
            }
        })
    }

    fn photo_item(id: &str, date: &str, created: &str) -> Value {
        json!({
            "sys": {"id": id, "createdAt": created},
            "fields": {
                "title": id,
                "dateTaken": date,
                "image": {"sys": {"id": format!("{id}-img")}, "fields": {"file": {"url": format!("//img/{id}.jpg")}}}
            }
        })
    }

    fn post_item(slug: &str, created: &str) -> Value {
        json!({"sys": {"id": slug, "createdAt": created}, "fields": {"title": slug, "slug": slug}})
    }

    #[tokio::test]
    async fn test_homepage_network_error_returns_sample() {
        let (source, _clock, service) = service_with(FakeSource::with("homepage", vec![homepage_item("Live")]));
        source.fail(true);

        let homepage = service.homepage().await;
        assert_eq!(homepage.fields.hero_title, "Capturing Nature Through a Tech Lens");
    }

    #[tokio::test]
    async fn test_homepage_normalized_and_cached() {
        let (source, clock, service) = service_with(FakeSource::with("homepage", vec![homepage_item("Live")]));

        let first = service.homepage().await;
        clock.advance(Duration::from_secs(60));
        let second = service.homepage().await;

        assert_eq!(first.fields.hero_title, "Live");
        assert_eq!(second, first);
        assert_eq!(asset_url(first.fields.hero_image.as_ref()), Some("https://images.ctfassets.net/hero.jpg"));
        assert_eq!(source.entry_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_homepage_serves_stale_after_failure() {
        let (source, clock, service) = service_with(FakeSource::with("homepage", vec![homepage_item("Live")]));
        service.homepage().await;

        clock.advance(HOMEPAGE_TTL + Duration::from_secs(1));
        source.fail(true);

        assert_eq!(service.homepage().await.fields.hero_title, "Live");
    }

    #[tokio::test]
    async fn test_homepage_empty_returns_sample() {
        let (_source, _clock, service) = service_with(FakeSource::with("homepage", vec![]));
        assert_eq!(service.homepage().await.fields.hero_title, "Capturing Nature Through a Tech Lens");
    }

    #[tokio::test]
    async fn test_unconfigured_service_falls_back() {
        let service = ContentService::new(None, Arc::new(CacheStore::default()));
        assert!(!service.is_configured());
        assert!(matches!(service.source(), Err(Error::Configuration(_))));
        assert_eq!(service.homepage().await.fields.hero_title, "Capturing Nature Through a Tech Lens");
        assert!(service.all_parks().await.is_empty());
        assert!(service.blog_post_by_slug("anything").await.is_none());
    }

    #[tokio::test]
    async fn test_blog_posts_schema_absent_is_empty() {
        let (source, _clock, service) = service_with(FakeSource::with("homepage", vec![homepage_item("Live")]));
        assert!(service.all_blog_posts().await.is_empty());
        assert_eq!(source.entry_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blog_posts_newest_first() {
        let posts = vec![
            post_item("older", "2024-01-01T00:00:00Z"),
            post_item("newest", "2024-06-01T00:00:00Z"),
            post_item("middle", "2024-03-01T00:00:00Z"),
        ];
        let (source, _clock, service) = service_with(FakeSource::with("blogPost", posts));

        let slugs: Vec<_> = service.all_blog_posts().await.into_iter().map(|p| p.fields.slug).collect();
        assert_eq!(slugs, vec!["newest", "middle", "older"]);
        assert_eq!(source.queries.lock().unwrap()[0].order, vec!["-sys.createdAt"]);
    }

    #[tokio::test]
    async fn test_blog_post_by_slug() {
        let posts = vec![post_item("first-light", "2024-01-01T00:00:00Z"), post_item("dusk", "2024-02-01T00:00:00Z")];
        let (_source, _clock, service) = service_with(FakeSource::with("blogPost", posts));

        let post = service.blog_post_by_slug("dusk").await.unwrap();
        assert_eq!(post.fields.title, "dusk");
    }

    #[tokio::test]
    async fn test_slug_not_found_is_none_not_sample() {
        let (_source, _clock, service) =
            service_with(FakeSource::with("park", vec![json!({"sys": {"id": "y"}, "fields": {"name": "Yellowstone", "slug": "yellowstone"}})]));

        assert!(service.park_by_slug("denali").await.is_none());
        assert!(service.park_by_slug("yellowstone").await.is_some());
    }

    #[tokio::test]
    async fn test_slug_lookup_swallows_errors() {
        let (source, _clock, service) = service_with(FakeSource::with("service", vec![]));
        source.fail(true);
        assert!(service.service_by_slug("workshops").await.is_none());
    }

    #[tokio::test]
    async fn test_photos_ordering_and_normalization() {
        let photos = vec![
            photo_item("a", "2023-05-01", "2023-05-02T00:00:00Z"),
            photo_item("b", "2024-01-10", "2024-01-11T00:00:00Z"),
            photo_item("c", "2023-05-01", "2023-06-01T00:00:00Z"),
        ];
        let (source, _clock, service) = service_with(FakeSource::with("photo", photos));

        let result = service.all_photos().await;
        let ids: Vec<_> = result.iter().map(|p| p.sys.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(result.iter().all(|p| asset_url(p.fields.image.as_ref()).unwrap().starts_with("https://")));
        assert_eq!(source.queries.lock().unwrap()[0].order, vec!["-fields.dateTaken", "-sys.createdAt"]);
    }

    #[tokio::test]
    async fn test_photos_fall_back_to_sample() {
        let (source, _clock, service) = service_with(FakeSource::with("photo", vec![]));
        assert_eq!(service.all_photos().await, sample::photos());

        source.fail(true);
        assert_eq!(service.all_photos().await, sample::photos());
    }

    #[tokio::test]
    async fn test_malformed_items_are_skipped() {
        let photos = vec![json!({"sys": {"id": "broken"}, "fields": {"dateTaken": 5}}), photo_item("ok", "2024-01-01", "2024-01-01T00:00:00Z")];
        let (_source, _clock, service) = service_with(FakeSource::with("photo", photos));

        let result = service.all_photos().await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sys.id, "ok");
    }

    #[tokio::test]
    async fn test_categories_cached_and_fallback() {
        let categories = vec![json!({
            "sys": {"id": "c1"},
            "fields": {"name": "Birds", "slug": "birds", "coverPhoto": {"sys": {"id": "a"}, "fields": {"file": {"url": "//img/birds.jpg"}}}}
        })];
        let (source, clock, service) = service_with(FakeSource::with("category", categories));

        let first = service.all_categories().await;
        clock.advance(Duration::from_secs(29 * 60));
        service.all_categories().await;
        assert_eq!(source.entry_calls.load(Ordering::SeqCst), 1);
        assert_eq!(asset_url(first[0].fields.cover_photo.as_ref()), Some("https://img/birds.jpg"));

        service.clear_cache(Some(keys::CATEGORIES)).await;
        source.fail(true);
        assert_eq!(service.all_categories().await, sample::categories());
    }

    #[tokio::test]
    async fn test_photographer_info() {
        let author = json!({"sys": {"id": "me"}, "fields": {"name": "Sam Rivera", "bio": "Engineer with a long lens."}});
        let (_source, _clock, service) = service_with(FakeSource::with("author", vec![author]));
        assert_eq!(service.photographer_info().await.unwrap().fields.name, "Sam Rivera");
    }

    #[tokio::test]
    async fn test_photographer_info_absent() {
        let (_source, _clock, service) = service_with(FakeSource::default());
        assert!(service.photographer_info().await.is_none());
    }

    #[tokio::test]
    async fn test_services_and_parks_lists() {
        let mut source = FakeSource::with(
            "service",
            vec![json!({"sys": {"id": "s1"}, "fields": {"title": "Print Sales", "slug": "prints", "features": ["Archival paper"]}})],
        );
        source.add(
            "park",
            vec![json!({
                "sys": {"id": "p1"},
                "fields": {
                    "name": "Denali",
                    "slug": "denali",
                    "gallery": [
                        {"sys": {"id": "g1"}, "fields": {"file": {"url": "//img/g1.jpg"}}},
                        {"sys": {"type": "Link", "linkType": "Asset", "id": "g2"}}
                    ]
                }
            })],
        );
        let (_source, _clock, service) = service_with(source);

        let services = service.all_services().await;
        assert_eq!(services[0].fields.features, vec!["Archival paper"]);

        let parks = service.all_parks().await;
        let gallery = &parks[0].fields.gallery;
        assert_eq!(gallery[0].resolved().and_then(|a| a.url()), Some("https://img/g1.jpg"));
        assert!(matches!(gallery[1], Reference::Unresolved { .. }));
    }

    #[tokio::test]
    async fn test_page_banner_cached_per_identifier() {
        let banners = vec![
            json!({"sys": {"id": "b1"}, "fields": {"identifier": "about", "title": "About Me"}}),
            json!({"sys": {"id": "b2"}, "fields": {"identifier": "gallery", "title": "The Gallery"}}),
        ];
        let (source, clock, service) = service_with(FakeSource::with("pageBanner", banners));

        assert_eq!(service.page_banner("about").await.unwrap().fields.title, "About Me");
        assert_eq!(service.page_banner("gallery").await.unwrap().fields.title, "The Gallery");
        assert_eq!(service.page_banner("about").await.unwrap().fields.title, "About Me");
        assert_eq!(source.entry_calls.load(Ordering::SeqCst), 2);

        clock.advance(Duration::from_secs(61));
        service.page_banner("about").await;
        assert_eq!(source.entry_calls.load(Ordering::SeqCst), 3);

        assert!(service.page_banner("contact").await.is_none());
    }
}
