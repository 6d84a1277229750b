//! HTTP route definitions.

mod contact;
mod content;
mod diagnostics;
mod seo;

use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

/// Build the complete router.
///
/// # Route Structure
///
/// - `POST /api/contact`, `POST /api/contact-prod` - contact form relay
/// - `GET /api/env-check` - grouped credential presence
/// - `GET /api/check-env` - flat credential presence
/// - `GET /api/site-config` - public site settings
/// - `GET /api/contentful-status` - bounded connectivity probe
/// - `GET /api/contentful-test` - per content type probe
/// - `GET /api/content/...` - accessor results as JSON
/// - `GET /robots.txt`, `GET /sitemap.xml`
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/contact", post(contact::contact))
        .route("/contact-prod", post(contact::contact_prod))
        .route("/env-check", get(diagnostics::env_check))
        .route("/check-env", get(diagnostics::check_env))
        .route("/site-config", get(diagnostics::site_config))
        .route("/contentful-status", get(diagnostics::contentful_status))
        .route("/contentful-test", get(diagnostics::contentful_test))
        .nest("/content", content::router());

    Router::new()
        .nest("/api", api)
        .route("/robots.txt", get(seo::robots))
        .route("/sitemap.xml", get(seo::sitemap))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use techlens_client::{
        ContentService, ContentSource, ContentfulError, EntryPage, EntryQuery, MailTransport, Mailer, MailerError, OutgoingMail,
        SmtpMailTransport,
    };
    use std::time::Duration;
    use techlens_core::{AppConfig, CacheStore};
    use tower::ServiceExt;

    /// Serves fixed items per content type, filtering on `fields.slug`.
    struct StaticSource(HashMap<&'static str, Vec<Value>>);

    #[async_trait]
    impl ContentSource for StaticSource {
        async fn content_types(&self) -> Result<Vec<String>, ContentfulError> {
            Ok(self.0.keys().map(|id| id.to_string()).collect())
        }

        async fn entry_page(&self, query: &EntryQuery) -> Result<EntryPage, ContentfulError> {
            let items: Vec<Value> = self
                .0
                .get(query.content_type.as_str())
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .filter(|item| query.filters.iter().all(|(field, value)| item["fields"][field] == json!(value)))
                .collect();
            Ok(EntryPage { total: items.len() as u64, items })
        }
    }

    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
        failure: Option<MailerError>,
    }

    #[async_trait]
    impl MailTransport for CountingTransport {
        async fn send(&self, _mail: &OutgoingMail) -> Result<(), MailerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    fn site_source() -> Arc<dyn ContentSource> {
        let mut items = HashMap::new();
        items.insert(
            "blogPost",
            vec![json!({"sys": {"id": "p1"}, "fields": {"title": "Owls at Dusk", "slug": "owls-at-dusk"}})],
        );
        items.insert("park", vec![json!({"sys": {"id": "k1"}, "fields": {"name": "Acadia", "slug": "acadia"}})]);
        items.insert("service", vec![]);
        Arc::new(StaticSource(items))
    }

    fn app(source: Option<Arc<dyn ContentSource>>, mailer: Mailer) -> Router {
        let content = ContentService::new(source, Arc::new(CacheStore::default()));
        router(AppState::new(AppConfig::default(), content, mailer))
    }

    fn contact_body(email: &str) -> String {
        json!({"name": "Jo Park", "email": email, "message": "Hello there"}).to_string()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = send(app, Request::get(uri).body(Body::empty()).unwrap()).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_contact_invalid_email_rejected_before_send() {
        let transport = Arc::new(CountingTransport::default());
        let app = app(None, Mailer::new(transport.clone(), "studio@techlens.example"));

        let (status, body) = post_json(app, "/api/contact", contact_body("not-an-email")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    /// Real SMTP transport aimed at a host that is never contacted.
    fn smtp_mailer() -> Mailer {
        let transport = SmtpMailTransport::new("127.0.0.1", "studio@techlens.example", "secret", Duration::from_secs(1)).unwrap();
        Mailer::new(Arc::new(transport), "studio@techlens.example")
    }

    #[tokio::test]
    async fn test_contact_multiline_name_is_bad_request() {
        let body = json!({"name": "Jo\nPark", "email": "jo@example.com", "message": "hi"}).to_string();
        let (status, body) = post_json(app(None, smtp_mailer()), "/api/contact", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_contact_undeliverable_address_is_bad_request() {
        for email in ["jo..x@example.com", "a,b@example.com", "jo(x)@example.com", "jo@example.com."] {
            let (status, body) = post_json(app(None, smtp_mailer()), "/api/contact", contact_body(email)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{email}");
            assert_eq!(body["error"], "VALIDATION_ERROR", "{email}");
        }
    }

    #[tokio::test]
    async fn test_contact_without_credentials() {
        let (status, body) = post_json(app(None, Mailer::unconfigured()), "/api/contact", contact_body("jo@example.com")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "CONFIGURATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn test_contact_success() {
        let transport = Arc::new(CountingTransport::default());
        let mailer = Mailer::new(transport.clone(), "studio@techlens.example");

        let (status, body) = post_json(app(None, mailer), "/api/contact", contact_body("jo@example.com")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["messageId"].as_str().unwrap().ends_with("@techlens.example>"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_contact_prod_matches_contact() {
        let transport = Arc::new(CountingTransport::default());
        let mailer = Mailer::new(transport.clone(), "studio@techlens.example");

        let (status, body) = post_json(app(None, mailer), "/api/contact-prod", contact_body("jo@example.com")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], contact::SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn test_contact_auth_failure_message() {
        let transport = Arc::new(CountingTransport {
            failure: Some(MailerError::AuthFailed("535 5.7.8 rejected".into())),
            ..Default::default()
        });
        let mailer = Mailer::new(transport, "studio@techlens.example");

        let (status, body) = post_json(app(None, mailer), "/api/contact", contact_body("jo@example.com")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "MAILER_AUTH_FAILED");
        assert!(body["message"].as_str().unwrap().contains("authentication"));
    }

    #[tokio::test]
    async fn test_contact_malformed_json() {
        let (status, body) = post_json(app(None, Mailer::unconfigured()), "/api/contact", "{not json".into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_env_check_reports_presence_only() {
        let (status, body) = get_json(app(None, Mailer::unconfigured()), "/api/env-check").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contentful"]["configured"], false);
        assert_eq!(body["allConfigured"], false);

        let (_, body) = get_json(app(None, Mailer::unconfigured()), "/api/check-env").await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row["present"] == false));
    }

    #[tokio::test]
    async fn test_site_config() {
        let (_, body) = get_json(app(None, Mailer::unconfigured()), "/api/site-config").await;
        assert_eq!(body["siteUrl"], "http://localhost:3000");
        assert_eq!(body["analyticsEnabled"], false);
        assert!(body.get("analyticsHost").is_none());
    }

    #[tokio::test]
    async fn test_contentful_diagnostics_unconfigured() {
        let (status, body) = get_json(app(None, Mailer::unconfigured()), "/api/contentful-test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("CONTENTFUL_SPACE_ID"));

        let (status, body) = get_json(app(None, Mailer::unconfigured()), "/api/contentful-status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body.get("connectivity").is_none());
    }

    #[tokio::test]
    async fn test_contentful_diagnostics_live() {
        let (_, body) = get_json(app(Some(site_source()), Mailer::unconfigured()), "/api/contentful-status").await;
        assert_eq!(body["success"], true);
        assert_eq!(body["connectivity"]["contentTypes"].as_array().unwrap().len(), 3);

        let (_, body) = get_json(app(Some(site_source()), Mailer::unconfigured()), "/api/contentful-test").await;
        let probes = body["contentTypes"].as_array().unwrap();
        let blog = probes.iter().find(|p| p["contentType"] == "blogPost").unwrap();
        assert_eq!(blog["exists"], true);
        assert_eq!(blog["entries"], 1);
        assert_eq!(blog["sampleTitle"], "Owls at Dusk");
    }

    #[tokio::test]
    async fn test_content_routes() {
        let (status, body) = get_json(app(None, Mailer::unconfigured()), "/api/content/homepage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fields"]["heroTitle"], "Capturing Nature Through a Tech Lens");

        let (status, body) = get_json(app(Some(site_source()), Mailer::unconfigured()), "/api/content/blog/owls-at-dusk").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fields"]["title"], "Owls at Dusk");

        let (status, body) = get_json(app(Some(site_source()), Mailer::unconfigured()), "/api/content/blog/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);

        let (status, body) = get_json(app(Some(site_source()), Mailer::unconfigured()), "/api/content/services").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_robots_txt() {
        let (status, body) =
            send(app(None, Mailer::unconfigured()), Request::get("/robots.txt").body(Body::empty()).unwrap()).await;
        let text = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        for path in ["/setup/", "/debug/", "/api/", "/test-email/"] {
            assert!(text.contains(&format!("Disallow: {path}")), "{path}");
        }
        assert!(text.contains("Sitemap: http://localhost:3000/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_sitemap_lists_slugs() {
        let (status, body) =
            send(app(Some(site_source()), Mailer::unconfigured()), Request::get("/sitemap.xml").body(Body::empty()).unwrap()).await;
        let xml = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(xml.contains("<loc>http://localhost:3000/blog/owls-at-dusk</loc>"));
        assert!(xml.contains("<loc>http://localhost:3000/parks/acadia</loc>"));
        assert!(xml.contains("<loc>http://localhost:3000/contact</loc>"));
    }
}
