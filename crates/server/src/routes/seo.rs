//! `robots.txt` and `sitemap.xml`.

use crate::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use techlens_core::site::{SitemapSlugs, robots_txt, sitemap_xml};

pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], robots_txt(&state.config.site_url))
}

/// Static pages plus every blog post, park and service the accessors return.
pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let content = &state.content;
    let (posts, parks, services) = tokio::join!(content.all_blog_posts(), content.all_parks(), content.all_services());

    let slugs = SitemapSlugs {
        blog: posts.into_iter().map(|post| post.fields.slug).collect(),
        parks: parks.into_iter().map(|park| park.fields.slug).collect(),
        services: services.into_iter().map(|service| service.fields.slug).collect(),
    };

    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], sitemap_xml(&state.config.site_url, &slugs))
}
