//! Read-only JSON views of the content accessors.
//!
//! Lists never fail. Singular lookups answer 404 when absent.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use techlens_core::model::{Author, BlogPost, Category, Entry, Homepage, PageBanner, Park, Photo, Service};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/homepage", get(homepage))
        .route("/blog", get(blog_posts))
        .route("/blog/{slug}", get(blog_post))
        .route("/photos", get(photos))
        .route("/categories", get(categories))
        .route("/photographer", get(photographer))
        .route("/parks", get(parks))
        .route("/parks/{slug}", get(park))
        .route("/services", get(services))
        .route("/services/{slug}", get(service))
        .route("/banners/{identifier}", get(banner))
}

fn found<T>(value: Option<T>, what: &str) -> Result<Json<T>, ApiError> {
    value.map(Json).ok_or_else(|| ApiError::NotFound(format!("{what} not found")))
}

async fn homepage(State(state): State<AppState>) -> Json<Entry<Homepage>> {
    Json(state.content.homepage().await)
}

async fn blog_posts(State(state): State<AppState>) -> Json<Vec<Entry<BlogPost>>> {
    Json(state.content.all_blog_posts().await)
}

async fn blog_post(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Entry<BlogPost>>, ApiError> {
    found(state.content.blog_post_by_slug(&slug).await, &format!("blog post '{slug}'"))
}

async fn photos(State(state): State<AppState>) -> Json<Vec<Entry<Photo>>> {
    Json(state.content.all_photos().await)
}

async fn categories(State(state): State<AppState>) -> Json<Vec<Entry<Category>>> {
    Json(state.content.all_categories().await)
}

async fn photographer(State(state): State<AppState>) -> Result<Json<Entry<Author>>, ApiError> {
    found(state.content.photographer_info().await, "photographer")
}

async fn parks(State(state): State<AppState>) -> Json<Vec<Entry<Park>>> {
    Json(state.content.all_parks().await)
}

async fn park(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Entry<Park>>, ApiError> {
    found(state.content.park_by_slug(&slug).await, &format!("park '{slug}'"))
}

async fn services(State(state): State<AppState>) -> Json<Vec<Entry<Service>>> {
    Json(state.content.all_services().await)
}

async fn service(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Entry<Service>>, ApiError> {
    found(state.content.service_by_slug(&slug).await, &format!("service '{slug}'"))
}

async fn banner(
    State(state): State<AppState>, Path(identifier): Path<String>,
) -> Result<Json<Entry<PageBanner>>, ApiError> {
    found(state.content.page_banner(&identifier).await, &format!("page banner '{identifier}'"))
}
