//! techlens command-line entry point.
//!
//! Output is JSON on stdout; logs are JSON on stderr.

mod args;

use anyhow::{Context, Result, bail};
use args::{Cli, Commands, ContentKind};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use techlens_client::ContentService;
use techlens_client::content::probe;
use techlens_core::diagnostics::EnvReport;
use techlens_core::{AppConfig, CacheStore, SystemClock};
use tracing_subscriber::EnvFilter;

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print `value`, or fail naming what was missing.
fn print_found<T: Serialize>(value: Option<T>, what: &str) -> Result<()> {
    match value {
        Some(value) => print(&value),
        None => bail!("{what} not found"),
    }
}

async fn content(service: &ContentService, kind: ContentKind, slug: Option<&str>) -> Result<()> {
    kind.check_slug(slug).map_err(anyhow::Error::msg)?;

    match (kind, slug) {
        (ContentKind::Homepage, _) => print(&service.homepage().await),
        (ContentKind::Blog, None) => print(&service.all_blog_posts().await),
        (ContentKind::Blog, Some(slug)) => print_found(service.blog_post_by_slug(slug).await, "blog post"),
        (ContentKind::Photos, _) => print(&service.all_photos().await),
        (ContentKind::Categories, _) => print(&service.all_categories().await),
        (ContentKind::Photographer, _) => print_found(service.photographer_info().await, "photographer"),
        (ContentKind::Parks, None) => print(&service.all_parks().await),
        (ContentKind::Parks, Some(slug)) => print_found(service.park_by_slug(slug).await, "park"),
        (ContentKind::Services, None) => print(&service.all_services().await),
        (ContentKind::Services, Some(slug)) => print_found(service.service_by_slug(slug).await, "service"),
        (ContentKind::Banner, Some(identifier)) => print_found(service.page_banner(identifier).await, "page banner"),
        (ContentKind::Banner, None) => bail!("banner requires --slug <identifier>"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let cache = Arc::new(CacheStore::new(Arc::new(SystemClock), config.cache_ttl()));
    let service = ContentService::from_config(&config, cache);

    tracing::debug!(command = ?cli.command, contentful = service.is_configured(), "running command");

    match cli.command {
        Commands::Env => print(&EnvReport::from_config(&config)),
        Commands::Status { types } => {
            let source = service.source()?;
            let report = probe::connectivity(source.as_ref(), config.status_timeout()).await;
            print(&report)?;

            if types {
                print(&probe::probe_content_types(source.as_ref()).await?)?;
            }
            if !report.ok {
                bail!("Contentful unreachable");
            }
            Ok(())
        }
        Commands::Content { kind, slug } => content(&service, kind, slug.as_deref()).await,
    }
}
