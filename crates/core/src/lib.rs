//! Core types and shared functionality for techlens.
//!
//! This crate provides:
//! - In-memory TTL cache with stale-on-error fallback
//! - Unified error types
//! - Configuration structures
//! - Content data model, asset URL normalization and sample data
//! - Diagnostics reports and robots/sitemap builders

pub mod asset;
pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod model;
pub mod sample;
pub mod site;

pub use asset::{NormalizeUrls, normalize_asset_url};
pub use cache::{CacheStore, Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use field::get_field;
