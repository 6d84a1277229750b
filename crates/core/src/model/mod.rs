//! Content data model mirroring the Contentful Delivery API shapes.
//!
//! Every entity is an [`Entry`] with a `sys` block and a typed `fields` bag.
//! Reference fields use [`Reference`]: absent (`None`), resolved, or an
//! unresolved link when the include depth did not cover it.

mod entities;

pub use entities::{
    Author, BlogPost, Category, ContentType, Homepage, PageBanner, Park, Photo, Service, CONTENT_TYPES,
};

use crate::asset::{NormalizeUrls, normalize_asset_url};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// System metadata attached to every entry and asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A content entry with typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<F> {
    pub sys: Sys,
    pub fields: F,
}

impl<F: NormalizeUrls> NormalizeUrls for Entry<F> {
    fn normalize_urls(&mut self) {
        self.fields.normalize_urls();
    }
}

/// `sys` block of a link that was not resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    #[serde(rename = "type")]
    pub kind: String,
    pub link_type: String,
    pub id: String,
}

/// A reference field: either the resolved target or the bare link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Resolved(T),
    Unresolved { sys: LinkSys },
}

impl<T> Reference<T> {
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Reference::Resolved(target) => Some(target),
            Reference::Unresolved { .. } => None,
        }
    }

    /// Id of the link target when the reference was not resolved.
    pub fn link_id(&self) -> Option<&str> {
        match self {
            Reference::Resolved(_) => None,
            Reference::Unresolved { sys } => Some(&sys.id),
        }
    }
}

impl<T: NormalizeUrls> NormalizeUrls for Reference<T> {
    fn normalize_urls(&mut self) {
        if let Reference::Resolved(target) = self {
            target.normalize_urls();
        }
    }
}

/// A media asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub sys: Sys,
    pub fields: AssetFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<AssetFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FileDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageDimensions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl Asset {
    /// Build an image asset from literal values.
    pub fn image(id: &str, title: &str, url: &str, width: u32, height: u32) -> Self {
        Self {
            sys: Sys { id: id.to_string(), kind: Some("Asset".into()), ..Default::default() },
            fields: AssetFields {
                title: Some(title.to_string()),
                description: None,
                file: Some(AssetFile {
                    url: url.to_string(),
                    content_type: Some("image/jpeg".into()),
                    file_name: None,
                    details: Some(FileDetails { size: None, image: Some(ImageDimensions { width, height }) }),
                }),
            },
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.fields.file.as_ref().map(|file| file.url.as_str())
    }

    pub fn dimensions(&self) -> Option<ImageDimensions> {
        self.fields.file.as_ref()?.details.as_ref()?.image
    }
}

impl NormalizeUrls for Asset {
    fn normalize_urls(&mut self) {
        if let Some(file) = self.fields.file.as_mut() {
            file.url = normalize_asset_url(&file.url);
        }
    }
}

/// Url of an optional asset reference, following the link only when resolved.
pub fn asset_url(reference: Option<&Reference<Asset>>) -> Option<&str> {
    reference?.resolved()?.url()
}
