//! Field bags for each content type in the portfolio space.

use super::{Asset, Entry, Reference};
use crate::asset::NormalizeUrls;
use serde::{Deserialize, Serialize};

/// Binds a field bag to its Contentful content type id.
pub trait ContentType {
    const ID: &'static str;
}

/// Every content type the site reads, in display order for diagnostics.
pub const CONTENT_TYPES: &[&str] = &[
    Homepage::ID,
    BlogPost::ID,
    Photo::ID,
    Category::ID,
    Author::ID,
    Park::ID,
    Service::ID,
    PageBanner::ID,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homepage {
    pub hero_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<Reference<Asset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_text: Option<String>,
    #[serde(default)]
    pub featured_photos: Vec<Reference<Entry<Photo>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
}

impl ContentType for Homepage {
    const ID: &'static str = "homepage";
}

impl NormalizeUrls for Homepage {
    fn normalize_urls(&mut self) {
        self.hero_image.normalize_urls();
        self.featured_photos.normalize_urls();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Rich text document, passed through to the renderer untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<Reference<Asset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference<Entry<Author>>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContentType for BlogPost {
    const ID: &'static str = "blogPost";
}

impl NormalizeUrls for BlogPost {
    fn normalize_urls(&mut self) {
        self.cover_image.normalize_urls();
        self.author.normalize_urls();
    }
}

/// A gallery item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Reference<Asset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// ISO date supplied by the photographer; drives gallery order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Reference<Entry<Category>>>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContentType for Photo {
    const ID: &'static str = "photo";
}

impl NormalizeUrls for Photo {
    fn normalize_urls(&mut self) {
        self.image.normalize_urls();
        self.category.normalize_urls();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<Reference<Asset>>,
}

impl ContentType for Category {
    const ID: &'static str = "category";
}

impl NormalizeUrls for Category {
    fn normalize_urls(&mut self) {
        self.cover_photo.normalize_urls();
    }
}

/// The photographer profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<Reference<Asset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ContentType for Author {
    const ID: &'static str = "author";
}

impl NormalizeUrls for Author {
    fn normalize_urls(&mut self) {
        self.profile_image.normalize_urls();
    }
}

/// A national or state park featured on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Park {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<Reference<Asset>>,
    #[serde(default)]
    pub gallery: Vec<Reference<Asset>>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
}

impl ContentType for Park {
    const ID: &'static str = "park";
}

impl NormalizeUrls for Park {
    fn normalize_urls(&mut self) {
        self.cover_photo.normalize_urls();
        self.gallery.normalize_urls();
    }
}

/// A bookable offering (workshops, prints, tours).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Reference<Asset>>,
}

impl ContentType for Service {
    const ID: &'static str = "service";
}

impl NormalizeUrls for Service {
    fn normalize_urls(&mut self) {
        self.image.normalize_urls();
    }
}

/// Header banner for a page, keyed by `identifier` (e.g. `about`, `gallery`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBanner {
    pub identifier: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<Reference<Asset>>,
}

impl ContentType for PageBanner {
    const ID: &'static str = "pageBanner";
}

impl NormalizeUrls for PageBanner {
    fn normalize_urls(&mut self) {
        self.background_image.normalize_urls();
    }
}
