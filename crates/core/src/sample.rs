//! Built-in content served when the CMS cannot be reached or is not
//! provisioned yet.
//!
//! Shapes match what the Delivery API returns after link resolution, so
//! pages cannot tell sample entries from live ones.

use crate::model::{Asset, Category, Entry, Homepage, Photo, Reference, Sys};
use chrono::{DateTime, Utc};

const SAMPLE_IMAGE_BASE: &str = "https://images.ctfassets.net/techlens-sample";

fn sys(id: &str, created: &str) -> Sys {
    Sys {
        id: id.to_string(),
        kind: Some("Entry".into()),
        created_at: DateTime::parse_from_rfc3339(created).ok().map(|d| d.with_timezone(&Utc)),
        updated_at: None,
    }
}

fn image(id: &str, title: &str, file: &str) -> Reference<Asset> {
    Reference::Resolved(Asset::image(id, title, &format!("{SAMPLE_IMAGE_BASE}/{file}"), 2400, 1600))
}

struct CategorySeed {
    id: &'static str,
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    cover: &'static str,
}

const CATEGORY_SEEDS: &[CategorySeed] = &[
    CategorySeed {
        id: "sample-category-mammals",
        name: "Mammals",
        slug: "mammals",
        description: "Bison, elk, bears and the rest of the big-shouldered residents of the parks.",
        cover: "mammals-cover.jpg",
    },
    CategorySeed {
        id: "sample-category-birds",
        name: "Birds",
        slug: "birds",
        description: "Raptors, waders and songbirds caught between perches.",
        cover: "birds-cover.jpg",
    },
    CategorySeed {
        id: "sample-category-landscapes",
        name: "Landscapes",
        slug: "landscapes",
        description: "Wide frames of the places the animals call home.",
        cover: "landscapes-cover.jpg",
    },
    CategorySeed {
        id: "sample-category-night-sky",
        name: "Night Sky",
        slug: "night-sky",
        description: "Milky Way arcs and star trails over dark-sky parks.",
        cover: "night-sky-cover.jpg",
    },
];

/// Sample gallery categories.
pub fn categories() -> Vec<Entry<Category>> {
    CATEGORY_SEEDS
        .iter()
        .map(|seed| Entry {
            sys: sys(seed.id, "2024-01-01T00:00:00Z"),
            fields: Category {
                name: seed.name.to_string(),
                slug: seed.slug.to_string(),
                description: Some(seed.description.to_string()),
                cover_photo: Some(image(&format!("{}-cover", seed.id), seed.name, seed.cover)),
            },
        })
        .collect()
}

fn category(slug: &str) -> Option<Reference<Entry<Category>>> {
    categories().into_iter().find(|c| c.fields.slug == slug).map(Reference::Resolved)
}

struct PhotoSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    location: &'static str,
    date_taken: &'static str,
    category: &'static str,
    file: &'static str,
    featured: bool,
}

const PHOTO_SEEDS: &[PhotoSeed] = &[
    PhotoSeed {
        id: "sample-photo-bison-fog",
        title: "Bison in Morning Fog",
        description: "A lone bull crossing the Lamar Valley before sunrise.",
        location: "Yellowstone National Park",
        date_taken: "2024-09-14",
        category: "mammals",
        file: "bison-fog.jpg",
        featured: true,
    },
    PhotoSeed {
        id: "sample-photo-osprey",
        title: "Osprey Strike",
        description: "The moment of contact above the Snake River.",
        location: "Grand Teton National Park",
        date_taken: "2024-07-02",
        category: "birds",
        file: "osprey-strike.jpg",
        featured: true,
    },
    PhotoSeed {
        id: "sample-photo-milky-way",
        title: "Milky Way over Delicate Arch",
        description: "A 20-second exposure under a new moon.",
        location: "Arches National Park",
        date_taken: "2024-06-08",
        category: "night-sky",
        file: "milky-way-arch.jpg",
        featured: true,
    },
    PhotoSeed {
        id: "sample-photo-elk-bugle",
        title: "Elk Bugling at Dusk",
        description: "Rut season in the meadows of Moraine Park.",
        location: "Rocky Mountain National Park",
        date_taken: "2023-10-01",
        category: "mammals",
        file: "elk-bugle.jpg",
        featured: false,
    },
    PhotoSeed {
        id: "sample-photo-heron",
        title: "Great Blue Heron",
        description: "Still water, still bird, one patient hour.",
        location: "Everglades National Park",
        date_taken: "2023-02-19",
        category: "birds",
        file: "great-blue-heron.jpg",
        featured: false,
    },
    PhotoSeed {
        id: "sample-photo-half-dome",
        title: "Half Dome at Alpenglow",
        description: "Last light on granite from Glacier Point.",
        location: "Yosemite National Park",
        date_taken: "2022-08-27",
        category: "landscapes",
        file: "half-dome-alpenglow.jpg",
        featured: false,
    },
];

/// Sample gallery items, newest first.
pub fn photos() -> Vec<Entry<Photo>> {
    PHOTO_SEEDS
        .iter()
        .map(|seed| Entry {
            sys: sys(seed.id, &format!("{}T12:00:00Z", seed.date_taken)),
            fields: Photo {
                title: seed.title.to_string(),
                slug: Some(seed.id.trim_start_matches("sample-photo-").to_string()),
                description: Some(seed.description.to_string()),
                image: Some(image(&format!("{}-image", seed.id), seed.title, seed.file)),
                location: Some(seed.location.to_string()),
                date_taken: Some(seed.date_taken.to_string()),
                camera: None,
                category: category(seed.category),
                featured: seed.featured,
                tags: vec![seed.category.to_string()],
            },
        })
        .collect()
}

/// Sample homepage.
pub fn homepage() -> Entry<Homepage> {
    let featured_photos = photos()
        .into_iter()
        .filter(|photo| photo.fields.featured)
        .map(Reference::Resolved)
        .collect();

    Entry {
        sys: sys("sample-homepage", "2024-01-01T00:00:00Z"),
        fields: Homepage {
            hero_title: "Capturing Nature Through a Tech Lens".to_string(),
            hero_subtitle: Some(
                "Wildlife and landscape photography from America's national parks, by a software engineer who \
                 never leaves the long lens at home."
                    .to_string(),
            ),
            hero_image: Some(image("sample-homepage-hero", "Bison in Morning Fog", "hero-bison.jpg")),
            intro_title: Some("Patience, light and a little code".to_string()),
            intro_text: Some(
                "Every frame here started with an early alarm and a long wait. Browse the gallery, read the \
                 field notes on the blog, or get in touch about prints and guided workshops."
                    .to_string(),
            ),
            featured_photos,
            cta_text: Some("Explore the Gallery".to_string()),
            cta_link: Some("/gallery".to_string()),
        },
    }
}
