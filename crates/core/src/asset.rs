//! Asset URL normalization.
//!
//! Contentful serves asset URLs protocol-relative (`//images.ctfassets.net/...`).
//! Everything handed to a page must be absolute.

/// Make a protocol-relative URL absolute with `https:`.
///
/// Absolute and relative-path URLs are returned unchanged, so applying the
/// function twice gives the same result as applying it once.
pub fn normalize_asset_url(url: &str) -> String {
    match url.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

/// Rewrite every asset URL reachable from `self` in place.
pub trait NormalizeUrls {
    fn normalize_urls(&mut self);
}

impl<T: NormalizeUrls> NormalizeUrls for Option<T> {
    fn normalize_urls(&mut self) {
        if let Some(inner) = self {
            inner.normalize_urls();
        }
    }
}

impl<T: NormalizeUrls> NormalizeUrls for Vec<T> {
    fn normalize_urls(&mut self) {
        for item in self {
            item.normalize_urls();
        }
    }
}

impl<T: NormalizeUrls> NormalizeUrls for Box<T> {
    fn normalize_urls(&mut self) {
        self.as_mut().normalize_urls();
    }
}
