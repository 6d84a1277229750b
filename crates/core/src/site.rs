//! robots.txt and sitemap.xml builders.

use url::Url;

/// Paths crawlers must not index.
pub const DISALLOWED_PATHS: &[&str] = &["/setup/", "/debug/", "/api/", "/test-email/"];

/// Top-level pages, relative to the site root.
pub const STATIC_PAGES: &[&str] = &["", "about", "gallery", "blog", "parks", "services", "contact"];

/// Dynamic section paths listed in the sitemap.
#[derive(Debug, Clone, Default)]
pub struct SitemapSlugs {
    pub blog: Vec<String>,
    pub parks: Vec<String>,
    pub services: Vec<String>,
}

fn base(site_url: &str) -> &str {
    site_url.trim_end_matches('/')
}

pub fn robots_txt(site_url: &str) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\n");
    for path in DISALLOWED_PATHS {
        out.push_str(&format!("Disallow: {path}\n"));
    }
    out.push_str(&format!("\nSitemap: {}/sitemap.xml\n", base(site_url)));
    out
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `root` with `segments` appended as percent-encoded path segments.
fn page_url(root: &Url, segments: &[&str]) -> String {
    let mut url = root.clone();
    url.set_query(None);
    url.set_fragment(None);

    let segments: Vec<&str> = segments.iter().copied().filter(|segment| !segment.is_empty()).collect();
    if !segments.is_empty()
        && let Ok(mut path) = url.path_segments_mut()
    {
        path.pop_if_empty().extend(segments);
    }
    url.to_string()
}

/// Absolute URLs for every page the site serves.
///
/// Slugs are percent-encoded as single path segments. An unparseable
/// `site_url` yields no URLs.
pub fn sitemap_urls(site_url: &str, slugs: &SitemapSlugs) -> Vec<String> {
    let root = match Url::parse(site_url) {
        Ok(root) => root,
        Err(err) => {
            tracing::warn!(site_url, error = %err, "site url is not absolute, sitemap left empty");
            return Vec::new();
        }
    };

    let statics = STATIC_PAGES.iter().map(|page| page_url(&root, &[*page]));
    let dynamic = [("blog", &slugs.blog), ("parks", &slugs.parks), ("services", &slugs.services)]
        .into_iter()
        .flat_map(|(section, list)| list.iter().map(move |slug| (section, slug)))
        .map(|(section, slug)| page_url(&root, &[section, slug.as_str()]));

    statics.chain(dynamic).collect()
}

pub fn sitemap_xml(site_url: &str, slugs: &SitemapSlugs) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for url in sitemap_urls(site_url, slugs) {
        out.push_str(&format!("  <url><loc>{}</loc></url>\n", escape_xml(&url)));
    }
    out.push_str("</urlset>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_disallows_internal_paths() {
        let robots = robots_txt("https://techlens.photo/");
        for path in ["/setup/", "/debug/", "/api/", "/test-email/"] {
            assert!(robots.contains(&format!("Disallow: {path}\n")), "missing {path}");
        }
        assert!(robots.contains("Sitemap: https://techlens.photo/sitemap.xml"));
    }

    #[test]
    fn test_sitemap_includes_static_and_dynamic_pages() {
        let slugs = SitemapSlugs {
            blog: vec!["first-light".into()],
            parks: vec!["yellowstone".into()],
            services: vec!["print-sales".into()],
        };
        let urls = sitemap_urls("https://techlens.photo", &slugs);
        assert_eq!(urls[0], "https://techlens.photo/");
        assert!(urls.contains(&"https://techlens.photo/gallery".to_string()));
        assert!(urls.contains(&"https://techlens.photo/blog/first-light".to_string()));
        assert!(urls.contains(&"https://techlens.photo/parks/yellowstone".to_string()));
        assert!(urls.contains(&"https://techlens.photo/services/print-sales".to_string()));
        assert_eq!(urls.len(), STATIC_PAGES.len() + 3);
    }

    #[test]
    fn test_sitemap_encodes_slugs() {
        let slugs = SitemapSlugs {
            blog: vec!["owls at dusk".into(), "part#2".into()],
            parks: vec!["a/b".into()],
            ..Default::default()
        };
        let urls = sitemap_urls("https://techlens.photo/", &slugs);
        assert!(urls.contains(&"https://techlens.photo/blog/owls%20at%20dusk".to_string()));
        assert!(urls.contains(&"https://techlens.photo/blog/part%232".to_string()));
        assert!(urls.contains(&"https://techlens.photo/parks/a%2Fb".to_string()));
    }

    #[test]
    fn test_sitemap_keeps_base_path() {
        let urls = sitemap_urls("https://example.com/portfolio/", &SitemapSlugs::default());
        assert_eq!(urls[0], "https://example.com/portfolio/");
        assert!(urls.contains(&"https://example.com/portfolio/about".to_string()));
        assert!(sitemap_urls("not a url", &SitemapSlugs::default()).is_empty());
    }

    #[test]
    fn test_sitemap_xml_escapes() {
        let slugs = SitemapSlugs { blog: vec!["a&b".into()], ..Default::default() };
        let xml = sitemap_xml("https://techlens.photo", &slugs);
        assert!(xml.contains("<loc>https://techlens.photo/blog/a&amp;b</loc>"));
        assert!(xml.starts_with("<?xml"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
