//! sitemap.xml

use crate::config::SiteConfig;
use crate::content::{ContentStore, Page};
use crate::helpers;

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: f32,
}

/// Home, blog index, pages, posts and topics, in that order.
///
/// Posts carry their publish date; everything else is stamped `now`.
pub fn entries(
    config: &SiteConfig,
    store: &ContentStore,
    pages: &[Page],
    now: &str,
) -> Vec<SitemapEntry> {
    let entry = |path: &str, lastmod: String, changefreq: &'static str, priority: f32| {
        SitemapEntry {
            loc: helpers::full_url_for(config, path),
            lastmod,
            changefreq,
            priority,
        }
    };

    let mut entries = vec![
        entry("/", now.to_string(), "daily", 1.0),
        entry("/blog", now.to_string(), "daily", 0.9),
    ];

    entries.extend(
        pages
            .iter()
            .filter(|p| !p.noindex)
            .map(|p| entry(&p.path(), now.to_string(), "monthly", 0.3)),
    );

    entries.extend(store.posts.iter().map(|post| {
        let lastmod = post
            .published_at()
            .map(|d| helpers::date_xml(&d))
            .unwrap_or_else(|| now.to_string());
        let priority = if post.is_featured_post { 0.9 } else { 0.7 };
        entry(&helpers::post_path(&post.slug), lastmod, "weekly", priority)
    }));

    entries.extend(
        store
            .pillars
            .iter()
            .map(|p| entry(&helpers::topic_path(&p.slug), now.to_string(), "weekly", 0.8)),
    );

    entries
}

pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", helpers::escape_xml(&entry.loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Pillar, Post};
    use std::collections::HashMap;

    const NOW: &str = "2025-06-01T12:00:00+00:00";

    fn store() -> ContentStore {
        let mut store = ContentStore::default();
        let mut featured = Post::new("1", "complete-guide", "Complete Guide");
        featured.is_featured_post = true;
        featured.publish_date = Some("2024-11-28".to_string());
        store.posts.push(featured);
        store.posts.push(Post::new("2", "undated", "Undated"));
        store.pillars.push(Pillar {
            id: "p1".to_string(),
            slug: "hardware".to_string(),
            name: "Hardware".to_string(),
            description: String::new(),
            hero_image: None,
            seo_title: None,
            seo_description: None,
            extra: HashMap::new(),
        });
        store
    }

    fn page(slug: &str, noindex: bool) -> Page {
        Page {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: None,
            updated: None,
            noindex,
            content: String::new(),
        }
    }

    #[test]
    fn test_entries() {
        let config = SiteConfig::default();
        let pages = vec![page("privacy", false), page("thank-you", true)];
        let entries = entries(&config, &store(), &pages, NOW);

        let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://resaleedge.com/",
                "https://resaleedge.com/blog",
                "https://resaleedge.com/privacy",
                "https://resaleedge.com/blog/complete-guide",
                "https://resaleedge.com/blog/undated",
                "https://resaleedge.com/topics/hardware",
            ]
        );

        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[2].changefreq, "monthly");
        assert_eq!(entries[3].priority, 0.9);
        assert_eq!(entries[3].lastmod, "2024-11-28T00:00:00+00:00");
        assert_eq!(entries[4].priority, 0.7);
        assert_eq!(entries[4].lastmod, NOW);
        assert_eq!(entries[5].priority, 0.8);
    }

    #[test]
    fn test_render() {
        let config = SiteConfig::default();
        let xml = render(&entries(&config, &store(), &[], NOW));
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://resaleedge.com/blog</loc>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert_eq!(xml.matches("<url>").count(), 5);
    }
}
