//! schema.org JSON-LD blocks

use serde_json::{json, Value};

use super::views::Crumb;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers;

/// `Article` for a post page. Missing dates fall back to `now`.
pub fn article(config: &SiteConfig, post: &Post, now: &str) -> Value {
    let published = post
        .published_at()
        .map(|d| helpers::date_xml(&d))
        .unwrap_or_else(|| now.to_string());
    let site_url = config.url.trim_end_matches('/');

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": post.title,
        "description": post.excerpt.as_deref().unwrap_or(&post.title),
        "author": {
            "@type": "Person",
            "name": post.author_name.as_deref().unwrap_or(&config.brand),
        },
        "publisher": {
            "@type": "Organization",
            "name": config.brand,
            "url": site_url,
        },
        "datePublished": published,
        "dateModified": published,
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": helpers::full_url_for(config, &helpers::post_path(&post.slug)),
        },
    });

    if let Some(image) = &post.featured_image {
        schema["image"] = json!({
            "@type": "ImageObject",
            "url": helpers::absolute_asset_url(config, image),
        });
    }
    if !post.tags.is_empty() {
        schema["keywords"] = json!(post.tags.join(", "));
    }
    schema
}

/// `BreadcrumbList`; the unlinked current crumb points at `current_path`
pub fn breadcrumb_list(config: &SiteConfig, crumbs: &[Crumb], current_path: &str) -> Value {
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            let path = crumb.href.as_deref().unwrap_or(current_path);
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.label,
                "item": absolute(config, path),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

pub fn organization(config: &SiteConfig) -> Value {
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": config.brand,
        "url": config.url.trim_end_matches('/'),
    });
    if let Some(logo) = &config.seo.logo {
        schema["logo"] = json!({
            "@type": "ImageObject",
            "url": helpers::absolute_asset_url(config, logo),
        });
    }
    schema
}

/// `WebSite` with a sitelinks search box targeting the blog index
pub fn website(config: &SiteConfig) -> Value {
    let site_url = config.url.trim_end_matches('/');
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": config.brand,
        "url": site_url,
        "description": config.description,
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{}/blog?q={{search_term_string}}", site_url),
            "query-input": "required name=search_term_string",
        },
    })
}

/// Crumb hrefs already carry `root`; only the host is prepended
fn absolute(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), path)
}
