//! Page titles, descriptions and canonical URLs

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{Cluster, Page, Pillar, Post};
use crate::error::RecordKind;
use crate::helpers;

/// Head metadata for one page
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub image: Option<String>,
    /// `website` or `article`
    pub og_type: &'static str,
    pub noindex: bool,
}

impl PageMeta {
    fn new(config: &SiteConfig, title: String, description: String, path: &str) -> Self {
        Self {
            title,
            description,
            canonical: helpers::full_url_for(config, path),
            image: config
                .seo
                .image
                .as_deref()
                .map(|i| helpers::absolute_asset_url(config, i)),
            og_type: "website",
            noindex: false,
        }
    }
}

pub fn home(config: &SiteConfig) -> PageMeta {
    PageMeta::new(config, config.tagline.clone(), config.description.clone(), "/")
}

pub fn blog_index(config: &SiteConfig) -> PageMeta {
    PageMeta::new(
        config,
        format!("All Articles | {}", config.brand),
        format!("Insights, guides, and tips from {}", config.brand),
        "/blog",
    )
}

pub fn post(config: &SiteConfig, post: &Post) -> PageMeta {
    let mut meta = PageMeta::new(
        config,
        format!("{} | {}", post.title, config.title),
        post.description().unwrap_or_default().to_string(),
        &helpers::post_path(&post.slug),
    );
    if let Some(image) = &post.featured_image {
        meta.image = Some(helpers::absolute_asset_url(config, image));
    }
    meta.og_type = "article";
    meta
}

pub fn topic(config: &SiteConfig, pillar: &Pillar) -> PageMeta {
    let name = pillar.seo_title.as_deref().unwrap_or(&pillar.name);
    let description = pillar
        .seo_description
        .clone()
        .unwrap_or_else(|| pillar.description.clone());
    let mut meta = PageMeta::new(
        config,
        format!("{} | {}", name, config.brand),
        description,
        &helpers::topic_path(&pillar.slug),
    );
    if let Some(image) = &pillar.hero_image {
        meta.image = Some(helpers::absolute_asset_url(config, image));
    }
    meta
}

pub fn category(config: &SiteConfig, cluster: &Cluster) -> PageMeta {
    PageMeta::new(
        config,
        format!("{} Articles | {}", cluster.name, config.brand),
        format!(
            "Browse all {} articles and guides on {}",
            cluster.name.to_lowercase(),
            config.brand
        ),
        &helpers::category_path(&cluster.slug),
    )
}

pub fn page(config: &SiteConfig, page: &Page) -> PageMeta {
    let description = page
        .description
        .clone()
        .unwrap_or_else(|| format!("{} for {}.", page.title, config.title));
    let mut meta = PageMeta::new(
        config,
        format!("{} - {}", page.title, config.title),
        description,
        &page.path(),
    );
    meta.noindex = page.noindex;
    meta
}

pub fn not_found(config: &SiteConfig, kind: RecordKind) -> PageMeta {
    let mut meta = PageMeta::new(
        config,
        kind.not_found_title().to_string(),
        String::new(),
        "/404.html",
    );
    meta.noindex = true;
    meta
}

pub fn redirect(config: &SiteConfig, short_code: &str, destination: &str) -> PageMeta {
    let mut meta = PageMeta::new(
        config,
        format!("Redirecting | {}", config.brand),
        String::new(),
        &helpers::redirect_path(short_code),
    );
    meta.canonical = destination.to_string();
    meta.noindex = true;
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn pillar() -> Pillar {
        Pillar {
            id: "p1".to_string(),
            slug: "reseller-hardware".to_string(),
            name: "Reseller Hardware".to_string(),
            description: "Gear that pays for itself".to_string(),
            hero_image: None,
            seo_title: None,
            seo_description: None,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn test_post_title_uses_site_title() {
        let config = SiteConfig::default();
        let mut p = Post::new("1", "best-scales", "Best Shipping Scales");
        p.excerpt = Some("Excerpt".to_string());
        let meta = post(&config, &p);
        assert_eq!(
            meta.title,
            "Best Shipping Scales | Reselling Tips, Tools and Techniques For The Modern Reseller"
        );
        assert_eq!(meta.description, "Excerpt");
        assert_eq!(meta.canonical, "https://resaleedge.com/blog/best-scales");
        assert_eq!(meta.og_type, "article");

        p.meta_description = Some("Meta".to_string());
        assert_eq!(post(&config, &p).description, "Meta");
    }

    #[test]
    fn test_topic_title_prefers_seo_title() {
        let config = SiteConfig::default();
        let mut pl = pillar();
        assert_eq!(topic(&config, &pl).title, "Reseller Hardware | Resale Edge");
        assert_eq!(topic(&config, &pl).description, "Gear that pays for itself");

        pl.seo_title = Some("Best Reseller Hardware".to_string());
        pl.seo_description = Some("SEO".to_string());
        let meta = topic(&config, &pl);
        assert_eq!(meta.title, "Best Reseller Hardware | Resale Edge");
        assert_eq!(meta.description, "SEO");
    }

    #[test]
    fn test_category_title() {
        let config = SiteConfig::default();
        let cluster = Cluster {
            id: "c1".to_string(),
            slug: "photo-setups".to_string(),
            name: "Photo Setups".to_string(),
            description: String::new(),
            pillar_id: None,
            extra: HashMap::new(),
        };
        let meta = category(&config, &cluster);
        assert_eq!(meta.title, "Photo Setups Articles | Resale Edge");
        assert_eq!(
            meta.description,
            "Browse all photo setups articles and guides on Resale Edge"
        );
    }

    #[test]
    fn test_not_found_titles() {
        let config = SiteConfig::default();
        assert_eq!(not_found(&config, RecordKind::Post).title, "Post Not Found");
        assert_eq!(not_found(&config, RecordKind::Pillar).title, "Topic Not Found");
        assert_eq!(
            not_found(&config, RecordKind::Cluster).title,
            "Category Not Found"
        );
        assert!(not_found(&config, RecordKind::Page).noindex);
    }
}
