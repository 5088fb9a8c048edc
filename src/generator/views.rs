//! Serializable data handed to the templates

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{LeadMagnet, Page, Post, Resolver};
use crate::helpers;

/// Site-wide values available to every template as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteView {
    pub title: String,
    pub brand: String,
    pub tagline: String,
    pub description: String,
    pub url: String,
    /// Home page path including `root`
    pub home: String,
    pub language: String,
    pub year: String,
    pub nav: Vec<LinkView>,
    pub legal: Vec<LinkView>,
    pub lead_capture: FormView,
}

impl SiteView {
    pub fn new(config: &SiteConfig, pages: &[Page], year: String) -> Self {
        Self {
            title: config.title.clone(),
            brand: config.brand.clone(),
            tagline: config.tagline.clone(),
            description: config.description.clone(),
            url: config.url.trim_end_matches('/').to_string(),
            home: helpers::url_for(config, "/"),
            language: config.language.clone(),
            year,
            nav: vec![
                LinkView::new("Home", helpers::url_for(config, "/")),
                LinkView::new("Blog", helpers::url_for(config, "/blog")),
            ],
            legal: pages
                .iter()
                .map(|p| LinkView::new(&p.title, helpers::url_for(config, &p.path())))
                .collect(),
            lead_capture: FormView {
                action: config.lead_capture.action.clone(),
                method: config.lead_capture.method.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub action: String,
    pub method: String,
}

/// A labelled link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub label: String,
    pub href: String,
}

impl LinkView {
    pub fn new(label: &str, href: String) -> Self {
        Self {
            label: label.to_string(),
            href,
        }
    }
}

/// One breadcrumb level; the current page has no link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
}

impl Crumb {
    pub fn link(label: &str, href: String) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href),
        }
    }

    pub fn current(label: &str) -> Self {
        Self {
            label: label.to_string(),
            href: None,
        }
    }
}

/// Post summary used in card grids
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub path: String,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    /// Cluster name, falling back to the legacy category
    pub label: Option<String>,
    pub badge: String,
    pub date: Option<String>,
    pub complete_guide: bool,
}

impl PostCard {
    pub fn new(config: &SiteConfig, resolver: &Resolver<'_>, post: &Post) -> Self {
        let label = post
            .cluster_id
            .as_deref()
            .and_then(|id| resolver.cluster_by_id(id))
            .map(|c| c.name.clone())
            .or_else(|| post.category.clone());

        Self {
            title: post.title.clone(),
            path: helpers::url_for(config, &helpers::post_path(&post.slug)),
            excerpt: post.excerpt.clone(),
            image: post.featured_image.clone(),
            label,
            badge: post.badge(),
            date: post.published_at().map(|d| helpers::short_date(&d)),
            complete_guide: post.is_pillar_post,
        }
    }

    pub fn list(config: &SiteConfig, resolver: &Resolver<'_>, posts: &[&Post]) -> Vec<Self> {
        posts
            .iter()
            .map(|p| Self::new(config, resolver, p))
            .collect()
    }
}

/// Lead magnet capture block
#[derive(Debug, Clone, Serialize)]
pub struct LeadMagnetView {
    pub id: String,
    pub headline: String,
    pub subheadline: Option<String>,
    pub benefits: Vec<String>,
    pub cta_text: String,
}

impl From<&LeadMagnet> for LeadMagnetView {
    fn from(magnet: &LeadMagnet) -> Self {
        Self {
            id: magnet.id.clone(),
            headline: magnet
                .headline
                .clone()
                .unwrap_or_else(|| magnet.name.clone()),
            subheadline: magnet.subheadline.clone(),
            benefits: magnet.benefits.clone(),
            cta_text: magnet
                .cta_text
                .clone()
                .unwrap_or_else(|| "Get Free Access".to_string()),
        }
    }
}

/// A cluster block on a topic page
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub name: String,
    pub description: String,
    pub path: String,
    pub cluster_post: Option<PostCard>,
    pub blog_posts: Vec<PostCard>,
}
