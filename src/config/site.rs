//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    /// Header title, also used as the suffix of post titles
    pub title: String,
    /// Short brand name used in topic/category titles
    pub brand: String,
    pub tagline: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub data_dir: String,
    pub content_dir: String,
    pub pages_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    #[serde(default)]
    pub collections: CollectionsConfig,
    #[serde(default)]
    pub home: HomeConfig,
    #[serde(default)]
    pub seo: SeoConfig,
    #[serde(default)]
    pub lead_capture: LeadCaptureConfig,
    #[serde(default)]
    pub redirects: RedirectConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Reselling Tips, Tools and Techniques For The Modern Reseller".to_string(),
            brand: "Resale Edge".to_string(),
            tagline: "ResaleEdge | Reseller Hardware, Software & Systems That Scale".to_string(),
            description: "Build your reselling business right. Reviews of software tools, photo setups, shipping equipment, and processes and workflow for the modern reseller.".to_string(),
            author: "Resale Edge".to_string(),
            language: "en".to_string(),

            url: "https://resaleedge.com".to_string(),
            root: "/".to_string(),

            data_dir: "data".to_string(),
            content_dir: "content".to_string(),
            pages_dir: "pages".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            collections: CollectionsConfig::default(),
            home: HomeConfig::default(),
            seo: SeoConfig::default(),
            lead_capture: LeadCaptureConfig::default(),
            redirects: RedirectConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }
}

/// Collection file names, relative to `data_dir`.
///
/// Optional collections are `Option`s: `null` in YAML means the site has no
/// such collection and it loads as empty. A named file must exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    pub posts: String,
    pub pillars: String,
    pub clusters: Option<String>,
    pub affiliate_links: Option<String>,
    pub lead_magnets: Option<String>,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            posts: "posts.json".to_string(),
            pillars: "pillars.json".to_string(),
            clusters: Some("categories.json".to_string()),
            affiliate_links: Some("affiliate-links.json".to_string()),
            lead_magnets: Some("lead-magnets.json".to_string()),
        }
    }
}

/// Home page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Number of leading posts shown as featured
    pub featured_count: usize,
    /// Posts after the featured ones, up to this index, are "latest"
    pub recent_count: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            featured_count: 3,
            recent_count: 6,
        }
    }
}

/// SEO configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    /// Logo path or absolute URL for the Organization schema
    pub logo: Option<String>,
    /// Default social image
    pub image: Option<String>,
}

/// Lead capture form target
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadCaptureConfig {
    pub action: String,
    pub method: String,
}

impl Default for LeadCaptureConfig {
    fn default() -> Self {
        Self {
            action: "#".to_string(),
            method: "post".to_string(),
        }
    }
}

/// Affiliate redirect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// HTTP status written to the `_redirects` table
    pub status: u16,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self { status: 302 }
    }
}

/// Development server defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.brand, "Resale Edge");
        assert_eq!(config.home.featured_count, 3);
        assert_eq!(config.home.recent_count, 6);
        assert_eq!(
            config.collections.clusters.as_deref(),
            Some("categories.json")
        );
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
brand: Flip Lab
url: https://fliplab.example
home:
  featured_count: 2
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.brand, "Flip Lab");
        assert_eq!(config.home.featured_count, 2);
        assert_eq!(config.home.recent_count, 6);
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_disable_optional_collection() {
        let yaml = r#"
collections:
  clusters: null
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.collections.clusters.is_none());
        assert_eq!(config.collections.posts, "posts.json");
        assert_eq!(
            config.collections.lead_magnets.as_deref(),
            Some("lead-magnets.json")
        );
    }
}
