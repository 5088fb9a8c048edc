//! Content records: posts, pillars, clusters, affiliate links and lead magnets

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position of a post in the pillar → cluster → blog hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierType {
    Pillar,
    Cluster,
    Blog,
}

/// How a post body is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    /// The lightweight header/bold/italic/link subset
    #[default]
    Lite,
    Markdown,
}

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,

    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,

    /// Inline body, or the contents of `content_file` once loaded
    #[serde(default)]
    pub content: String,
    /// Body file relative to the content directory
    #[serde(default)]
    pub content_file: Option<String>,
    #[serde(skip)]
    pub markup: MarkupKind,

    /// Free-text category from before clusters existed
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub pillar_id: Option<String>,
    #[serde(default)]
    pub cluster_id: Option<String>,
    #[serde(default)]
    pub tier_type: Option<TierType>,
    /// Article format code such as `buying_guide`
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,

    #[serde(default)]
    pub is_featured_post: bool,
    #[serde(default)]
    pub is_pillar_post: bool,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Post {
    /// Create a post with the required fields only
    pub fn new(id: &str, slug: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            excerpt: None,
            meta_description: None,
            content: String::new(),
            content_file: None,
            markup: MarkupKind::Lite,
            category: None,
            pillar_id: None,
            cluster_id: None,
            tier_type: None,
            format: None,
            tags: Vec::new(),
            author_name: None,
            publish_date: None,
            featured_image: None,
            is_featured_post: false,
            is_pillar_post: false,
            extra: HashMap::new(),
        }
    }

    /// Parse `publish_date`, accepting RFC 3339 or a bare `YYYY-MM-DD`
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.publish_date.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt);
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        Some(midnight.and_utc().fixed_offset())
    }

    pub fn is_tier(&self, tier: TierType) -> bool {
        self.tier_type == Some(tier)
    }

    /// Blog-tier posts and untiered posts both count as leaf articles
    pub fn is_leaf(&self) -> bool {
        matches!(self.tier_type, None | Some(TierType::Blog))
    }

    /// Description used in page metadata
    pub fn description(&self) -> Option<&str> {
        self.meta_description
            .as_deref()
            .or(self.excerpt.as_deref())
    }

    /// Badge text shown on cards and the post header
    pub fn badge(&self) -> String {
        match self.tier_type {
            Some(TierType::Pillar) => "Pillar".to_string(),
            Some(TierType::Cluster) => "Cluster".to_string(),
            _ => format_label(self.format.as_deref()),
        }
    }
}

/// Human label for an article format code
pub fn format_label(format: Option<&str>) -> String {
    let Some(format) = format else {
        return "Article".to_string();
    };
    match format {
        "ultimate_guide" => "Ultimate Guide".to_string(),
        "buying_guide" => "Buying Guide".to_string(),
        "product_review" => "Product Review".to_string(),
        "comparison" => "Comparison".to_string(),
        "how_to" => "How-To".to_string(),
        "explainer" => "Explainer".to_string(),
        "listicle" => "Listicle".to_string(),
        "opinion" => "Opinion".to_string(),
        other => other
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" "),
    }
}

/// Top-level topic grouping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pillar {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Sub-topic grouping under a pillar, published as a category page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pillar_id: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A `/go/{shortCode}` redirect target
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLink {
    pub short_code: String,
    #[serde(default)]
    pub destination_url: String,
    #[serde(default)]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Downloadable incentive offered for an email address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadMagnet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub subheadline: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub cta_text: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_post() {
        let json = r#"{
            "id": "p1",
            "slug": "best-label-printers",
            "title": "Best Label Printers",
            "pillarId": "hw",
            "clusterId": "shipping",
            "tierType": "cluster",
            "format": "buying_guide",
            "isFeaturedPost": true,
            "readingTime": 7
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.pillar_id.as_deref(), Some("hw"));
        assert_eq!(post.tier_type, Some(TierType::Cluster));
        assert!(post.is_featured_post);
        assert!(!post.is_pillar_post);
        assert!(post.content.is_empty());
        assert_eq!(post.extra.get("readingTime"), Some(&serde_json::json!(7)));
    }

    #[test]
    fn test_published_at() {
        let mut post = Post::new("1", "a", "A");
        assert!(post.published_at().is_none());

        post.publish_date = Some("2025-03-04".to_string());
        assert_eq!(
            post.published_at().unwrap().to_rfc3339(),
            "2025-03-04T00:00:00+00:00"
        );

        post.publish_date = Some("2025-03-04T10:30:00-05:00".to_string());
        assert_eq!(post.published_at().unwrap().to_rfc3339(), "2025-03-04T10:30:00-05:00");

        post.publish_date = Some("last tuesday".to_string());
        assert!(post.published_at().is_none());
    }

    #[test]
    fn test_badge() {
        let mut post = Post::new("1", "a", "A");
        assert_eq!(post.badge(), "Article");

        post.format = Some("how_to".to_string());
        assert_eq!(post.badge(), "How-To");

        post.format = Some("deep_dive_case_study".to_string());
        assert_eq!(post.badge(), "Deep Dive Case Study");

        post.tier_type = Some(TierType::Pillar);
        assert_eq!(post.badge(), "Pillar");
    }

    #[test]
    fn test_description_prefers_meta() {
        let mut post = Post::new("1", "a", "A");
        post.excerpt = Some("Excerpt".to_string());
        assert_eq!(post.description(), Some("Excerpt"));
        post.meta_description = Some("Meta".to_string());
        assert_eq!(post.description(), Some("Meta"));
    }
}
