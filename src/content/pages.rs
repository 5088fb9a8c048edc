//! Standalone pages (privacy, terms, affiliate disclosure) loaded from
//! markdown files in the pages directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer};

/// A standalone page rendered at `/{slug}`
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub updated: Option<String>,
    pub noindex: bool,
    /// Rendered HTML body
    pub content: String,
}

impl Page {
    pub fn path(&self) -> String {
        format!("/{}", self.slug)
    }
}

/// First path segments owned by generated routes; a page may not take them
pub const RESERVED_SLUGS: &[&str] = &["blog", "topics", "category", "go", "404", "sitemap"];

pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}

/// Load all markdown pages from `pages_dir`, sorted by slug.
///
/// A page that fails to parse is logged and skipped.
pub fn load_pages(pages_dir: &Path, renderer: &MarkdownRenderer) -> Vec<Page> {
    if !pages_dir.exists() {
        return Vec::new();
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(pages_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !super::is_markdown_file(path) {
            continue;
        }
        match load_page(path, renderer) {
            Ok(page) => pages.push(page),
            Err(e) => tracing::warn!("Failed to load page {:?}: {}", path, e),
        }
    }

    pages.sort_by(|a, b| a.slug.cmp(&b.slug));
    pages
}

fn load_page(path: &Path, renderer: &MarkdownRenderer) -> Result<Page> {
    let raw = fs::read_to_string(path)?;
    let (fm, body) = FrontMatter::parse(&raw)?;

    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(slug::slugify)
        .unwrap_or_default();
    if slug.is_empty() {
        anyhow::bail!("cannot derive a slug from {:?}", path);
    }

    let title = fm.title.unwrap_or_else(|| title_from_slug(&slug));

    Ok(Page {
        slug,
        title,
        description: fm.description,
        updated: fm.updated,
        noindex: fm.noindex,
        content: renderer.render(body),
    })
}

/// "affiliate-disclosure" → "Affiliate Disclosure"
fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_pages() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("terms.md"),
            "---\ntitle: Terms of Service\nupdated: December 30, 2025\n---\n\n## Acceptance of Terms\n",
        )
        .unwrap();
        fs::write(tmp.path().join("affiliate-disclosure.md"), "We earn commissions.").unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let pages = load_pages(tmp.path(), &MarkdownRenderer::new());
        assert_eq!(pages.len(), 2);

        assert_eq!(pages[0].slug, "affiliate-disclosure");
        assert_eq!(pages[0].title, "Affiliate Disclosure");
        assert_eq!(pages[0].path(), "/affiliate-disclosure");

        assert_eq!(pages[1].title, "Terms of Service");
        assert_eq!(pages[1].updated.as_deref(), Some("December 30, 2025"));
        assert!(pages[1].content.contains("<h2>Acceptance of Terms</h2>"));
    }

    #[test]
    fn test_bad_page_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("privacy.md"), "---\ntitle: [oops\n---\nBody").unwrap();
        fs::write(tmp.path().join("terms.md"), "Body").unwrap();
        let pages = load_pages(tmp.path(), &MarkdownRenderer::new());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].slug, "terms");
    }

    #[test]
    fn test_reserved_slugs() {
        assert!(is_reserved_slug("blog"));
        assert!(is_reserved_slug("category"));
        assert!(!is_reserved_slug("privacy"));
        assert!(!is_reserved_slug("blog-policy"));
    }

    #[test]
    fn test_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(load_pages(&tmp.path().join("nope"), &MarkdownRenderer::new()).is_empty());
    }
}
