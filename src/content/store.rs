//! Content store - loads the JSON collections from the data directory

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::is_markdown_file;
use super::pages::{is_reserved_slug, load_pages};
use super::{AffiliateLink, Cluster, LeadMagnet, MarkdownRenderer, MarkupKind, Page, Pillar, Post};
use crate::config::CollectionsConfig;
use crate::error::{SiteError, SiteResult};
use crate::Site;

/// All site collections, loaded wholesale and kept in file order
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    pub posts: Vec<Post>,
    pub pillars: Vec<Pillar>,
    pub clusters: Vec<Cluster>,
    pub affiliate_links: Vec<AffiliateLink>,
    pub lead_magnets: Vec<LeadMagnet>,
    /// Standalone pages from the pages directory
    pub pages: Vec<Page>,
    /// Slugs of pages left out because a generated route owns them
    pub reserved_pages: Vec<String>,
}

impl ContentStore {
    /// Load every configured collection for a site
    pub fn load(site: &Site) -> SiteResult<Self> {
        let mut store = Self::load_collections(&site.data_dir, &site.config.collections)?;
        store.resolve_content_files(&site.content_dir)?;
        let (pages, reserved): (Vec<Page>, Vec<Page>) =
            load_pages(&site.pages_dir, &MarkdownRenderer::new())
                .into_iter()
                .partition(|p| !is_reserved_slug(&p.slug));
        for page in &reserved {
            tracing::warn!("Page {} would replace a generated route, skipping", page.slug);
        }
        store.pages = pages;
        store.reserved_pages = reserved.into_iter().map(|p| p.slug).collect();
        tracing::info!(
            "Loaded {} posts, {} pillars, {} clusters, {} affiliate links, {} lead magnets, {} pages",
            store.posts.len(),
            store.pillars.len(),
            store.clusters.len(),
            store.affiliate_links.len(),
            store.lead_magnets.len(),
            store.pages.len()
        );
        Ok(store)
    }

    /// Load the collection files named in `collections` from `data_dir`
    pub fn load_collections(data_dir: &Path, collections: &CollectionsConfig) -> SiteResult<Self> {
        Ok(Self {
            posts: load_required(data_dir, "posts", &collections.posts)?,
            pillars: load_required(data_dir, "pillars", &collections.pillars)?,
            clusters: load_optional(data_dir, "clusters", collections.clusters.as_deref())?,
            affiliate_links: load_optional(
                data_dir,
                "affiliate_links",
                collections.affiliate_links.as_deref(),
            )?,
            lead_magnets: load_optional(
                data_dir,
                "lead_magnets",
                collections.lead_magnets.as_deref(),
            )?,
            pages: Vec::new(),
            reserved_pages: Vec::new(),
        })
    }

    /// Read `contentFile` bodies into `content`
    pub fn resolve_content_files(&mut self, content_dir: &Path) -> SiteResult<()> {
        for post in &mut self.posts {
            let Some(file) = post.content_file.as_deref() else {
                continue;
            };
            let path = content_dir.join(file);
            post.content = fs::read_to_string(&path)
                .map_err(|source| SiteError::ContentFile {
                    path: path.clone(),
                    source,
                })?;
            post.markup = if is_markdown_file(&path) {
                MarkupKind::Markdown
            } else {
                MarkupKind::Lite
            };
            tracing::debug!("Loaded content for {} from {:?}", post.slug, path);
        }
        Ok(())
    }
}

fn load_required<T: DeserializeOwned>(
    data_dir: &Path,
    name: &'static str,
    file: &str,
) -> SiteResult<Vec<T>> {
    let path = data_dir.join(file);
    if !path.exists() {
        return Err(SiteError::MissingCollection { name, path });
    }
    read_collection(path)
}

fn load_optional<T: DeserializeOwned>(
    data_dir: &Path,
    name: &'static str,
    file: Option<&str>,
) -> SiteResult<Vec<T>> {
    match file {
        Some(file) => load_required(data_dir, name, file),
        None => {
            tracing::debug!("Collection {} disabled, using empty list", name);
            Ok(Vec::new())
        }
    }
}

fn read_collection<T: DeserializeOwned>(path: PathBuf) -> SiteResult<Vec<T>> {
    let content = fs::read_to_string(&path).map_err(|source| SiteError::ContentFile {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SiteError::InvalidCollection { path, source })
}
