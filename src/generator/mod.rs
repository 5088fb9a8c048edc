//! Generator module - composes resolved content into static HTML pages

mod meta;
mod redirects;
mod schema;
pub mod sitemap;
mod views;

pub use meta::PageMeta;
pub use views::{Crumb, LeadMagnetView, LinkView, PostCard, SectionView, SiteView};

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::content::resolver::{CategoryView, PostContext, TopicView};
use crate::content::pages::is_reserved_slug;
use crate::content::{render_post_body, AffiliateLink, MarkdownRenderer, Page, Resolver};
use crate::content::{ContentStore, TierType};
use crate::error::RecordKind;
use crate::templates::TemplateRenderer;
use crate::{helpers, Site};

/// Sibling posts listed under a post
const RELATED_LIMIT: usize = 3;

/// Static site generator using Tera templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    now: DateTime<Utc>,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
            now: Utc::now(),
        })
    }

    /// Generate the entire site into the public directory
    pub fn generate(&self, store: &ContentStore) -> Result<()> {
        let resolver = Resolver::new(store);
        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_static_assets()?;

        self.write_route("/", &self.render_home(&resolver)?)?;
        self.write_route("/blog", &self.render_blog_index(&resolver)?)?;

        let mut seen = HashSet::new();
        for post in &store.posts {
            if !publishable(RecordKind::Post, &post.slug) {
                continue;
            }
            if !seen.insert(post.slug.as_str()) {
                tracing::warn!("Duplicate post slug {}, keeping the first", post.slug);
                continue;
            }
            let context = resolver.post_context(&post.slug)?;
            let html = self.render_post(&resolver, &context)?;
            self.write_route(&helpers::post_path(&post.slug), &html)?;
        }

        let mut seen = HashSet::new();
        for pillar in &store.pillars {
            if !publishable(RecordKind::Pillar, &pillar.slug) || !seen.insert(pillar.slug.as_str()) {
                continue;
            }
            let topic = resolver.topic(&pillar.slug)?;
            let html = self.render_topic(&resolver, &topic)?;
            self.write_route(&helpers::topic_path(&pillar.slug), &html)?;
        }

        let mut seen = HashSet::new();
        for cluster in &store.clusters {
            if !publishable(RecordKind::Cluster, &cluster.slug) || !seen.insert(cluster.slug.as_str())
            {
                continue;
            }
            let category = resolver.category(&cluster.slug)?;
            let html = self.render_category(&resolver, &category)?;
            self.write_route(&helpers::category_path(&cluster.slug), &html)?;
        }

        for page in &store.pages {
            if is_reserved_slug(&page.slug) {
                tracing::warn!("Page {} would replace a generated route, skipping", page.slug);
                continue;
            }
            self.write_route(&page.path(), &self.render_page(&resolver, page)?)?;
        }

        self.write_route("/404.html", &self.render_not_found(&resolver, RecordKind::Page)?)?;

        self.generate_redirects(&resolver)?;
        self.generate_sitemap(store)?;

        tracing::info!(
            "Generated {} posts, {} topics, {} categories, {} pages",
            store.posts.len(),
            store.pillars.len(),
            store.clusters.len(),
            store.pages.len()
        );
        Ok(())
    }

    /// Common context: site chrome, head metadata, breadcrumbs and JSON-LD
    fn base_context(
        &self,
        resolver: &Resolver<'_>,
        meta: &PageMeta,
        crumbs: &[Crumb],
        schemas: &[Value],
    ) -> Context {
        let year = self.now.format("%Y").to_string();
        let site = SiteView::new(&self.site.config, &resolver.store().pages, year);
        let scripts: Vec<String> = schemas.iter().map(helpers::json_ld_script).collect();

        let mut context = Context::new();
        context.insert("site", &site);
        context.insert("meta", meta);
        context.insert("breadcrumbs", crumbs);
        context.insert("schemas", &scripts);
        context
    }

    fn card(&self, resolver: &Resolver<'_>, post: &crate::content::Post) -> PostCard {
        PostCard::new(&self.site.config, resolver, post)
    }

    fn url(&self, path: &str) -> String {
        helpers::url_for(&self.site.config, path)
    }

    fn home_crumb(&self) -> Crumb {
        Crumb::link("Home", self.url("/"))
    }

    pub fn render_home(&self, resolver: &Resolver<'_>) -> Result<String> {
        let config = &self.site.config;
        let home = resolver.home(&config.home);

        let schemas = [schema::organization(config), schema::website(config)];
        let mut context = self.base_context(resolver, &meta::home(config), &[], &schemas);

        let featured: Vec<PostCard> = home.featured.iter().map(|p| self.card(resolver, p)).collect();
        let recent: Vec<PostCard> = home.recent.iter().map(|p| self.card(resolver, p)).collect();
        context.insert("featured", &featured);
        context.insert("recent", &recent);
        context.insert("lead_magnet", &home.lead_magnet.map(LeadMagnetView::from));

        self.renderer.render("index.html", &context)
    }

    pub fn render_blog_index(&self, resolver: &Resolver<'_>) -> Result<String> {
        let config = &self.site.config;
        let index = resolver.blog_index();

        let crumbs = vec![self.home_crumb(), Crumb::current("Blog")];
        let schemas = [schema::breadcrumb_list(config, &crumbs, &self.url("/blog"))];
        let mut context = self.base_context(resolver, &meta::blog_index(config), &crumbs, &schemas);

        let pillars: Vec<LinkView> = index
            .pillars
            .iter()
            .map(|p| LinkView::new(&p.name, self.url(&helpers::topic_path(&p.slug))))
            .collect();
        context.insert("featured", &PostCard::list(config, resolver, &index.featured));
        context.insert("regular", &PostCard::list(config, resolver, &index.regular));
        context.insert("pillars", &pillars);

        self.renderer.render("blog.html", &context)
    }

    pub fn render_post(&self, resolver: &Resolver<'_>, ctx: &PostContext<'_>) -> Result<String> {
        let config = &self.site.config;
        let post = ctx.post;
        let path = self.url(&helpers::post_path(&post.slug));

        let mut crumbs = vec![self.home_crumb()];
        if let Some(pillar) = ctx.pillar {
            crumbs.push(Crumb::link(
                &pillar.name,
                self.url(&helpers::topic_path(&pillar.slug)),
            ));
        }
        if let Some(cluster) = ctx.cluster {
            crumbs.push(Crumb::link(
                &cluster.name,
                self.url(&helpers::category_path(&cluster.slug)),
            ));
        }
        crumbs.push(Crumb::current(&post.title));

        let now = helpers::date_xml(&self.now);
        let schemas = [
            schema::article(config, post, &now),
            schema::breadcrumb_list(config, &crumbs, &path),
        ];
        let mut context = self.base_context(resolver, &meta::post(config, post), &crumbs, &schemas);

        let body = render_post_body(post, &self.markdown);
        let published = post.published_at();
        let label = ctx
            .cluster
            .map(|c| c.name.clone())
            .or_else(|| post.category.clone());

        context.insert("post_title", &post.title);
        context.insert("post_excerpt", &post.excerpt);
        context.insert("post_badge", &post.badge());
        context.insert("post_label", &label);
        context.insert("post_author", &post.author_name);
        context.insert("post_date", &published.map(|d| helpers::full_date(&d)));
        context.insert("post_date_iso", &published.map(|d| helpers::ymd(&d)));
        context.insert("post_image", &post.featured_image);
        context.insert("post_tags", &post.tags);
        context.insert("reading_minutes", &helpers::reading_minutes(&body));
        context.insert("body", &body);

        let quick_nav: Vec<LinkView> = ctx
            .quick_nav
            .iter()
            .map(|p| LinkView::new(&p.title, self.url(&helpers::post_path(&p.slug))))
            .collect();
        context.insert("quick_nav", &quick_nav);

        let related: Vec<&crate::content::Post> =
            ctx.siblings.iter().copied().take(RELATED_LIMIT).collect();
        context.insert("related", &PostCard::list(config, resolver, &related));

        let mut back_links = Vec::new();
        if let Some(cluster) = ctx.cluster {
            back_links.push(LinkView::new(
                &cluster.name,
                self.url(&helpers::category_path(&cluster.slug)),
            ));
        }
        if let Some(pillar) = ctx.pillar {
            back_links.push(LinkView::new(
                &pillar.name,
                self.url(&helpers::topic_path(&pillar.slug)),
            ));
        }
        back_links.push(LinkView::new("All Articles", self.url("/blog")));
        context.insert("back_links", &back_links);

        self.renderer.render("post.html", &context)
    }

    pub fn render_topic(&self, resolver: &Resolver<'_>, topic: &TopicView<'_>) -> Result<String> {
        let config = &self.site.config;
        let pillar = topic.pillar;
        let path = self.url(&helpers::topic_path(&pillar.slug));

        let crumbs = vec![self.home_crumb(), Crumb::current(&pillar.name)];
        let schemas = [schema::breadcrumb_list(config, &crumbs, &path)];
        let mut context = self.base_context(resolver, &meta::topic(config, pillar), &crumbs, &schemas);

        let sections: Vec<SectionView> = topic
            .sections
            .iter()
            .map(|s| SectionView {
                name: s.cluster.name.clone(),
                description: s.cluster.description.clone(),
                path: self.url(&helpers::category_path(&s.cluster.slug)),
                cluster_post: s.cluster_post.map(|p| self.card(resolver, p)),
                blog_posts: PostCard::list(config, resolver, &s.blog_posts),
            })
            .collect();
        let legacy_posts = if topic.show_legacy() {
            PostCard::list(config, resolver, &topic.legacy_posts)
        } else {
            Vec::new()
        };

        context.insert("pillar_name", &pillar.name);
        context.insert("pillar_description", &pillar.description);
        context.insert("hero_image", &pillar.hero_image);
        context.insert("pillar_post", &topic.pillar_post.map(|p| self.card(resolver, p)));
        context.insert("sections", &sections);
        context.insert("legacy_posts", &legacy_posts);
        context.insert("has_content", &topic.has_content());

        self.renderer.render("topic.html", &context)
    }

    pub fn render_category(
        &self,
        resolver: &Resolver<'_>,
        category: &CategoryView<'_>,
    ) -> Result<String> {
        let config = &self.site.config;
        let cluster = category.cluster;
        let path = self.url(&helpers::category_path(&cluster.slug));

        let mut crumbs = vec![self.home_crumb()];
        if let Some(pillar) = category.pillar {
            crumbs.push(Crumb::link(
                &pillar.name,
                self.url(&helpers::topic_path(&pillar.slug)),
            ));
        }
        crumbs.push(Crumb::current(&cluster.name));

        let schemas = [schema::breadcrumb_list(config, &crumbs, &path)];
        let mut context =
            self.base_context(resolver, &meta::category(config, cluster), &crumbs, &schemas);

        // Tier order: the cluster's main article leads the grid
        let mut posts = category.posts.clone();
        posts.sort_by_key(|p| !p.is_tier(TierType::Cluster));

        context.insert("cluster_name", &cluster.name);
        context.insert("cluster_description", &cluster.description);
        context.insert("posts", &PostCard::list(config, resolver, &posts));

        self.renderer.render("category.html", &context)
    }

    pub fn render_page(&self, resolver: &Resolver<'_>, page: &Page) -> Result<String> {
        let config = &self.site.config;
        let mut context = self.base_context(resolver, &meta::page(config, page), &[], &[]);
        context.insert("page_title", &page.title);
        context.insert("page_updated", &page.updated);
        context.insert("page_content", &page.content);
        self.renderer.render("page.html", &context)
    }

    /// Not-found page titled for the kind of record that was missing
    pub fn render_not_found(&self, resolver: &Resolver<'_>, kind: RecordKind) -> Result<String> {
        let config = &self.site.config;
        let mut context = self.base_context(resolver, &meta::not_found(config, kind), &[], &[]);
        let (label, href) = match kind {
            RecordKind::Pillar | RecordKind::Cluster => ("Browse all articles", "/blog"),
            RecordKind::Post => ("Back to Blog", "/blog"),
            RecordKind::AffiliateLink | RecordKind::Page => ("Go home", "/"),
        };
        context.insert("heading", kind.not_found_title());
        context.insert("back", &LinkView::new(label, self.url(href)));
        self.renderer.render("404.html", &context)
    }

    /// Meta-refresh fallback for hosts without a redirect table
    pub fn render_redirect(&self, resolver: &Resolver<'_>, link: &AffiliateLink) -> Result<String> {
        let config = &self.site.config;
        let destination = link.destination_url.trim();
        let meta = meta::redirect(config, &link.short_code, destination);
        let mut context = self.base_context(resolver, &meta, &[], &[]);
        context.insert("destination", destination);
        context.insert("name", &link.name);
        self.renderer.render("redirect.html", &context)
    }

    fn generate_redirects(&self, resolver: &Resolver<'_>) -> Result<()> {
        let links = redirects::targets(resolver);
        for link in &links {
            let html = self.render_redirect(resolver, link)?;
            self.write_route(&helpers::redirect_path(&link.short_code), &html)?;
        }

        let table = redirects::table(&links, self.site.config.redirects.status);
        self.write_route("/_redirects", &table)?;
        tracing::info!("Generated {} affiliate redirects", links.len());
        Ok(())
    }

    fn generate_sitemap(&self, store: &ContentStore) -> Result<()> {
        let now = helpers::date_xml(&self.now);
        let entries = sitemap::entries(&self.site.config, store, &store.pages, &now);
        self.write_route("/sitemap.xml", &sitemap::render(&entries))?;
        tracing::info!("Generated sitemap.xml with {} urls", entries.len());
        Ok(())
    }

    fn write_route(&self, route: &str, content: &str) -> Result<()> {
        let output_path = output_path(&self.site.public_dir, route)
            .with_context(|| format!("Route {} leaves the public directory", route))?;
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy the static directory verbatim into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
        }

        Ok(())
    }
}

/// Slugs that cannot be published as one route segment are skipped
fn publishable(kind: RecordKind, slug: &str) -> bool {
    let ok = helpers::is_route_segment(slug);
    if !ok {
        tracing::warn!("Skipping {} with unusable slug {:?}", kind, slug);
    }
    ok
}

/// File a route is written to: directories get an `index.html`, file-like
/// routes are written as-is. `None` when the decoded route is not a plain
/// relative path.
pub fn output_path(public_dir: &Path, route: &str) -> Option<PathBuf> {
    let decoded = percent_encoding::percent_decode_str(route.trim_matches('/')).decode_utf8_lossy();
    let clean = Path::new(decoded.as_ref());

    if clean.as_os_str().is_empty() {
        return Some(public_dir.join("index.html"));
    }
    if !clean.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    let is_file = clean == Path::new("_redirects")
        || clean
            .extension()
            .map(|e| e == "html" || e == "xml")
            .unwrap_or(false);
    if is_file {
        Some(public_dir.join(clean))
    } else {
        Some(public_dir.join(clean).join("index.html"))
    }
}
