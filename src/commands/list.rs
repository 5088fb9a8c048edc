//! List site content

use anyhow::Result;
use std::fmt::Write as _;

use crate::content::{ContentStore, Resolver, TierType};
use crate::{helpers, Site};

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let store = site.load_store()?;
    print!("{}", render(&store, content_type)?);
    Ok(())
}

/// The listing for one content type
pub fn render(store: &ContentStore, content_type: &str) -> Result<String> {
    let resolver = Resolver::new(store);
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            writeln!(out, "Posts ({}):", store.posts.len())?;
            for post in &store.posts {
                let date = post
                    .published_at()
                    .map(|d| helpers::ymd(&d))
                    .unwrap_or_else(|| "----------".to_string());
                let tier = match post.tier_type {
                    Some(TierType::Pillar) => "pillar",
                    Some(TierType::Cluster) => "cluster",
                    Some(TierType::Blog) => "blog",
                    None => "-",
                };
                writeln!(out, "  {} - {} [{}] ({})", date, post.title, post.slug, tier)?;
            }
        }
        "pillar" | "pillars" | "topic" | "topics" => {
            writeln!(out, "Pillars ({}):", store.pillars.len())?;
            for pillar in &store.pillars {
                writeln!(
                    out,
                    "  {} [{}] - {} clusters, {} posts",
                    pillar.name,
                    helpers::topic_path(&pillar.slug),
                    resolver.pillar_clusters(pillar).len(),
                    resolver.pillar_posts(pillar).len()
                )?;
            }
        }
        "cluster" | "clusters" | "category" | "categories" => {
            writeln!(out, "Clusters ({}):", store.clusters.len())?;
            for cluster in &store.clusters {
                let pillar = resolver
                    .cluster_pillar(cluster)
                    .map(|p| p.name.as_str())
                    .unwrap_or("-");
                writeln!(
                    out,
                    "  {} [{}] in {}",
                    cluster.name,
                    helpers::category_path(&cluster.slug),
                    pillar
                )?;
            }
            let orphans = resolver.orphan_categories();
            if !orphans.is_empty() {
                writeln!(out, "Legacy categories without a cluster ({}):", orphans.len())?;
                for (category, count) in orphans {
                    writeln!(out, "  {} ({})", category, count)?;
                }
            }
        }
        "link" | "links" => {
            writeln!(out, "Affiliate links ({}):", store.affiliate_links.len())?;
            for link in &store.affiliate_links {
                writeln!(
                    out,
                    "  {} -> {}",
                    helpers::redirect_path(&link.short_code),
                    link.destination_url.trim()
                )?;
            }
        }
        "magnet" | "magnets" => {
            writeln!(out, "Lead magnets ({}):", store.lead_magnets.len())?;
            for magnet in &store.lead_magnets {
                writeln!(out, "  {} [{}]", magnet.name, magnet.id)?;
            }
        }
        "page" | "pages" => {
            writeln!(out, "Pages ({}):", store.pages.len())?;
            for page in &store.pages {
                writeln!(out, "  {} [{}]", page.title, page.path())?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Use: post, pillar, cluster, link, magnet, page",
                content_type
            );
        }
    }

    Ok(out)
}
