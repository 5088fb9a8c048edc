//! Slug resolution over the content store
//!
//! Every lookup is a linear scan; the first record whose slug matches wins.
//! Relationships are followed by id with no integrity enforcement, so a
//! dangling `pillarId` or `clusterId` resolves to nothing rather than an
//! error. [`Resolver::inconsistencies`] reports such records.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use super::{AffiliateLink, Cluster, ContentStore, LeadMagnet, Pillar, Post, TierType};
use crate::config::HomeConfig;
use crate::error::{RecordKind, SiteError, SiteResult};
use crate::helpers;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_SLUG: Regex = Regex::new(r"[^a-z0-9-]").unwrap();
}

/// Slug of a free-text legacy category ("Photo & Lighting" → "photo--lighting")
pub fn legacy_category_slug(category: &str) -> String {
    let lower = category.to_lowercase();
    let dashed = WHITESPACE.replace_all(&lower, "-");
    NON_SLUG.replace_all(&dashed, "").into_owned()
}

/// A post with its place in the hierarchy
#[derive(Debug)]
pub struct PostContext<'a> {
    pub post: &'a Post,
    pub pillar: Option<&'a Pillar>,
    pub cluster: Option<&'a Cluster>,
    /// Posts sharing the cluster, or the pillar when there is no cluster
    pub siblings: Vec<&'a Post>,
    /// "In this guide" entries for pillar and cluster tier posts
    pub quick_nav: Vec<&'a Post>,
}

/// One cluster block on a topic page
#[derive(Debug)]
pub struct ClusterSection<'a> {
    pub cluster: &'a Cluster,
    pub cluster_post: Option<&'a Post>,
    pub blog_posts: Vec<&'a Post>,
}

/// Everything rendered on `/topics/{slug}`
#[derive(Debug)]
pub struct TopicView<'a> {
    pub pillar: &'a Pillar,
    pub pillar_post: Option<&'a Post>,
    pub sections: Vec<ClusterSection<'a>>,
    pub legacy_posts: Vec<&'a Post>,
}

impl TopicView<'_> {
    pub fn has_content(&self) -> bool {
        self.pillar_post.is_some() || !self.sections.is_empty() || !self.legacy_posts.is_empty()
    }

    /// Untiered posts only appear when nothing tiered exists for the pillar
    pub fn show_legacy(&self) -> bool {
        !self.legacy_posts.is_empty() && self.sections.is_empty() && self.pillar_post.is_none()
    }
}

/// Everything rendered on `/category/{slug}`
#[derive(Debug)]
pub struct CategoryView<'a> {
    pub cluster: &'a Cluster,
    pub pillar: Option<&'a Pillar>,
    pub posts: Vec<&'a Post>,
}

/// Home page selection
#[derive(Debug)]
pub struct HomeView<'a> {
    pub featured: &'a [Post],
    pub recent: &'a [Post],
    pub lead_magnet: Option<&'a LeadMagnet>,
}

/// Blog index selection
#[derive(Debug)]
pub struct BlogIndexView<'a> {
    pub featured: Vec<&'a Post>,
    pub regular: Vec<&'a Post>,
    pub pillars: &'a [Pillar],
}

/// A data problem found by [`Resolver::inconsistencies`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    DuplicateSlug {
        kind: RecordKind,
        slug: String,
        count: usize,
    },
    DanglingPillar {
        post: String,
        pillar_id: String,
    },
    DanglingCluster {
        post: String,
        cluster_id: String,
    },
    ClusterPillarMismatch {
        post: String,
        post_pillar: String,
        cluster_pillar: Option<String>,
    },
    ClusterWithoutPillar {
        cluster: String,
        pillar_id: String,
    },
    EmptyDestination {
        short_code: String,
    },
    /// Cannot be published as a single path segment
    UnusableSlug {
        kind: RecordKind,
        slug: String,
    },
    /// A page whose slug belongs to a generated route
    ReservedPageSlug {
        slug: String,
    },
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inconsistency::DuplicateSlug { kind, slug, count } => {
                write!(f, "{} slug `{}` is used {} times", kind, slug, count)
            }
            Inconsistency::DanglingPillar { post, pillar_id } => {
                write!(f, "post `{}` references unknown pillar `{}`", post, pillar_id)
            }
            Inconsistency::DanglingCluster { post, cluster_id } => {
                write!(f, "post `{}` references unknown cluster `{}`", post, cluster_id)
            }
            Inconsistency::ClusterPillarMismatch {
                post,
                post_pillar,
                cluster_pillar,
            } => write!(
                f,
                "post `{}` is in pillar `{}` but its cluster belongs to `{}`",
                post,
                post_pillar,
                cluster_pillar.as_deref().unwrap_or("no pillar")
            ),
            Inconsistency::ClusterWithoutPillar { cluster, pillar_id } => {
                write!(f, "cluster `{}` references unknown pillar `{}`", cluster, pillar_id)
            }
            Inconsistency::EmptyDestination { short_code } => {
                write!(f, "affiliate link `{}` has no destination", short_code)
            }
            Inconsistency::UnusableSlug { kind, slug } => {
                write!(f, "{} slug {:?} cannot be used in a URL path", kind, slug)
            }
            Inconsistency::ReservedPageSlug { slug } => {
                write!(f, "page `{}` would replace a generated route", slug)
            }
        }
    }
}

/// Read-only lookups over a [`ContentStore`]
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a ContentStore,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a ContentStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a ContentStore {
        self.store
    }

    pub fn post(&self, slug: &str) -> SiteResult<&'a Post> {
        self.store
            .posts
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| SiteError::not_found(RecordKind::Post, slug))
    }

    pub fn pillar(&self, slug: &str) -> SiteResult<&'a Pillar> {
        self.store
            .pillars
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| SiteError::not_found(RecordKind::Pillar, slug))
    }

    pub fn cluster(&self, slug: &str) -> SiteResult<&'a Cluster> {
        self.store
            .clusters
            .iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| SiteError::not_found(RecordKind::Cluster, slug))
    }

    /// Affiliate link by short code; an empty destination counts as missing
    pub fn affiliate_link(&self, short_code: &str) -> SiteResult<&'a AffiliateLink> {
        self.store
            .affiliate_links
            .iter()
            .find(|l| l.short_code == short_code)
            .filter(|l| !l.destination_url.trim().is_empty())
            .ok_or_else(|| SiteError::not_found(RecordKind::AffiliateLink, short_code))
    }

    pub fn pillar_by_id(&self, id: &str) -> Option<&'a Pillar> {
        self.store.pillars.iter().find(|p| p.id == id)
    }

    pub fn cluster_by_id(&self, id: &str) -> Option<&'a Cluster> {
        self.store.clusters.iter().find(|c| c.id == id)
    }

    /// Parent pillar of a cluster
    pub fn cluster_pillar(&self, cluster: &Cluster) -> Option<&'a Pillar> {
        cluster
            .pillar_id
            .as_deref()
            .and_then(|id| self.pillar_by_id(id))
    }

    pub fn pillar_posts(&self, pillar: &Pillar) -> Vec<&'a Post> {
        self.store
            .posts
            .iter()
            .filter(|p| p.pillar_id.as_deref() == Some(pillar.id.as_str()))
            .collect()
    }

    pub fn pillar_clusters(&self, pillar: &Pillar) -> Vec<&'a Cluster> {
        self.store
            .clusters
            .iter()
            .filter(|c| c.pillar_id.as_deref() == Some(pillar.id.as_str()))
            .collect()
    }

    /// Resolve a post slug together with its pillar, cluster and relatives
    pub fn post_context(&self, slug: &str) -> SiteResult<PostContext<'a>> {
        let post = self.post(slug)?;
        let pillar = post.pillar_id.as_deref().and_then(|id| self.pillar_by_id(id));
        let cluster = post
            .cluster_id
            .as_deref()
            .and_then(|id| self.cluster_by_id(id));

        let siblings: Vec<&Post> = match (&post.cluster_id, &post.pillar_id) {
            (Some(cluster_id), _) => self
                .store
                .posts
                .iter()
                .filter(|p| p.slug != post.slug && p.cluster_id.as_ref() == Some(cluster_id))
                .collect(),
            (None, Some(pillar_id)) => self
                .store
                .posts
                .iter()
                .filter(|p| p.slug != post.slug && p.pillar_id.as_ref() == Some(pillar_id))
                .collect(),
            (None, None) => Vec::new(),
        };

        let quick_nav = match post.tier_type {
            Some(TierType::Pillar) => match pillar {
                Some(pillar) => self
                    .pillar_clusters(pillar)
                    .into_iter()
                    .filter_map(|c| {
                        self.store.posts.iter().find(|p| {
                            p.cluster_id.as_deref() == Some(c.id.as_str())
                                && p.is_tier(TierType::Cluster)
                        })
                    })
                    .collect(),
                None => Vec::new(),
            },
            Some(TierType::Cluster) => match &post.cluster_id {
                Some(cluster_id) => self
                    .store
                    .posts
                    .iter()
                    .filter(|p| p.cluster_id.as_ref() == Some(cluster_id) && p.is_leaf())
                    .collect(),
                None => Vec::new(),
            },
            _ => Vec::new(),
        };

        Ok(PostContext {
            post,
            pillar,
            cluster,
            siblings,
            quick_nav,
        })
    }

    /// Assemble the three-tier topic page for a pillar slug
    pub fn topic(&self, slug: &str) -> SiteResult<TopicView<'a>> {
        let pillar = self.pillar(slug)?;
        let posts = self.pillar_posts(pillar);

        let pillar_post = posts.iter().copied().find(|p| p.is_tier(TierType::Pillar));

        let sections = self
            .pillar_clusters(pillar)
            .into_iter()
            .map(|cluster| {
                let cluster_posts: Vec<&Post> = posts
                    .iter()
                    .copied()
                    .filter(|p| p.cluster_id.as_deref() == Some(cluster.id.as_str()))
                    .collect();
                let cluster_post = cluster_posts
                    .iter()
                    .copied()
                    .find(|p| p.is_tier(TierType::Cluster));
                let blog_posts = cluster_posts.into_iter().filter(|p| p.is_leaf()).collect();
                ClusterSection {
                    cluster,
                    cluster_post,
                    blog_posts,
                }
            })
            .filter(|s| s.cluster_post.is_some() || !s.blog_posts.is_empty())
            .collect();

        let legacy_posts = posts
            .iter()
            .copied()
            .filter(|p| p.tier_type.is_none() && p.cluster_id.is_none())
            .collect();

        Ok(TopicView {
            pillar,
            pillar_post,
            sections,
            legacy_posts,
        })
    }

    /// Assemble the category page for a cluster slug.
    ///
    /// Posts with a `clusterId` match on it; posts without one fall back to
    /// comparing their legacy category's slug with the requested slug.
    pub fn category(&self, slug: &str) -> SiteResult<CategoryView<'a>> {
        let cluster = self.cluster(slug)?;
        let posts = self
            .store
            .posts
            .iter()
            .filter(|post| match (&post.cluster_id, &post.category) {
                (Some(cluster_id), _) => *cluster_id == cluster.id,
                (None, Some(category)) => legacy_category_slug(category) == slug,
                (None, None) => false,
            })
            .collect();

        Ok(CategoryView {
            cluster,
            pillar: self.cluster_pillar(cluster),
            posts,
        })
    }

    pub fn home(&self, config: &HomeConfig) -> HomeView<'a> {
        let posts = self.store.posts.as_slice();
        let featured_end = config.featured_count.min(posts.len());
        let recent_end = config.recent_count.clamp(featured_end, posts.len().max(featured_end));
        HomeView {
            featured: &posts[..featured_end],
            recent: &posts[featured_end..recent_end],
            lead_magnet: self.store.lead_magnets.first(),
        }
    }

    pub fn blog_index(&self) -> BlogIndexView<'a> {
        let (featured, regular): (Vec<&Post>, Vec<&Post>) =
            self.store.posts.iter().partition(|p| p.is_featured_post);
        BlogIndexView {
            featured,
            regular,
            pillars: &self.store.pillars,
        }
    }

    /// Posts whose legacy category has no cluster of the same slug
    pub fn orphan_categories(&self) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for post in &self.store.posts {
            if post.cluster_id.is_some() {
                continue;
            }
            if let Some(category) = &post.category {
                let slug = legacy_category_slug(category);
                if self.cluster(&slug).is_err() {
                    *counts.entry(category.clone()).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Report data the site renders around but never rejects
    pub fn inconsistencies(&self) -> Vec<Inconsistency> {
        let mut found = Vec::new();

        duplicate_slugs(
            RecordKind::Post,
            self.store.posts.iter().map(|p| p.slug.as_str()),
            &mut found,
        );
        duplicate_slugs(
            RecordKind::Pillar,
            self.store.pillars.iter().map(|p| p.slug.as_str()),
            &mut found,
        );
        duplicate_slugs(
            RecordKind::Cluster,
            self.store.clusters.iter().map(|c| c.slug.as_str()),
            &mut found,
        );
        duplicate_slugs(
            RecordKind::AffiliateLink,
            self.store.affiliate_links.iter().map(|l| l.short_code.as_str()),
            &mut found,
        );

        unusable_slugs(
            RecordKind::Post,
            self.store.posts.iter().map(|p| p.slug.as_str()),
            &mut found,
        );
        unusable_slugs(
            RecordKind::Pillar,
            self.store.pillars.iter().map(|p| p.slug.as_str()),
            &mut found,
        );
        unusable_slugs(
            RecordKind::Cluster,
            self.store.clusters.iter().map(|c| c.slug.as_str()),
            &mut found,
        );
        unusable_slugs(
            RecordKind::AffiliateLink,
            self.store.affiliate_links.iter().map(|l| l.short_code.as_str()),
            &mut found,
        );
        for slug in &self.store.reserved_pages {
            found.push(Inconsistency::ReservedPageSlug { slug: slug.clone() });
        }

        for cluster in &self.store.clusters {
            if let Some(pillar_id) = &cluster.pillar_id {
                if self.pillar_by_id(pillar_id).is_none() {
                    found.push(Inconsistency::ClusterWithoutPillar {
                        cluster: cluster.slug.clone(),
                        pillar_id: pillar_id.clone(),
                    });
                }
            }
        }

        for post in &self.store.posts {
            if let Some(pillar_id) = &post.pillar_id {
                if self.pillar_by_id(pillar_id).is_none() {
                    found.push(Inconsistency::DanglingPillar {
                        post: post.slug.clone(),
                        pillar_id: pillar_id.clone(),
                    });
                }
            }
            let Some(cluster_id) = &post.cluster_id else {
                continue;
            };
            match self.cluster_by_id(cluster_id) {
                None => found.push(Inconsistency::DanglingCluster {
                    post: post.slug.clone(),
                    cluster_id: cluster_id.clone(),
                }),
                Some(cluster) => {
                    if let Some(post_pillar) = &post.pillar_id {
                        if cluster.pillar_id.as_ref() != Some(post_pillar) {
                            found.push(Inconsistency::ClusterPillarMismatch {
                                post: post.slug.clone(),
                                post_pillar: post_pillar.clone(),
                                cluster_pillar: cluster.pillar_id.clone(),
                            });
                        }
                    }
                }
            }
        }

        for link in &self.store.affiliate_links {
            if link.destination_url.trim().is_empty() {
                found.push(Inconsistency::EmptyDestination {
                    short_code: link.short_code.clone(),
                });
            }
        }

        found
    }
}

fn duplicate_slugs<'s>(
    kind: RecordKind,
    slugs: impl Iterator<Item = &'s str>,
    found: &mut Vec<Inconsistency>,
) {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for slug in slugs {
        *counts.entry(slug).or_insert(0) += 1;
    }
    for (slug, count) in counts {
        if count > 1 {
            found.push(Inconsistency::DuplicateSlug {
                kind,
                slug: slug.to_string(),
                count,
            });
        }
    }
}

fn unusable_slugs<'s>(
    kind: RecordKind,
    slugs: impl Iterator<Item = &'s str>,
    found: &mut Vec<Inconsistency>,
) {
    for slug in slugs {
        if !helpers::is_route_segment(slug) {
            found.push(Inconsistency::UnusableSlug {
                kind,
                slug: slug.to_string(),
            });
        }
    }
}
