//! Create a new post record

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Append a draft post to the posts collection and return its slug
pub fn create_post(site: &Site, title: &str, slug: Option<&str>) -> Result<String> {
    let path = posts_path(site);
    let mut posts: Vec<Value> = if path.exists() {
        let raw =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid posts file {:?}", path))?
    } else {
        Vec::new()
    };

    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from {:?}", title);
    }
    if posts
        .iter()
        .any(|p| p.get("slug").and_then(Value::as_str) == Some(slug.as_str()))
    {
        anyhow::bail!("A post with slug `{}` already exists in {:?}", slug, path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    posts.push(json!({
        "id": next_id(&posts),
        "slug": slug,
        "title": title,
        "excerpt": "",
        "tierType": "blog",
        "publishDate": today,
        "content": "",
    }));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = serde_json::to_string_pretty(&posts)?;
    out.push('\n');
    fs::write(&path, out).with_context(|| format!("Failed to write {:?}", path))?;

    println!("Created post `{}` in {:?}", slug, path);
    Ok(slug)
}

fn posts_path(site: &Site) -> PathBuf {
    site.data_dir.join(&site.config.collections.posts)
}

/// One past the largest numeric id, so string ids like "12" keep counting
fn next_id(posts: &[Value]) -> String {
    let max = posts
        .iter()
        .filter_map(|p| match p.get("id") {
            Some(Value::String(s)) => s.parse::<u64>().ok(),
            Some(Value::Number(n)) => n.as_u64(),
            _ => None,
        })
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}
