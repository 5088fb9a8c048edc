//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const CONFIG: &str = r##"# Site
title: Reselling Tips, Tools and Techniques For The Modern Reseller
brand: Resale Edge
tagline: ResaleEdge | Reseller Hardware, Software & Systems That Scale
description: Build your reselling business right. Reviews of software tools, photo setups, shipping equipment, and processes and workflow for the modern reseller.
author: Resale Edge
language: en

# URL
url: https://resaleedge.com
root: /

# Directory
data_dir: data
content_dir: content
pages_dir: pages
static_dir: static
public_dir: public

# Collection files in data_dir. Set an optional one to null if the site
# does not use it; a named file must exist.
collections:
  posts: posts.json
  pillars: pillars.json
  clusters: categories.json
  affiliate_links: affiliate-links.json
  lead_magnets: lead-magnets.json

home:
  featured_count: 3
  recent_count: 6

seo:
  logo: /images/logo.svg

lead_capture:
  action: "#"
  method: post

redirects:
  status: 302

server:
  ip: localhost
  port: 4000
"##;

const PILLARS: &str = r#"[
  {
    "id": "reseller-hardware",
    "slug": "reseller-hardware",
    "name": "Reseller Hardware",
    "description": "Photo gear, shipping stations and storage that pay for themselves.",
    "seoTitle": "Reseller Hardware Guides"
  }
]
"#;

const CATEGORIES: &str = r#"[
  {
    "id": "shipping-stations",
    "slug": "shipping-stations",
    "name": "Shipping Stations",
    "description": "Scales, label printers and packing workflows.",
    "pillarId": "reseller-hardware"
  }
]
"#;

const POSTS: &str = r###"[
  {
    "id": "1",
    "slug": "reseller-hardware-guide",
    "title": "The Complete Reseller Hardware Guide",
    "excerpt": "Everything you need to equip a reselling business that scales.",
    "pillarId": "reseller-hardware",
    "tierType": "pillar",
    "format": "ultimate_guide",
    "authorName": "Resale Edge",
    "publishDate": "2025-01-06",
    "isFeaturedPost": true,
    "isPillarPost": true,
    "content": "## Why Hardware Matters\n\nThe right **tools** pay for themselves in saved time.\n\n## Where to Start\n\nBegin with your *shipping station*."
  },
  {
    "id": "2",
    "slug": "shipping-station-setup",
    "title": "How to Set Up a Shipping Station",
    "excerpt": "A packing workflow that keeps up with your sales.",
    "pillarId": "reseller-hardware",
    "clusterId": "shipping-stations",
    "tierType": "cluster",
    "format": "how_to",
    "publishDate": "2025-01-13",
    "content": "## The Layout\n\nKeep supplies within arm's reach."
  },
  {
    "id": "3",
    "slug": "best-thermal-label-printers",
    "title": "Best Thermal Label Printers for Resellers",
    "excerpt": "We compared the printers resellers actually use.",
    "pillarId": "reseller-hardware",
    "clusterId": "shipping-stations",
    "tierType": "blog",
    "format": "buying_guide",
    "tags": ["shipping", "printers"],
    "publishDate": "2025-01-20",
    "content": "## Our Pick\n\nThe [Rollo](/go/rollo) is fast and cheap to run."
  }
]
"###;

const AFFILIATE_LINKS: &str = r#"[
  {
    "shortCode": "rollo",
    "name": "Rollo Label Printer",
    "destinationUrl": "https://www.rollo.com/"
  }
]
"#;

const LEAD_MAGNETS: &str = r#"[
  {
    "id": "shipping-checklist",
    "name": "Shipping Station Checklist",
    "headline": "The Free Shipping Station Checklist",
    "subheadline": "Everything on our own packing bench, in one printable page.",
    "benefits": ["Cut packing time in half", "Stop overpaying for postage"],
    "ctaText": "Send Me the Checklist"
  }
]
"#;

const PRIVACY: &str = r#"---
title: Privacy Policy
description: Learn how we collect, use, and protect your personal information.
updated: January 6, 2025
---

## Information We Collect

We collect the email address you enter when you request a free download.

## How We Use Your Information

We use it to send the download you asked for and occasional updates.

## Cookies and Tracking

We use analytics cookies to understand which articles are useful.

## Third-Party Services

Some links are affiliate links handled by third parties.

## Your Rights

You may request deletion of your information at any time.

## Contact Us

Questions about this policy can be sent through our contact page.
"#;

const TERMS: &str = r#"---
title: Terms of Service
updated: January 6, 2025
---

## Acceptance of Terms

By using this site you agree to these terms.

## Use of Content

Articles are for informational purposes only.

## External Links

We are not responsible for the content of external sites.

## Changes to Terms

We may update these terms from time to time.
"#;

const AFFILIATE_DISCLOSURE: &str = r#"---
title: Affiliate Disclosure
description: Learn about our affiliate relationships and how we earn commissions.
updated: January 6, 2025
---

## Our Commitment to Transparency

This page discloses our affiliate relationships.

## What Are Affiliate Links?

If you buy through some of our links we may earn a small commission at no
extra cost to you.

## Our Promise to You

We only recommend products we believe provide value.

## FTC Compliance

This disclosure is made in accordance with FTC guidelines.
"#;

const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><rect width="32" height="32" rx="6" fill="#0f766e"/></svg>
"##;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    let files: [(&str, &str); 10] = [
        ("_config.yml", CONFIG),
        ("data/posts.json", POSTS),
        ("data/pillars.json", PILLARS),
        ("data/categories.json", CATEGORIES),
        ("data/affiliate-links.json", AFFILIATE_LINKS),
        ("data/lead-magnets.json", LEAD_MAGNETS),
        ("pages/privacy.md", PRIVACY),
        ("pages/terms.md", TERMS),
        ("pages/affiliate-disclosure.md", AFFILIATE_DISCLOSURE),
        ("static/images/logo.svg", LOGO),
    ];

    for (relative, content) in files {
        let path = target_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Created: {:?}", path);
    }
    fs::create_dir_all(target_dir.join("content"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Resolver;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_is_consistent() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.config.brand, "Resale Edge");

        let store = site.load_store().unwrap();
        assert_eq!(store.posts.len(), 3);
        assert_eq!(store.pages.len(), 3);
        assert!(Resolver::new(&store).inconsistencies().is_empty());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
