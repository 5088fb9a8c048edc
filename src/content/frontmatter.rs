//! Front-matter parsing for standalone pages

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Front-matter of a standalone page (privacy, terms, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Free-form "last updated" text shown under the title
    pub updated: Option<String>,
    /// Leave the page out of the sitemap
    pub noindex: bool,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split `---` delimited YAML front-matter from the body.
    ///
    /// Content without front-matter returns the default and the input.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let trimmed = content.trim_start();
        let Some(rest) = trimmed.strip_prefix("---") else {
            return Ok((FrontMatter::default(), trimmed));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        // Closing fence, which may directly follow the opening one
        let fence = if rest.starts_with("---") {
            Some(0)
        } else {
            rest.find("\n---").map(|pos| pos + 1)
        };
        let Some(fence) = fence else {
            return Ok((FrontMatter::default(), trimmed));
        };

        let yaml_content = &rest[..fence];
        let remaining = rest[fence + 3..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter =
            serde_yaml::from_str(yaml_content).context("Failed to parse YAML front-matter")?;
        Ok((fm, remaining))
    }
}
