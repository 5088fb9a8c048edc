//! Content module - collections, slug resolution and body rendering

mod frontmatter;
mod markdown;
mod markup;
mod model;
pub mod pages;
pub mod resolver;
pub mod store;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use markup::render_markup;
pub use model::{
    format_label, AffiliateLink, Cluster, LeadMagnet, MarkupKind, Pillar, Post, TierType,
};
pub use pages::Page;
pub use resolver::Resolver;
pub use store::ContentStore;

/// `.md` and `.markdown` files render as Markdown
pub(crate) fn is_markdown_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Render a post body according to how it was written
pub fn render_post_body(post: &Post, markdown: &MarkdownRenderer) -> String {
    match post.markup {
        MarkupKind::Lite => render_markup(&post.content),
        MarkupKind::Markdown => markdown.render(&post.content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Path::new("pages/terms.md")));
        assert!(is_markdown_file(Path::new("guide.markdown")));
        assert!(!is_markdown_file(Path::new("notes.txt")));
        assert!(!is_markdown_file(Path::new("README")));
    }
}
