//! Markdown rendering for content files and standalone pages

use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Markdown renderer; absolute links open in a new tab
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // YAML metadata blocks stay off; front-matter is split beforehand
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        Self { options }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let events = parser.map(|event| match event {
            Event::Start(Tag::Link {
                link_type: _,
                ref dest_url,
                ref title,
                id: _,
            }) if is_external(dest_url) => {
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(r#" title="{}""#, crate::helpers::html_escape(title))
                };
                Event::Html(
                    format!(
                        r#"<a href="{}"{} target="_blank" rel="noopener sponsored">"#,
                        crate::helpers::html_escape(dest_url),
                        title_attr
                    )
                    .into(),
                )
            }
            other => other,
        });

        let mut html_output = String::new();
        html::push_html(&mut html_output, events);
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
