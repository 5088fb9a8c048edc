//! Lightweight text markup used by inline post bodies
//!
//! Supports `## ` and `### ` headers, `**bold**`, `*italic*`,
//! `[text](url)` links and blank-line paragraph breaks. The conversion is a
//! fixed sequence of substitutions; the final two steps undo paragraph tags
//! that the line-wrapping step puts around headers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref H2: Regex = Regex::new(r"(?m)^## (.+)$").unwrap();
    static ref H3: Regex = Regex::new(r"(?m)^### (.+)$").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.+?)\*").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").unwrap();
    static ref LINE: Regex = Regex::new(r"(?m)^(.+)$").unwrap();
    static ref HEADER_CLOSE: Regex = Regex::new(r"</h([23])></p>").unwrap();
}

/// Convert lightweight markup to HTML.
///
/// Input is trusted author content and is not escaped.
pub fn render_markup(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let html = H2.replace_all(&text, "<h2>${1}</h2>");
    let html = H3.replace_all(&html, "<h3>${1}</h3>");
    let html = BOLD.replace_all(&html, "<strong>${1}</strong>");
    let html = ITALIC.replace_all(&html, "<em>${1}</em>");
    let html = LINK.replace_all(&html, r#"<a href="${2}">${1}</a>"#);
    let html = html.replace("\n\n", "</p><p>");
    let html = LINE.replace_all(&html, "<p>${1}</p>");
    let html = html.replace("<p><h", "<h");
    HEADER_CLOSE.replace_all(&html, "</h${1}>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_paragraph() {
        assert_eq!(render_markup("Hello world"), "<p>Hello world</p>");
    }

    #[test]
    fn test_paragraph_breaks() {
        assert_eq!(
            render_markup("First.\n\nSecond."),
            "<p>First.</p><p>Second.</p>"
        );
    }

    #[test]
    fn test_headers_not_wrapped() {
        assert_eq!(
            render_markup("## Shipping\n\nBuy a scale."),
            "<h2>Shipping</h2><p>Buy a scale.</p>"
        );
        assert_eq!(
            render_markup("### Labels\nThermal only."),
            "<h3>Labels</h3>\n<p>Thermal only.</p>"
        );
    }

    #[test]
    fn test_h3_is_not_h2() {
        let html = render_markup("### Deep");
        assert_eq!(html, "<h3>Deep</h3>");
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn test_inline_formatting() {
        assert_eq!(
            render_markup("Use **thermal** paper, *not* ink."),
            "<p>Use <strong>thermal</strong> paper, <em>not</em> ink.</p>"
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            render_markup("See [our pick](/go/rollo) today."),
            r#"<p>See <a href="/go/rollo">our pick</a> today.</p>"#
        );
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(render_markup("A\r\n\r\nB"), "<p>A</p><p>B</p>");
    }

    #[test]
    fn test_empty() {
        assert_eq!(render_markup(""), "");
    }
}
