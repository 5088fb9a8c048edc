//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Serialize a JSON-LD value for a `<script>` body.
///
/// `</` is escaped so a string value cannot close the script element.
pub fn json_ld_script(value: &serde_json::Value) -> String {
    let json = value.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{}</script>"#, json)
}

/// Count words in HTML content
pub fn count_words(html: &str) -> usize {
    strip_html(html).split_whitespace().count()
}

/// Estimated minutes to read, at 225 words per minute, at least one
pub fn reading_minutes(html: &str) -> usize {
    count_words(html).div_ceil(225).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"Tools & "Tips" <3"#),
            "Tools &amp; &quot;Tips&quot; &lt;3"
        );
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, None), "Hello...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
    }

    #[test]
    fn test_json_ld_script() {
        let value = serde_json::json!({"headline": "a </script> b"});
        let html = json_ld_script(&value);
        assert!(html.starts_with(r#"<script type="application/ld+json">"#));
        assert!(html.contains(r#"a <\/script> b"#));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_reading_minutes() {
        assert_eq!(reading_minutes(""), 1);
        let long = "word ".repeat(451);
        assert_eq!(reading_minutes(&long), 3);
    }
}
