//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/label-printers") // -> "/blog/label-printers"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog") // -> "https://resaleedge.com/blog"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Absolute URL for an asset that may already be absolute
pub fn absolute_asset_url(config: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
        path.to_string()
    } else {
        full_url_for(config, path)
    }
}

pub fn post_path(slug: &str) -> String {
    format!("/blog/{}", encode_segment(slug))
}

pub fn topic_path(slug: &str) -> String {
    format!("/topics/{}", encode_segment(slug))
}

pub fn category_path(slug: &str) -> String {
    format!("/category/{}", encode_segment(slug))
}

pub fn redirect_path(short_code: &str) -> String {
    format!("/go/{}", encode_segment(short_code))
}

/// Whether `segment` can be published as one path segment under a route
/// prefix: non-empty, no separators, not `.` or `..`, no control characters
pub fn is_route_segment(segment: &str) -> bool {
    !segment.trim().is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
        && !segment.chars().any(char::is_control)
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Characters escaped inside a path segment; unreserved ones stay readable
const SEGMENT: &percent_encoding::AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        config.root = "/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/blog"), "/blog");
        assert_eq!(url_for(&config, ""), "/");

        let mut nested = test_config();
        nested.root = "/site/".to_string();
        assert_eq!(url_for(&nested, "topics/x"), "/site/topics/x");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(full_url_for(&config, "/blog/a"), "https://example.com/blog/a");
        assert_eq!(full_url_for(&config, "/"), "https://example.com/");
    }

    #[test]
    fn test_absolute_asset_url() {
        let config = test_config();
        assert_eq!(
            absolute_asset_url(&config, "/images/logo.png"),
            "https://example.com/images/logo.png"
        );
        assert_eq!(
            absolute_asset_url(&config, "https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(post_path("best-scales"), "/blog/best-scales");
        assert_eq!(topic_path("hardware"), "/topics/hardware");
        assert_eq!(category_path("shipping"), "/category/shipping");
        assert_eq!(redirect_path("rollo"), "/go/rollo");
        assert_eq!(post_path("a b/c"), "/blog/a%20b%2Fc");
    }

    #[test]
    fn test_is_route_segment() {
        assert!(is_route_segment("best-scales"));
        assert!(is_route_segment("v1.2"));
        assert!(is_route_segment("a b"));
        assert!(!is_route_segment(""));
        assert!(!is_route_segment(" "));
        assert!(!is_route_segment("."));
        assert!(!is_route_segment(".."));
        assert!(!is_route_segment("../../../escaped"));
        assert!(!is_route_segment("a/b"));
        assert!(!is_route_segment("a\\b"));
        assert!(!is_route_segment("a\nb"));
    }
}
