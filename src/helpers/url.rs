//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left as-is in a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/assets/style.css") // -> "/site/assets/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = root_prefix(config);
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
/// full_url_for(&config, "/blog/") // -> "https://example.com/site/blog/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Path of a post page relative to the root, with the slug encoded
pub fn post_path(slug: &str) -> String {
    format!("blog/{}/", encode_segment(slug))
}

/// URL of a post page
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &post_path(slug))
}

/// Percent-encode a single URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Root path with a leading slash and no trailing slash; empty when the
/// site lives at `/`
pub fn root_prefix(config: &SiteConfig) -> String {
    let root = config.root.trim_matches('/');
    if root.is_empty() {
        String::new()
    } else {
        format!("/{}", root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/site/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/assets/style.css"), "/site/assets/style.css");
        assert_eq!(url_for(&config, "contact/"), "/site/contact/");
        assert_eq!(url_for(&config, ""), "/site/");
    }

    #[test]
    fn test_root_without_slashes() {
        let config = SiteConfig {
            root: "site".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(root_prefix(&config), "/site");
        assert_eq!(url_for(&config, "blog/"), "/site/blog/");
    }

    #[test]
    fn test_url_for_default_root() {
        let config = SiteConfig::default();
        assert_eq!(url_for(&config, "/blog/"), "/blog/");
        assert_eq!(url_for(&config, "/"), "/");
        assert_eq!(root_prefix(&config), "");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/"),
            "https://example.com/site/blog/"
        );
    }

    #[test]
    fn test_post_url() {
        let config = test_config();
        assert_eq!(post_url(&config, "hello-world"), "/site/blog/hello-world/");
    }

    #[test]
    fn test_post_url_encodes_slug() {
        let config = SiteConfig::default();
        assert_eq!(post_url(&config, "what?now"), "/blog/what%3Fnow/");
        assert_eq!(post_url(&config, "café notes"), "/blog/caf%C3%A9%20notes/");
        assert_eq!(post_url(&config, "v1.2_final~x"), "/blog/v1.2_final~x/");
        assert_eq!(post_path("a#b"), "blog/a%23b/");
    }
}
