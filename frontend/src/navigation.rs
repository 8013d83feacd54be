/// Element id targeted by an in-page link, e.g. `#pricing` -> `pricing`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Outbound call-to-action links whose clicks are tracked.
pub fn is_tracked_cta(href: &str, pattern: &str) -> bool {
    !pattern.is_empty() && href.contains(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors() {
        assert_eq!(anchor_target("#faq"), Some("faq"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/pricing#faq"), None);
        assert_eq!(anchor_target("https://example.com"), None);
    }

    #[test]
    fn cta_pattern() {
        assert!(is_tracked_cta("https://invideo.sjv.io/abc", "invideo.sjv.io"));
        assert!(!is_tracked_cta("https://example.com", "invideo.sjv.io"));
        assert!(!is_tracked_cta("https://example.com", ""));
    }
}
