use url::Url;

/// Resolves a possibly-relative URL against a base URL, tolerantly.
///
/// Feeds routinely carry malformed, scheme-relative or outright broken
/// URLs, and a resolution failure must never abort parsing: on any
/// construction failure the original string passes through unchanged.
/// Absent input passes through as absent.
///
/// # Examples
///
/// ```
/// use broadsheet::util::resolve_url;
///
/// assert_eq!(
///     resolve_url(Some("/post/1"), "https://example.com/feed.xml"),
///     Some("https://example.com/post/1".to_owned())
/// );
///
/// // Construction failure leaves the value untouched
/// assert_eq!(
///     resolve_url(Some("::not a url::"), "also not a url"),
///     Some("::not a url::".to_owned())
/// );
///
/// assert_eq!(resolve_url(None, "https://example.com"), None);
/// ```
pub fn resolve_url(url: Option<&str>, base: &str) -> Option<String> {
    let url = url?;
    match Url::parse(base).and_then(|base| base.join(url)) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(error) => {
            tracing::debug!(url, base, %error, "leaving URL unresolved");
            Some(url.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_against_base() {
        assert_eq!(
            resolve_url(Some("/feed/avatar.png"), "https://example.com/feed.xml"),
            Some("https://example.com/feed/avatar.png".to_owned())
        );
        assert_eq!(
            resolve_url(Some("post/1"), "https://example.com/blog/feed.xml"),
            Some("https://example.com/blog/post/1".to_owned())
        );
    }

    #[test]
    fn test_absolute_url_wins_over_base() {
        assert_eq!(
            resolve_url(Some("https://other.com/x"), "https://example.com"),
            Some("https://other.com/x".to_owned())
        );
    }

    #[test]
    fn test_scheme_relative_url() {
        assert_eq!(
            resolve_url(Some("//cdn.example.com/a.png"), "https://example.com"),
            Some("https://cdn.example.com/a.png".to_owned())
        );
    }

    #[test]
    fn test_unresolvable_input_passes_through() {
        // neither side parses; the caller still gets its string back
        assert_eq!(
            resolve_url(Some("not a url"), "also not a url"),
            Some("not a url".to_owned())
        );
    }

    #[test]
    fn test_none_in_none_out() {
        assert_eq!(resolve_url(None, "https://example.com"), None);
    }
}
