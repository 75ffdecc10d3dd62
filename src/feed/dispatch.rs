//! Feed format detection: inspect the document root, route to the matching
//! dialect parser, or report the format as a value the caller can render.

use thiserror::Error;

use crate::feed::record::FeedRecord;
use crate::feed::{atom, rss};
use crate::xml::XmlElement;

/// A feed that could not be parsed.
///
/// These are ordinary values, not panics: the caller renders a degraded
/// state for the feed and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The document root is neither `feed` nor `rss`.
    #[error("Unknown feed type ({0})")]
    UnknownFormat(String),

    /// No element tree could be built from the input at all.
    #[error("Malformed feed document: {0}")]
    Malformed(String),
}

/// Parses raw feed XML into a [`FeedRecord`].
///
/// The root element's local name picks the dialect: `feed` is parsed as
/// Atom, `rss` as RSS 2.0. Anything else (including malformed input that
/// still yields a document with an unexpected root) is reported as
/// [`FeedError::UnknownFormat`].
///
/// `source_url` is the URL the document was fetched from; every relative
/// URL in the feed resolves against it.
///
/// # Examples
///
/// ```
/// use broadsheet::{parse_feed, FeedError};
///
/// let feed = parse_feed(
///     "<rss><channel><title>News</title></channel></rss>",
///     "https://example.com/feed.xml",
/// )
/// .unwrap();
/// assert_eq!(feed.title, "News");
///
/// let err = parse_feed("<moo></moo>", "https://example.com/feed.xml").unwrap_err();
/// assert_eq!(err, FeedError::UnknownFormat("moo".to_owned()));
/// ```
pub fn parse_feed(xml: &str, source_url: &str) -> Result<FeedRecord, FeedError> {
    let root = XmlElement::parse(xml).map_err(|e| FeedError::Malformed(e.to_string()))?;

    match root.name() {
        "feed" => {
            tracing::debug!(source_url, "parsing Atom feed");
            Ok(atom::parse_feed_root(&root, source_url))
        }
        "rss" => {
            tracing::debug!(source_url, "parsing RSS feed");
            Ok(rss::parse_rss_root(&root, source_url))
        }
        other => {
            tracing::debug!(source_url, root = other, "unrecognized feed root");
            Err(FeedError::UnknownFormat(other.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_root_is_a_value_error() {
        let err = parse_feed("<moo></moo>", "https://example.com").unwrap_err();
        assert_eq!(err, FeedError::UnknownFormat("moo".to_owned()));
        assert_eq!(err.to_string(), "Unknown feed type (moo)");
    }

    #[test]
    fn test_unparseable_input_is_a_value_error() {
        assert!(matches!(
            parse_feed("<rss><channel>", "https://example.com"),
            Err(FeedError::Malformed(_))
        ));
        assert!(matches!(
            parse_feed("", "https://example.com"),
            Err(FeedError::Malformed(_))
        ));
    }

    #[test]
    fn test_namespaced_atom_root_dispatches() {
        let feed = parse_feed(
            r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>T</title></feed>"#,
            "https://example.com",
        )
        .unwrap();
        assert_eq!(feed.title, "T");
    }
}
