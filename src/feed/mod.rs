//! Feed ingestion: format detection, dialect parsers and canonical records.
//!
//! This module converts raw syndication XML into a uniform data shape:
//!
//! - [`parse_feed`] - Detect the format (Atom or RSS 2.0, including
//!   media-extended and loosely-conformant dialects) and produce a
//!   [`FeedRecord`]
//! - [`parse_outline_document`] - Parse an OPML subscription list into
//!   feed [`Outline`]s for the caller to fetch
//!
//! # Architecture
//!
//! The dispatcher inspects the document root and routes to one of two
//! dialect parsers; both work over the owned tree in [`crate::xml`] and
//! share the URL resolver and the media fragment renderer. No network I/O
//! happens anywhere in this module; callers fetch, this module
//! transforms.
//!
//! # Example
//!
//! ```
//! use broadsheet::feed::parse_feed;
//!
//! let xml = r#"<rss><channel>
//!   <title>News</title>
//!   <item><guid>1</guid><title>Hello</title></item>
//! </channel></rss>"#;
//!
//! let feed = parse_feed(xml, "https://example.com/feed.xml").unwrap();
//! assert_eq!(feed.title, "News");
//! assert_eq!(feed.articles[0].id, "1");
//! ```

mod atom;
mod dispatch;
mod media;
mod outline;
mod record;
mod rss;

pub use dispatch::{parse_feed, FeedError};
pub use outline::{parse_outline_document, Outline, OutlineError, SourceDocument};
pub use record::{ArticleRecord, FeedRecord};

pub(crate) const UNTITLED_FEED: &str = "Untitled feed";
pub(crate) const UNTITLED_ARTICLE: &str = "Untitled article";

use crate::xml::XmlElement;

/// Title text with the defensive transform applied: feed titles sometimes
/// carry unescaped markup, so every literal `<` becomes `&lt;`. Narrower
/// than HTML escaping on purpose; full escaping is the sanitizer's job.
/// Empty or missing titles take the fallback.
pub(crate) fn title_text(element: Option<&XmlElement>, fallback: &str) -> String {
    match element {
        Some(element) => {
            let text = element.text();
            if text.is_empty() {
                fallback.to_owned()
            } else {
                text.replace('<', "&lt;")
            }
        }
        None => fallback.to_owned(),
    }
}
