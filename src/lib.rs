//! broadsheet: feed ingestion and sanitization core.
//!
//! Two cooperating subsystems turn untrusted syndication data into
//! something a rendering layer can show:
//!
//! - **Feed parsing** ([`feed`]): detects the document format (Atom,
//!   RSS 2.0, and real-world dialect variants such as media-extended RSS,
//!   YouTube's Atom extension, and loosely-conformant social-platform
//!   feeds) and produces a canonical [`FeedRecord`] of the feed and its
//!   articles. Unrecognized formats come back as an error *value*, never
//!   a panic.
//! - **HTML sanitization** ([`sanitize`](mod@sanitize)): neutralizes
//!   script elements, event-handler attributes and script-protocol
//!   navigation in article HTML via a deny-list policy over a parsed
//!   content tree, while preserving visual content.
//!
//! Everything here is a synchronous, side-effect-free transform over its
//! inputs: no network I/O, no shared state, no caches. Calls may run
//! concurrently without coordination; each allocates and discards its own
//! working tree. Bounding input size is the caller's responsibility.
//!
//! # Example
//!
//! ```
//! use broadsheet::{parse_feed, sanitize};
//!
//! let xml = r#"<rss><channel>
//!   <title>News</title>
//!   <link>https://example.com/</link>
//!   <item>
//!     <guid>1</guid>
//!     <title>Hello</title>
//!     <description><![CDATA[<p>Hi <a href="javascript:alert(1)">there</a></p>]]></description>
//!   </item>
//! </channel></rss>"#;
//!
//! let feed = parse_feed(xml, "https://example.com/feed.xml").unwrap();
//! assert_eq!(feed.title, "News");
//!
//! let article = &feed.articles[0];
//! let safe = sanitize(article.html.as_deref(), feed.link_url.as_deref().unwrap_or(""));
//! assert!(safe.starts_with("<base"));
//! assert!(!safe.contains("javascript:"));
//! ```

pub mod feed;
pub mod sanitize;
pub mod util;
pub mod xml;

pub use feed::{parse_feed, ArticleRecord, FeedError, FeedRecord};
pub use sanitize::sanitize;
