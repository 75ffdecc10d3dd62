//! Utility functions shared across the parsing and sanitizing subsystems.
//!
//! # Examples
//!
//! ```
//! use broadsheet::util::resolve_url;
//!
//! // Resolve an article link against its feed's URL
//! let link = resolve_url(Some("/post/1"), "https://example.com/feed.xml");
//! assert_eq!(link.as_deref(), Some("https://example.com/post/1"));
//! ```

mod url;

pub use url::resolve_url;
