//! OPML subscription-list parsing.
//!
//! One OPML document in, source metadata plus an ordered list of feed
//! outlines out. Fetching the OPML document, and later each feed it
//! names, is the caller's concern; outline URLs pass through unjudged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feed::UNTITLED_FEED;
use crate::xml::XmlElement;

/// Errors that can occur during OPML parsing.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// No element tree could be built from the input.
    #[error("malformed OPML document: {0}")]
    Malformed(String),
}

/// One parsed OPML subscription document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    /// `head`-level document title.
    pub title: Option<String>,
    /// `head`-level creation date, raw text.
    pub date_created: Option<String>,
    /// The URL the document was fetched from, carried through verbatim.
    /// External cache keys combine it with each feed's own URL.
    pub url: String,
    /// Feed outlines in document order.
    pub outlines: Vec<Outline>,
}

/// One subscribed feed from an OPML body: an `<outline type="rss">`
/// element at any nesting depth. Folder outlines are traversed but not
/// emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    /// From the `text` attribute; `"Untitled feed"` when absent.
    pub title: String,
    /// From the `description` attribute; empty when absent.
    #[serde(default)]
    pub description: String,
    /// URL of the feed XML itself (`xmlUrl`).
    pub xml_url: Option<String>,
    /// URL of the feed's website (`htmlUrl`).
    pub site_url: Option<String>,
    pub language: Option<String>,
}

/// Parses an OPML document into its metadata and feed outlines.
///
/// # Errors
///
/// Returns [`OutlineError::Malformed`] when no document tree can be built.
/// A well-formed document that merely lacks a `head` or `body` yields an
/// empty [`SourceDocument`] instead.
pub fn parse_outline_document(xml: &str, source_url: &str) -> Result<SourceDocument, OutlineError> {
    let root = XmlElement::parse(xml).map_err(|e| OutlineError::Malformed(e.to_string()))?;

    let head = root.descendant("head");
    let outlines = root
        .descendant("body")
        .map(|body| {
            body.descendants("outline")
                .into_iter()
                .filter(|outline| outline.attr("type") == Some("rss"))
                .map(parse_outline)
                .collect()
        })
        .unwrap_or_default();

    Ok(SourceDocument {
        title: head.and_then(|h| h.descendant("title")).map(|el| el.text()),
        date_created: head
            .and_then(|h| h.descendant("dateCreated"))
            .map(|el| el.text()),
        url: source_url.to_owned(),
        outlines,
    })
}

fn parse_outline(outline: &XmlElement) -> Outline {
    Outline {
        title: outline
            .attr("text")
            .map(str::to_owned)
            .unwrap_or_else(|| UNTITLED_FEED.to_owned()),
        description: outline.attr("description").unwrap_or_default().to_owned(),
        xml_url: outline.attr("xmlUrl").map(str::to_owned),
        site_url: outline.attr("htmlUrl").map(str::to_owned),
        language: outline.attr("language").map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subscription_document() {
        let doc = parse_outline_document(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<opml version="2.0">
  <head>
    <title>My subscriptions</title>
    <dateCreated>Mon, 08 Apr 2024 10:00:00 +0100</dateCreated>
  </head>
  <body>
    <outline type="rss" text="Example Blog" description="A blog"
             xmlUrl="https://example.com/feed.xml" htmlUrl="https://example.com" language="en"/>
    <outline type="rss" text="Minimal" xmlUrl="https://minimal.example/rss"/>
  </body>
</opml>"#,
            "https://example.com/subscriptions.opml",
        )
        .unwrap();

        assert_eq!(doc.title.as_deref(), Some("My subscriptions"));
        assert_eq!(
            doc.date_created.as_deref(),
            Some("Mon, 08 Apr 2024 10:00:00 +0100")
        );
        assert_eq!(doc.url, "https://example.com/subscriptions.opml");
        assert_eq!(doc.outlines.len(), 2);

        assert_eq!(doc.outlines[0].title, "Example Blog");
        assert_eq!(doc.outlines[0].description, "A blog");
        assert_eq!(
            doc.outlines[0].xml_url.as_deref(),
            Some("https://example.com/feed.xml")
        );
        assert_eq!(
            doc.outlines[0].site_url.as_deref(),
            Some("https://example.com")
        );
        assert_eq!(doc.outlines[0].language.as_deref(), Some("en"));

        assert_eq!(doc.outlines[1].description, "");
        assert_eq!(doc.outlines[1].site_url, None);
    }

    #[test]
    fn test_nested_folders_are_traversed_in_document_order() {
        let doc = parse_outline_document(
            r#"<opml><body>
  <outline text="Folder">
    <outline type="rss" text="First" xmlUrl="https://a/feed"/>
    <outline text="Subfolder">
      <outline type="rss" text="Second" xmlUrl="https://b/feed"/>
    </outline>
  </outline>
  <outline type="rss" text="Third" xmlUrl="https://c/feed"/>
</body></opml>"#,
            "https://example.com/subs.opml",
        )
        .unwrap();

        let titles: Vec<&str> = doc.outlines.iter().map(|o| o.title.as_str()).collect();
        // folder outlines (no type="rss") are traversed, not emitted
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_missing_text_attribute_defaults_title() {
        let doc = parse_outline_document(
            r#"<opml><body><outline type="rss" xmlUrl="https://a/feed"/></body></opml>"#,
            "https://example.com/subs.opml",
        )
        .unwrap();
        assert_eq!(doc.outlines[0].title, "Untitled feed");
    }

    #[test]
    fn test_document_without_head_or_body() {
        let doc = parse_outline_document("<opml/>", "https://example.com/subs.opml").unwrap();
        assert_eq!(doc.title, None);
        assert!(doc.outlines.is_empty());
    }

    #[test]
    fn test_malformed_document_is_a_value_error() {
        assert!(matches!(
            parse_outline_document("<opml><body>", "https://example.com/subs.opml"),
            Err(OutlineError::Malformed(_))
        ));
    }
}
