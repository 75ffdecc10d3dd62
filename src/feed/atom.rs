//! Atom (`feed`/`entry`) dialect parser, including the media extensions
//! YouTube layers on top.

use crate::feed::media::render_media_group;
use crate::feed::record::{ArticleRecord, FeedRecord};
use crate::feed::{title_text, UNTITLED_ARTICLE, UNTITLED_FEED};
use crate::util::resolve_url;
use crate::xml::XmlElement;

/// Parses the root `feed` element into a [`FeedRecord`].
///
/// Feed-level fields are selected with the entry scope excluded: entries
/// carry their own `title`/`link`/`updated` elements, and a naive first
/// match in document order would pick those up whenever an entry precedes
/// the feed-level field.
pub(crate) fn parse_feed_root(root: &XmlElement, source_url: &str) -> FeedRecord {
    FeedRecord {
        title: title_text(root.descendant_excluding("title", "entry"), UNTITLED_FEED),
        description: root
            .descendant_excluding("subtitle", "entry")
            .map(|el| el.text())
            .unwrap_or_default(),
        link_url: resolve_url(feed_link(root), source_url),
        updated: root
            .descendant_excluding("updated", "entry")
            .map(|el| el.text()),
        avatar_url: {
            let logo = root
                .descendant_excluding("logo", "entry")
                .map(|el| el.text());
            resolve_url(logo.as_deref(), source_url)
        },
        articles: root
            .descendants("entry")
            .into_iter()
            .map(|entry| parse_entry(entry, source_url))
            .collect(),
    }
}

/// The feed's site link: the first feed-level link that is not the feed's
/// self-reference.
fn feed_link(root: &XmlElement) -> Option<&str> {
    root.descendants_excluding("link", "entry")
        .into_iter()
        .find(|link| link.attr("rel") != Some("self"))
        .and_then(|link| link.attr("href"))
}

fn parse_entry(entry: &XmlElement, source_url: &str) -> ArticleRecord {
    // Content resolution order: primary content, then media fragments
    // appended unconditionally, then the summary, but only when the
    // accumulated result is still fully empty.
    let mut html = content_html(entry.descendant("content")).unwrap_or_default();
    for group in entry.descendants("group") {
        html.push_str(&render_media_group(group));
    }
    let html = if html.is_empty() {
        entry.descendant("summary").map(|el| el.text())
    } else {
        Some(html)
    };

    ArticleRecord {
        // Atom entries are assumed to always carry an id
        id: entry
            .descendant("id")
            .map(|el| el.text())
            .unwrap_or_default(),
        title: title_text(entry.descendant("title"), UNTITLED_ARTICLE),
        link_url: resolve_url(
            entry.descendant("link").and_then(|link| link.attr("href")),
            source_url,
        ),
        updated: entry.descendant("updated").map(|el| el.text()),
        html,
    }
}

/// Atom-style `content` extraction: only `html`/`xhtml` typed nodes count.
/// Literal/CDATA payloads (no element children) pass through verbatim;
/// inline XHTML is re-serialized. Also used by the RSS parser for dialects
/// that embed Atom content nodes in items.
pub(crate) fn content_html(content: Option<&XmlElement>) -> Option<String> {
    let content = content?;
    match content.attr("type") {
        Some("html") | Some("xhtml") => {
            if content.has_element_children() {
                Some(content.inner_xml())
            } else {
                Some(content.text())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE_URL: &str = "https://example.com/feed.xml";

    fn parse(xml: &str) -> FeedRecord {
        let root = XmlElement::parse(xml).unwrap();
        assert_eq!(root.name(), "feed");
        parse_feed_root(&root, SOURCE_URL)
    }

    #[test]
    fn test_feed_level_fields() {
        let feed = parse(
            r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Feed title</title>
  <subtitle>Feed description</subtitle>
  <link href="https://feed/link"/>
  <updated>2024-03-21T00:00:00Z</updated>
  <logo>/logo.png</logo>
</feed>"#,
        );
        assert_eq!(feed.title, "Feed title");
        assert_eq!(feed.description, "Feed description");
        assert_eq!(feed.link_url.as_deref(), Some("https://feed/link"));
        assert_eq!(feed.updated.as_deref(), Some("2024-03-21T00:00:00Z"));
        assert_eq!(
            feed.avatar_url.as_deref(),
            Some("https://example.com/logo.png")
        );
        assert!(feed.articles.is_empty());
    }

    #[test]
    fn test_self_link_never_used() {
        let feed = parse(
            r#"<feed>
  <link href="https://feed/link/self" rel="self" />
  <link href="https://feed/link"/>
</feed>"#,
        );
        assert_eq!(feed.link_url.as_deref(), Some("https://feed/link"));
    }

    #[test]
    fn test_only_self_link_means_no_link() {
        let feed = parse(r#"<feed><link href="https://feed/self" rel="self"/></feed>"#);
        assert_eq!(feed.link_url, None);
    }

    #[test]
    fn test_entry_fields_do_not_leak_into_feed_fields() {
        // the entry precedes the feed-level title here
        let feed = parse(
            "<feed><entry><title>Entry title</title></entry><title>Feed title</title></feed>",
        );
        assert_eq!(feed.title, "Feed title");
        assert_eq!(feed.articles[0].title, "Entry title");
    }

    #[test]
    fn test_missing_title_defaults() {
        let feed = parse("<feed><entry><id>1</id></entry></feed>");
        assert_eq!(feed.title, "Untitled feed");
        assert_eq!(feed.articles[0].title, "Untitled article");
    }

    #[test]
    fn test_title_markup_is_defused() {
        let feed = parse("<feed><title>a &lt;b&gt; c</title></feed>");
        assert_eq!(feed.title, "a &lt;b> c");
    }

    #[test]
    fn test_entry_basic_fields() {
        let feed = parse(
            r#"<feed>
  <entry>
    <title>Article title</title>
    <link href="/post/1"/>
    <updated>2024-03-21T00:00:01Z</updated>
    <id>https://article/id</id>
  </entry>
</feed>"#,
        );
        let article = &feed.articles[0];
        assert_eq!(article.id, "https://article/id");
        assert_eq!(article.title, "Article title");
        assert_eq!(
            article.link_url.as_deref(),
            Some("https://example.com/post/1")
        );
        assert_eq!(article.updated.as_deref(), Some("2024-03-21T00:00:01Z"));
    }

    #[test]
    fn test_cdata_content_passes_through_verbatim() {
        let feed = parse(
            r#"<feed><entry><content type="html"><![CDATA[<h1>X</h1>]]></content></entry></feed>"#,
        );
        assert_eq!(feed.articles[0].html.as_deref().map(str::trim), Some("<h1>X</h1>"));
    }

    #[test]
    fn test_inline_xhtml_content_is_serialized() {
        let feed = parse(
            r#"<feed><entry><content type="xhtml"><div><p>Hi</p></div></content></entry></feed>"#,
        );
        assert_eq!(
            feed.articles[0].html.as_deref(),
            Some("<div><p>Hi</p></div>")
        );
    }

    #[test]
    fn test_untyped_content_is_ignored() {
        let feed = parse(
            r#"<feed><entry><content type="text">plain</content><summary>S</summary></entry></feed>"#,
        );
        assert_eq!(feed.articles[0].html.as_deref(), Some("S"));
    }

    #[test]
    fn test_media_fragments_appended_after_content() {
        let feed = parse(
            r#"<feed xmlns:media="http://search.yahoo.com/mrss/">
  <entry>
    <content type="html"><![CDATA[<p>Primary</p>]]></content>
    <media:group>
      <media:title>Clip</media:title>
      <media:content url="https://m/pic.png" type="image/png"/>
      <media:description>About the clip</media:description>
    </media:group>
  </entry>
</feed>"#,
        );
        let html = feed.articles[0].html.as_deref().unwrap();
        let primary = html.find("<p>Primary</p>").unwrap();
        let fragment = html.find("<section>").unwrap();
        assert!(primary < fragment);
        assert!(html.contains(r#"<img src="https://m/pic.png" />"#));
    }

    #[test]
    fn test_summary_fallback_only_when_fully_empty() {
        let feed = parse("<feed><entry><summary>Summary text</summary></entry></feed>");
        assert_eq!(feed.articles[0].html.as_deref(), Some("Summary text"));

        // media fragment present: summary must NOT override it
        let feed = parse(
            r#"<feed>
  <entry>
    <summary>Summary text</summary>
    <group><content url="https://m/p.png" type="image/png"/></group>
  </entry>
</feed>"#,
        );
        let html = feed.articles[0].html.as_deref().unwrap();
        assert!(html.contains("<img"));
        assert!(!html.contains("Summary text"));
    }

    #[test]
    fn test_no_content_at_all_is_none() {
        let feed = parse("<feed><entry><id>1</id></entry></feed>");
        assert_eq!(feed.articles[0].html, None);
    }
}
