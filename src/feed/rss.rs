//! RSS 2.0 (`rss`/`channel`/`item`) dialect parser, tolerant of the
//! Atom-isms social platforms mix into their feeds.

use uuid::Uuid;

use crate::feed::record::{ArticleRecord, FeedRecord};
use crate::feed::{title_text, UNTITLED_ARTICLE, UNTITLED_FEED};
use crate::sanitize::plain_text;
use crate::util::resolve_url;
use crate::xml::XmlElement;

/// Parses the root `rss` element into a [`FeedRecord`].
///
/// Channel-level fields exclude item-scoped duplicates the same way the
/// Atom parser excludes entry-scoped ones.
pub(crate) fn parse_rss_root(root: &XmlElement, source_url: &str) -> FeedRecord {
    FeedRecord {
        title: title_text(root.descendant_excluding("title", "item"), UNTITLED_FEED),
        // Channel descriptions routinely contain HTML; the record's
        // description is plain text
        description: root
            .descendant_excluding("description", "item")
            .map(|el| plain_text(&el.text()))
            .unwrap_or_default(),
        link_url: resolve_url(channel_link(root).as_deref(), source_url),
        updated: root.descendant("lastBuildDate").map(|el| el.text()),
        avatar_url: {
            let image_url = root
                .descendant_excluding("image", "item")
                .and_then(|image| image.descendant("url"))
                .map(|el| el.text());
            resolve_url(image_url.as_deref(), source_url)
        },
        articles: root
            .descendants("item")
            .into_iter()
            .map(|item| parse_item(item, source_url))
            .collect(),
    }
}

/// Link target of a single `link` element. Some dialects emit Atom-style
/// `<link href="…"/>` inside RSS, so element text wins and the `href`
/// attribute is the fallback when the text is empty.
fn link_target(link: &XmlElement) -> Option<String> {
    let text = link.text();
    if !text.is_empty() {
        return Some(text);
    }
    link.attr("href").map(str::to_owned)
}

fn channel_link(root: &XmlElement) -> Option<String> {
    root.descendants_excluding("link", "item")
        .into_iter()
        .find(|link| link.attr("rel") != Some("self"))
        .and_then(link_target)
}

fn parse_item(item: &XmlElement, source_url: &str) -> ArticleRecord {
    let link_url = resolve_url(
        item.descendant("link").and_then(link_target).as_deref(),
        source_url,
    );

    // guid text, else the resolved link, else a one-off token. The token is
    // deliberately random per parse (not derived from the item), so such
    // articles change identity on every refetch.
    let id = match item.descendant("guid") {
        Some(guid) => guid.text(),
        None => match &link_url {
            Some(link) => link.clone(),
            None => {
                let token = Uuid::new_v4().to_string();
                tracing::warn!(source_url, "item has no guid or link; generated one-off id");
                token
            }
        },
    };

    // description wins even when empty; the Atom-style content node is only
    // consulted when no description element exists at all
    let html = match item.descendant("description") {
        Some(description) => Some(description.text()),
        None => super::atom::content_html(item.descendant("content")),
    };

    ArticleRecord {
        id,
        title: title_text(item.descendant("title"), UNTITLED_ARTICLE),
        link_url,
        updated: item_updated(item),
        html,
    }
}

fn item_updated(item: &XmlElement) -> Option<String> {
    item.descendant("pubDate")
        .map(|el| el.text())
        .filter(|text| !text.is_empty())
        .or_else(|| item.descendant("published").map(|el| el.text()))
}
