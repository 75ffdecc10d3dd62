//! Deny-list HTML sanitizer for untrusted feed content.
//!
//! Article HTML arrives straight out of arbitrary feeds. Before a
//! rendering layer sees it, three classes of injection are neutralized
//! over a parsed content tree: script-bearing elements, event-handler and
//! data-carrier attributes, and script-protocol navigation targets.
//! Everything visual survives. This is a deny-list over a bounded,
//! inspectable tag/attribute set, deliberately not a general-purpose
//! allow-list sanitizer.
//!
//! Each call parses its own private tree (via `scraper`/html5ever) and
//! re-serializes it through the policy; no live document is shared or
//! mutated across calls.

use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{ElementRef, Html, Node};
use url::Url;

/// Elements removed outright, subtree included.
const DISALLOWED_ELEMENTS: [&str; 5] = ["script", "meta", "style", "template", "slot"];

/// Elements that never take an end tag when serialized.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Substituted for absent article content, so sanitization always runs
/// through the single code path.
const EMPTY_CONTENT_PLACEHOLDER: &str = "(Article has no content)";

/// Sanitizes an HTML fragment for display.
///
/// Returns a single markup string beginning with
/// `<base href="{source_url}" target="_blank">`, so any retained relative
/// URL resolves against the content's origin and every retained link opens
/// outside the hosting document's browsing context.
///
/// The policy, applied to the parsed fragment tree:
///
/// 1. `script`, `meta`, `style`, `template` and `slot` elements are
///    removed entirely.
/// 2. Attributes named `on*` (any case), `data-*`, or exactly `slot` are
///    removed from every element.
/// 3. An `href` on anchors and area-map regions, or an `action` on forms,
///    that resolves against `source_url` to a `javascript:` URL is removed
///    outright, not merely disabled. Values that fail to resolve cannot
///    navigate and are left untouched; one bad URL never aborts the rest
///    of the fragment.
///
/// # Examples
///
/// ```
/// use broadsheet::sanitize;
///
/// let safe = sanitize(
///     Some(r#"<p onclick="alert(1)">Hi<script>alert(2)</script></p>"#),
///     "https://example.com/",
/// );
/// assert_eq!(
///     safe,
///     r#"<base href="https://example.com/" target="_blank"><p>Hi</p>"#
/// );
/// ```
pub fn sanitize(html: Option<&str>, source_url: &str) -> String {
    let fragment = Html::parse_fragment(html.unwrap_or(EMPTY_CONTENT_PLACEHOLDER));
    let base = Url::parse(source_url).ok();

    let mut out = format!(
        r#"<base href="{}" target="_blank">"#,
        encode_double_quoted_attribute(source_url)
    );
    write_children(&mut out, fragment.root_element(), base.as_ref());
    out
}

/// Extracts the plain text of an HTML fragment, markup stripped.
///
/// RSS channel descriptions often contain HTML that must not leak into
/// plain-summary contexts.
pub(crate) fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}

fn write_children(out: &mut String, parent: ElementRef<'_>, base: Option<&Url>) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => {
                let text: &str = &text.text;
                out.push_str(&encode_text(text));
            }
            Node::Comment(comment) => {
                let comment: &str = &comment.comment;
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    write_element(out, element, base);
                }
            }
            _ => {}
        }
    }
}

fn write_element(out: &mut String, element: ElementRef<'_>, base: Option<&Url>) {
    let name = element.value().name();
    if DISALLOWED_ELEMENTS.contains(&name) {
        tracing::debug!(element = name, "removed disallowed element");
        return;
    }

    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs() {
        if removes(name, attr, value, base) {
            continue;
        }
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    write_children(out, element, base);

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// The attribute deny policy: event handlers in any case form, `data-`
/// carriers, slot assignment, and script-protocol navigation targets.
fn removes(element: &str, attr: &str, value: &str, base: Option<&Url>) -> bool {
    let lower = attr.to_ascii_lowercase();
    if lower.starts_with("on") || lower.starts_with("data-") || lower == "slot" {
        tracing::debug!(element, attribute = attr, "removed disallowed attribute");
        return true;
    }

    let navigates = (lower == "href" && matches!(element, "a" | "area"))
        || (lower == "action" && element == "form");
    if navigates && is_script_url(value, base) {
        tracing::debug!(element, attribute = attr, "removed script-protocol target");
        return true;
    }

    false
}

/// Does this attribute value resolve to a `javascript:` URL? Values that
/// fail to resolve count as non-script: a broken URL cannot navigate.
fn is_script_url(value: &str, base: Option<&Url>) -> bool {
    let resolved = match base {
        Some(base) => base.join(value),
        None => Url::parse(value),
    };
    matches!(resolved, Ok(url) if url.scheme().eq_ignore_ascii_case("javascript"))
}
