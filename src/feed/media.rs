//! Rendering of media-extension groups (Media RSS, YouTube's Atom
//! extension) into HTML fragments.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::xml::XmlElement;

/// Renders one media group node into a fixed HTML fragment: a header with
/// the group's title and a figure holding the rendered content plus a
/// caption with the group's description.
///
/// The fragment never silently disappears: when no usable URL exists at
/// all, the figure carries the literal text `(Unrecognised media)`.
pub(crate) fn render_media_group(group: &XmlElement) -> String {
    let title = group
        .descendant("title")
        .map(|el| el.text())
        .unwrap_or_default();
    let description = group
        .descendant("description")
        .map(|el| el.text())
        .unwrap_or_default();
    let body = render_media_content(group.descendant("content"), group.descendant("thumbnail"));

    format!(
        r#"
    <section>
      <header>{title}</header>
      <figure>
        {body}
        <figcaption>{caption}</figcaption>
      </figure>
    </section>
  "#,
        title = encode_text(&title),
        body = body,
        caption = encode_text(&description),
    )
}

/// Content-rendering policy, in order: inline image for image-typed (or
/// untyped) content, then thumbnail plus "Open media" link, then a bare
/// "Open media" link, then the explicit fallback notice. A visual
/// placeholder always wins over a bare link when one is available.
fn render_media_content(
    content: Option<&XmlElement>,
    thumbnail: Option<&XmlElement>,
) -> String {
    let url = content.and_then(|el| el.attr("url"));
    let media_type = content.and_then(|el| el.attr("type"));

    if let Some(url) = url {
        let renders_inline = media_type.map_or(true, |t| t.starts_with("image/"));
        if renders_inline {
            return format!(r#"<img src="{}" />"#, encode_double_quoted_attribute(url));
        }
    }

    if let Some(thumb_url) = thumbnail.and_then(|el| el.attr("url")) {
        let mut out = format!(
            r#"<img src="{}" />"#,
            encode_double_quoted_attribute(thumb_url)
        );
        if let Some(url) = url {
            out.push_str(&format!(
                r#"<p><a href="{}">Open media</a></p>"#,
                encode_double_quoted_attribute(url)
            ));
        }
        return out;
    }

    if let Some(url) = url {
        return format!(
            r#"<a href="{}" type="{}">Open media</a>"#,
            encode_double_quoted_attribute(url),
            encode_double_quoted_attribute(media_type.unwrap_or_default()),
        );
    }

    "<p>(Unrecognised media)</p>".to_owned()
}
