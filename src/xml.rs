//! Owned XML document tree for feed parsing.
//!
//! Feed dialects in the wild disagree about namespaces, nesting and
//! well-formedness, so the dialect parsers work over a small owned tree
//! instead of a streaming reader: scoped lookups ("the feed-level title,
//! not the copy nested inside an entry") need arbitrary re-traversal.
//!
//! Element and attribute names keep only their local part. `media:group`
//! and `group` are the same element as far as the tree is concerned, which
//! is exactly the tolerance the parsers need for media-extended feeds.

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Maximum element nesting depth. Prevents stack exhaustion from
/// maliciously nested documents; real feeds stay in single digits.
const MAX_XML_DEPTH: usize = 64;

/// Errors that can occur while building a document tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The underlying reader rejected the input.
    #[error("XML syntax error: {0}")]
    Syntax(String),

    /// Element nesting exceeds the depth cap.
    #[error("element nesting exceeds maximum of {0} levels")]
    TooDeep(usize),

    /// The input contained no element at all.
    #[error("document has no root element")]
    NoRoot,
}

/// One element in a parsed document: local name, attributes in document
/// order, and child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    /// Parses an XML document and returns its root element.
    ///
    /// Each call builds a private tree and hands it to the caller; nothing
    /// is shared or cached across calls. Namespace prefixes on element and
    /// attribute names are dropped during the build, and `xmlns`
    /// declarations are not recorded as attributes.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the reader hits a syntax error (mismatched
    /// tags, an unknown entity reference), if nesting exceeds the depth
    /// cap, or if the input holds no element at all.
    /// Custom `<!ENTITY>` declarations are never expanded: `quick-xml`
    /// (0.37) resolves only the five XML builtins, so XXE payloads surface
    /// as syntax errors instead of file contents.
    pub fn parse(text: &str) -> Result<XmlElement, XmlError> {
        let mut reader = Reader::from_str(text);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if stack.len() >= MAX_XML_DEPTH {
                        return Err(XmlError::TooDeep(MAX_XML_DEPTH));
                    }
                    stack.push(element_from_start(&e, &reader)?);
                }
                Ok(Event::Empty(e)) => {
                    let element = element_from_start(&e, &reader)?;
                    attach(&mut stack, &mut root, element);
                }
                Ok(Event::End(_)) => {
                    // check_end_names is on by default, so the matching
                    // Start event is on top of the stack
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element);
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|e| XmlError::Syntax(e.to_string()))?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(text.into_owned()));
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e).into_owned();
                        parent.children.push(XmlNode::Text(text));
                    }
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, DOCTYPE and processing
                // instructions carry nothing the parsers look at
                Ok(_) => {}
                Err(e) => return Err(XmlError::Syntax(e.to_string())),
            }
        }

        root.ok_or(XmlError::NoRoot)
    }

    /// Local name of this element (`group` for `media:group`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute with the given local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements, document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First descendant element with the given local name, document order.
    pub fn descendant(&self, name: &str) -> Option<&XmlElement> {
        for element in self.child_elements() {
            if element.name == name {
                return Some(element);
            }
            if let Some(found) = element.descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendant elements with the given local name, document order.
    pub fn descendants(&self, name: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        self.collect_descendants(name, &mut out);
        out
    }

    /// First descendant named `name` that is not inside a subtree rooted at
    /// an element named `scope`.
    ///
    /// This is the "feed-level, not entry-level" lookup. Entries and items
    /// carry elements named like their feed-level counterparts, and a
    /// first-match-in-document search would pick those up whenever an entry
    /// precedes the feed-level field, so the entry scope is excluded
    /// structurally rather than by match order.
    pub fn descendant_excluding(&self, name: &str, scope: &str) -> Option<&XmlElement> {
        for element in self.child_elements() {
            if element.name == scope {
                continue;
            }
            if element.name == name {
                return Some(element);
            }
            if let Some(found) = element.descendant_excluding(name, scope) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants named `name` outside any subtree rooted at `scope`,
    /// document order.
    pub fn descendants_excluding(&self, name: &str, scope: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        self.collect_descendants_excluding(name, scope, &mut out);
        out
    }

    /// Concatenated text of this element and all descendants, in document
    /// order (DOM `textContent` semantics; whitespace preserved).
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    /// Whether any direct child is an element (as opposed to text-only
    /// content such as a CDATA payload).
    pub fn has_element_children(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Child markup re-serialized as a string. Namespace prefixes were
    /// dropped at build time, so serialized names are local names.
    pub fn inner_xml(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            write_node(&mut out, node);
        }
        out
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlElement>) {
        for element in self.child_elements() {
            if element.name == name {
                out.push(element);
            }
            element.collect_descendants(name, out);
        }
    }

    fn collect_descendants_excluding<'a>(
        &'a self,
        name: &str,
        scope: &str,
        out: &mut Vec<&'a XmlElement>,
    ) {
        for element in self.child_elements() {
            if element.name == scope {
                continue;
            }
            if element.name == name {
                out.push(element);
            }
            element.collect_descendants_excluding(name, scope, out);
        }
    }

    fn push_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.push_text(out),
            }
        }
    }
}

fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        // Only the first top-level element counts as the root; anything
        // after it in a malformed multi-root document is dropped
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn element_from_start(
    e: &quick_xml::events::BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<XmlElement, XmlError> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

    let mut attrs = Vec::new();
    for attr_result in e.attributes() {
        let attr = match attr_result {
            Ok(attr) => attr,
            Err(err) => {
                tracing::warn!(element = %name, error = %err, "skipping malformed attribute");
                continue;
            }
        };
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(|e| XmlError::Syntax(e.to_string()))?
            .into_owned();
        attrs.push((key, value));
    }

    Ok(XmlElement {
        name,
        attrs,
        children: Vec::new(),
    })
}

fn write_node(out: &mut String, node: &XmlNode) {
    match node {
        XmlNode::Text(text) => out.push_str(&quick_xml::escape::escape(text.as_str())),
        XmlNode::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for (key, value) in &element.attrs {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&quick_xml::escape::escape(value.as_str()));
                out.push('"');
            }
            if element.children.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for child in &element.children {
                    write_node(out, child);
                }
                out.push_str("</");
                out.push_str(&element.name);
                out.push('>');
            }
        }
    }
}
