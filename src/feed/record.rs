use serde::{Deserialize, Serialize};

// ============================================================================
// Canonical Records
// ============================================================================

/// Canonical record of one parsed feed.
///
/// Produced fresh by a single parse call; ownership transfers entirely to
/// the caller. Serializes to the camelCase JSON shape the caching layer
/// persists (`linkUrl`, `avatarUrl`, `articles`, …); truncating the article
/// list for storage is the collaborator's job, not this crate's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRecord {
    /// Never empty; `"Untitled feed"` when the document carries no title.
    pub title: String,

    /// Plain text for RSS (channel descriptions often contain markup, which
    /// is stripped), raw subtitle text for Atom. Empty when absent.
    #[serde(default)]
    pub description: String,

    /// The feed's human-facing site link, resolved against the source URL.
    /// Links whose relation marks them as the feed's own XML URL are never
    /// used, nor are links scoped to individual entries or items.
    pub link_url: Option<String>,

    /// Raw text of the feed-level last-modified field. Deliberately not
    /// parsed into a structured time; display formatting is the rendering
    /// layer's concern.
    pub updated: Option<String>,

    /// Resolved logo/image URL.
    pub avatar_url: Option<String>,

    /// Articles in document order of the entries/items; no implicit sort.
    pub articles: Vec<ArticleRecord>,
}

/// Canonical record of one article within a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    /// Rendering/storage key, unique within one parse call. RSS items
    /// carrying neither a `guid` nor a resolvable link get a freshly
    /// generated token, so identity is NOT stable across repeated parses
    /// of byte-identical input.
    pub id: String,

    /// Never empty; `"Untitled article"` when the entry carries no title.
    pub title: String,

    /// Resolved against the feed's source URL.
    pub link_url: Option<String>,

    /// Raw text, unmodified.
    pub updated: Option<String>,

    /// Renderable content: the primary content plus any appended media
    /// fragments. Untrusted; pass through [`sanitize`](crate::sanitize())
    /// before display.
    pub html: Option<String>,
}
