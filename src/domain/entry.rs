use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "(Untitled)";
pub const NO_LINK: &str = "#";
pub const NO_DESCRIPTION: &str = "(No description)";
pub const UNKNOWN_DATE: &str = "(Unknown date)";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

/// A feed entry with every field resolved, whether it came from an Atom
/// `<entry>` or an RSS `<item>`.
///
/// `link` is the identity key: favorites are tracked by link, and two
/// entries sharing a link share one favorite flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub image_url: String,
    #[serde(default)]
    has_title: bool,
    #[serde(default)]
    has_summary: bool,
}

impl Entry {
    /// Build an entry from optional field values, substituting sentinels
    /// for anything absent.
    pub fn from_parts(
        title: Option<String>,
        link: Option<String>,
        summary: Option<String>,
        published: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            has_title: title.is_some(),
            has_summary: summary.is_some(),
            title: title.unwrap_or_else(|| UNTITLED.to_string()),
            link: link.unwrap_or_else(|| NO_LINK.to_string()),
            summary: summary.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            published: published.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            image_url: image_url.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        }
    }

    /// Case-insensitive substring match on title or summary.
    ///
    /// `needle` must already be lowercased. Sentinel text never matches.
    pub fn matches_text(&self, needle: &str) -> bool {
        (self.has_title && self.title.to_lowercase().contains(needle))
            || (self.has_summary && self.summary.to_lowercase().contains(needle))
    }

    pub fn has_link(&self) -> bool {
        self.link != NO_LINK
    }
}

/// What a presenter receives for one visible entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub image_url: String,
    pub is_favorite: bool,
}

impl EntryView {
    pub fn new(entry: &Entry, is_favorite: bool) -> Self {
        Self {
            title: entry.title.clone(),
            link: entry.link.clone(),
            summary: entry.summary.clone(),
            published: entry.published.clone(),
            image_url: entry.image_url.clone(),
            is_favorite,
        }
    }
}
