use crate::domain::Entry;
use crate::parser::{FeedDocument, Node};

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Extract one [`Entry`] per Atom `<entry>`, or per RSS `<item>` when the
    /// document has no Atom entries. Output follows document order.
    pub fn normalize(&self, doc: &FeedDocument) -> Vec<Entry> {
        let tag = if doc.has_tag("entry") { "entry" } else { "item" };

        let entries: Vec<Entry> = doc.elements_by_tag(tag).map(normalize_entry).collect();
        tracing::debug!("Normalized {} <{}> nodes", entries.len(), tag);
        entries
    }
}

fn normalize_entry(node: Node<'_>) -> Entry {
    let title = first_text(node, "title");
    let link = node.first_by_tag("link").and_then(|link| {
        non_empty(link.attr("href").unwrap_or_default().to_string()).or_else(|| non_empty(link.text()))
    });
    let summary = first_text(node, "summary").or_else(|| first_text(node, "description"));
    let published = first_text(node, "published").or_else(|| first_text(node, "pubDate"));
    let image_url = first_attr(node, "media:thumbnail", "url")
        .or_else(|| first_attr(node, "enclosure", "url"));

    Entry::from_parts(title, link, summary, published, image_url)
}

/// Text of the first `tag` descendant. Only that element is consulted, even
/// when it is empty and a later sibling is not.
fn first_text(node: Node<'_>, tag: &'static str) -> Option<String> {
    node.first_by_tag(tag).and_then(|n| non_empty(n.text()))
}

fn first_attr(node: Node<'_>, tag: &'static str, attr: &str) -> Option<String> {
    node.first_by_tag(tag)
        .and_then(|n| n.attr(attr))
        .and_then(|v| non_empty(v.trim().to_string()))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
