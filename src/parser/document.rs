//! Arena-backed element tree produced by [`FeedParser`](super::FeedParser).
//!
//! Elements are stored in the order their start tags appear, so a slice of
//! the arena is always in document order. Each element records the end of
//! its descendant range, which makes subtree lookups a slice scan.

#[derive(Debug)]
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) children: Vec<Child>,
    /// One past the index of the last descendant.
    pub(crate) end: usize,
}

#[derive(Debug)]
pub(crate) enum Child {
    Element(usize),
    Text(String),
}

/// A parsed markup document.
#[derive(Debug)]
pub struct FeedDocument {
    pub(crate) elements: Vec<Element>,
}

impl FeedDocument {
    pub fn root(&self) -> Node<'_> {
        Node { doc: self, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Every element named `name` (qualified, e.g. `media:thumbnail`), in document order.
    pub fn elements_by_tag<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Node<'a>> + 'a {
        self.range_by_tag(0, self.elements.len(), name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.elements.iter().any(|e| e.name == name)
    }

    fn range_by_tag<'a>(
        &'a self,
        start: usize,
        end: usize,
        name: &'a str,
    ) -> impl Iterator<Item = Node<'a>> + 'a {
        (start..end)
            .filter(move |&i| self.elements[i].name == name)
            .map(move |index| Node { doc: self, index })
    }
}

/// Borrowed handle to one element of a [`FeedDocument`].
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    doc: &'a FeedDocument,
    index: usize,
}

impl<'a> Node<'a> {
    fn element(&self) -> &'a Element {
        &self.doc.elements[self.index]
    }

    pub fn name(&self) -> &'a str {
        &self.element().name
    }

    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.element()
            .attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of this element and all its descendants, trimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.element().children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(index) => Node {
                    doc: self.doc,
                    index: *index,
                }
                .collect_text(out),
            }
        }
    }

    /// Descendants named `name`, in document order. Does not include `self`.
    pub fn descendants_by_tag(&self, name: &'a str) -> impl Iterator<Item = Node<'a>> + 'a {
        self.doc
            .range_by_tag(self.index + 1, self.element().end, name)
    }

    pub fn first_by_tag(&self, name: &'a str) -> Option<Node<'a>> {
        self.descendants_by_tag(name).next()
    }
}
