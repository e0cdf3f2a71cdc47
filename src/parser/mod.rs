mod document;

use std::borrow::Cow;

use html_escape::decode_html_entities;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::app::{Result, TributaryError};

use self::document::{Child, Element};
pub use self::document::{FeedDocument, Node};

/// Turns raw feed text into a [`FeedDocument`] and decides whether it
/// looks like a feed at all.
#[derive(Clone, Default)]
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse `raw` into an element tree. Both RSS and Atom vocabularies are
    /// accepted since nothing here is vocabulary-specific.
    pub fn parse(&self, raw: &str) -> Result<FeedDocument> {
        let raw = raw.trim_start_matches('\u{feff}');
        let mut reader = Reader::from_str(raw);

        let mut elements: Vec<Element> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let index = push_element(&mut elements, &open, &e)?;
                    open.push(index);
                }
                Ok(Event::Empty(e)) => {
                    let index = push_element(&mut elements, &open, &e)?;
                    elements[index].end = index + 1;
                }
                Ok(Event::End(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let index = open.pop().ok_or_else(|| {
                        TributaryError::ParseFailure(format!("unexpected closing tag </{}>", name))
                    })?;
                    if elements[index].name != name {
                        return Err(TributaryError::ParseFailure(format!(
                            "closing tag </{}> does not match <{}>",
                            name, elements[index].name
                        )));
                    }
                    elements[index].end = elements.len();
                }
                Ok(Event::Text(e)) => {
                    append_text(&mut elements, &open, unescape_text(&e))?;
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    append_text(&mut elements, &open, text)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(TributaryError::ParseFailure(format!(
                        "at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                // Declarations, comments, processing instructions, doctype
                Ok(_) => {}
            }
        }

        if let Some(&index) = open.last() {
            return Err(TributaryError::ParseFailure(format!(
                "unclosed element <{}>",
                elements[index].name
            )));
        }
        if elements.is_empty() {
            return Err(TributaryError::ParseFailure(
                "document contains no elements".into(),
            ));
        }

        tracing::debug!("Parsed document with {} elements", elements.len());
        Ok(FeedDocument { elements })
    }

    /// Heuristic feed check: at least one `title` and at least one
    /// `entry` or `item`. Meant to reject HTML error pages, not to
    /// validate against a schema.
    pub fn validate(&self, doc: &FeedDocument) -> bool {
        doc.has_tag("title") && (doc.has_tag("entry") || doc.has_tag("item"))
    }

    /// [`parse`](Self::parse) followed by [`validate`](Self::validate).
    pub fn parse_feed(&self, raw: &str) -> Result<FeedDocument> {
        let doc = self.parse(raw)?;
        if !self.validate(&doc) {
            return Err(TributaryError::InvalidFeedFormat);
        }
        Ok(doc)
    }
}

fn push_element(elements: &mut Vec<Element>, open: &[usize], start: &BytesStart) -> Result<usize> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    if open.is_empty() && !elements.is_empty() {
        return Err(TributaryError::ParseFailure(format!(
            "second root element <{}>",
            name
        )));
    }

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            TributaryError::ParseFailure(format!("bad attribute on <{}>: {}", name, e))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => decode_html_entities(&String::from_utf8_lossy(&attr.value)).into_owned(),
        };
        attributes.push((key, value));
    }

    let index = elements.len();
    if let Some(&parent) = open.last() {
        elements[parent].children.push(Child::Element(index));
    }
    elements.push(Element {
        name,
        attributes,
        children: Vec::new(),
        end: index + 1,
    });

    Ok(index)
}

fn append_text(elements: &mut [Element], open: &[usize], text: String) -> Result<()> {
    match open.last() {
        Some(&parent) => {
            elements[parent].children.push(Child::Text(text));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(TributaryError::ParseFailure(
            "text outside the root element".into(),
        )),
    }
}

// Feeds routinely carry HTML entities (`&nbsp;`, `&eacute;`) that are not
// valid XML; decode those instead of rejecting the document.
fn unescape_text(text: &BytesText) -> String {
    match text.unescape() {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => decode_html_entities(&String::from_utf8_lossy(text)).into_owned(),
    }
}
