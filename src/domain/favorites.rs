use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Set of favorite entry links.
///
/// Ordered so the serialized form depends only on membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    links: BTreeSet<String>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    /// Add `link` if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, link: &str) -> bool {
        if self.links.remove(link) {
            false
        } else {
            self.links.insert(link.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut set = FavoritesSet::new();
        assert!(set.toggle("https://example.com/a"));
        assert!(set.contains("https://example.com/a"));
        assert!(!set.toggle("https://example.com/a"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_serializes_as_sorted_array() {
        let set: FavoritesSet = ["b", "a", "b"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_deserializes_from_array() {
        let set: FavoritesSet = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("y"));
    }
}
