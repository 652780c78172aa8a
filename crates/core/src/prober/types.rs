//! Types for the prober module.

use std::collections::HashMap;

/// Key/value tag mapping extracted from a source file.
///
/// Keys are kept exactly as the probing tool reported them; lookups are
/// exact-match so that callers stay in control of their own fallback chains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    tags: HashMap<String, String>,
}

impl TagMap {
    /// Creates an empty tag mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tag, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Looks up a tag by its exact key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Returns the first non-empty value among the given keys, in order.
    ///
    /// A value consisting only of whitespace counts as absent.
    pub fn first_non_empty(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.trim().is_empty())
    }

    /// Number of tags in the mapping.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the mapping holds no tags at all.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<(String, String)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut tags = TagMap::new();
        tags.insert("ARTIST", "Pink Floyd");
        assert_eq!(tags.get("ARTIST"), Some("Pink Floyd"));
        assert_eq!(tags.get("artist"), None);
    }

    #[test]
    fn test_first_non_empty_prefers_earlier_keys() {
        let mut tags = TagMap::new();
        tags.insert("Artist", "Second");
        tags.insert("ARTIST", "First");
        assert_eq!(
            tags.first_non_empty(&["ARTIST", "Artist", "artist"]),
            Some("First")
        );
    }

    #[test]
    fn test_first_non_empty_skips_blank_values() {
        let mut tags = TagMap::new();
        tags.insert("ARTIST", "   ");
        tags.insert("artist", "Queen");
        assert_eq!(
            tags.first_non_empty(&["ARTIST", "Artist", "artist"]),
            Some("Queen")
        );
    }

    #[test]
    fn test_first_non_empty_none_when_absent() {
        let tags = TagMap::new();
        assert_eq!(tags.first_non_empty(&["ARTIST", "artist"]), None);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let tags: TagMap = vec![
            ("TITLE".to_string(), "Song".to_string()),
            ("ALBUM".to_string(), "Album".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("TITLE"), Some("Song"));
    }
}
