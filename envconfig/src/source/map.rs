//! Case-sensitive string mapping shared by every source.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Mapping from key to raw string value.
///
/// Keys are case-sensitive. [`SourceMap::lookup`] treats an empty value the
/// same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    entries: BTreeMap<String, String>,
}

impl SourceMap {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the raw value stored under `key`, including empty strings.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value under `key` unless it is missing or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use envconfig::SourceMap;
    /// let map: SourceMap = [("HOST", "localhost"), ("EMPTY", "")].into_iter().collect();
    /// assert_eq!(map.lookup("HOST"), Some("localhost"));
    /// assert_eq!(map.lookup("EMPTY"), None);
    /// assert_eq!(map.get("EMPTY"), Some(""));
    /// ```
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Overwrites entries in `self` with every entry from `other`.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for SourceMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for SourceMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for SourceMap {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
