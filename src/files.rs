//! Attachment lookup table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Attachment file name to file location.
///
/// Keys are the bare file names exactly as written in the transcript
/// (case-sensitive). Inserting a name twice keeps the later path.
///
/// # Example
///
/// ```rust
/// use chatview::FileMap;
///
/// let mut files = FileMap::new();
/// files.insert("IMG-1.jpg", "/export/a/IMG-1.jpg");
/// files.insert("IMG-1.jpg", "/export/b/IMG-1.jpg");
///
/// assert_eq!(files.len(), 1);
/// assert_eq!(files.get("IMG-1.jpg").unwrap().to_str(), Some("/export/b/IMG-1.jpg"));
/// assert!(files.get("img-1.jpg").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    entries: BTreeMap<String, PathBuf>,
}

impl FileMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry, returning the replaced path.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Option<PathBuf> {
        self.entries.insert(name.into(), path.into())
    }

    /// Looks up an attachment by file name.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Returns `true` if the map has an entry for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }
}

impl<K: Into<String>, V: Into<PathBuf>> FromIterator<(K, V)> for FileMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FileMap::new();
        for (name, path) in iter {
            map.insert(name, path);
        }
        map
    }
}
