//! A `<qresource>` element and its key.

use std::fmt;
use std::path::Path;

use super::entry::FileEntry;

/// Prefix used when a `qresource` element has none.
pub const DEFAULT_PREFIX: &str = "/";

/// Identifies a prefix group: the `(prefix, lang)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    prefix: String,
    lang: String,
}

impl GroupKey {
    /// Creates a key from a prefix and a language tag (may be empty).
    pub fn new(prefix: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            lang: lang.into(),
        }
    }

    /// Creates a key for a prefix without language tag.
    pub fn for_prefix(prefix: impl Into<String>) -> Self {
        Self::new(prefix, String::new())
    }

    /// Returns the prefix as stored.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the prefix as written to the manifest, `/` when empty.
    pub fn effective_prefix(&self) -> &str {
        if self.prefix.is_empty() {
            DEFAULT_PREFIX
        } else {
            &self.prefix
        }
    }

    /// Returns the language tag.
    pub fn lang(&self) -> &str {
        &self.lang
    }
}

impl Default for GroupKey {
    fn default() -> Self {
        Self::for_prefix(DEFAULT_PREFIX)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lang.is_empty() {
            write!(f, "{}", self.effective_prefix())
        } else {
            write!(f, "{} [{}]", self.effective_prefix(), self.lang)
        }
    }
}

/// An ordered list of files sharing a prefix and language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixGroup {
    key: GroupKey,
    files: Vec<FileEntry>,
}

impl PrefixGroup {
    /// Creates an empty group.
    pub fn new(key: GroupKey) -> Self {
        Self {
            key,
            files: Vec::new(),
        }
    }

    /// Returns the group key.
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    pub(crate) fn set_key(&mut self, key: GroupKey) {
        self.key = key;
    }

    /// Returns the entries in order.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the group has no entries.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns whether an entry with the same identity as `entry` exists.
    pub fn contains(&self, entry: &FileEntry, base: &Path) -> bool {
        let identity = entry.identity(base);
        self.files.iter().any(|f| f.identity(base) == identity)
    }

    /// Appends `entry` unless an entry with the same identity exists.
    ///
    /// Returns `false` (and leaves the group untouched) for a duplicate.
    pub fn add_file(&mut self, entry: FileEntry, base: &Path) -> bool {
        if self.contains(&entry, base) {
            log::debug!(
                "Skipping duplicate entry '{}' in {}",
                entry.path(),
                self.key
            );
            return false;
        }
        self.files.push(entry);
        true
    }

    /// Returns the index of the entry matching `name` by path or alias.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|f| f.matches(name))
    }

    /// Returns the entry matching `name` by path or alias.
    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.position(name).map(|idx| &self.files[idx])
    }

    /// Returns the entry matching `name` for modification.
    pub fn file_mut(&mut self, name: &str) -> Option<&mut FileEntry> {
        let idx = self.position(name)?;
        self.files.get_mut(idx)
    }

    /// Removes and returns the entry at `index`.
    pub fn remove_file(&mut self, index: usize) -> Option<FileEntry> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub(crate) fn files_mut(&mut self) -> &mut [FileEntry] {
        &mut self.files
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_effective_prefix() {
        assert_eq!(GroupKey::for_prefix("").effective_prefix(), "/");
        assert_eq!(GroupKey::for_prefix("/icons").effective_prefix(), "/icons");
        assert_eq!(GroupKey::default().prefix(), "/");
    }

    #[test]
    fn test_key_display() {
        assert_eq!(GroupKey::for_prefix("/icons").to_string(), "/icons");
        assert_eq!(GroupKey::new("/", "de").to_string(), "/ [de]");
    }

    #[test]
    fn test_add_file_deduplicates_by_identity() {
        let base = Path::new("/p");
        let mut group = PrefixGroup::new(GroupKey::default());
        assert!(group.add_file(FileEntry::new("a.png"), base));
        assert!(!group.add_file(FileEntry::new("./a.png"), base));
        assert!(!group.add_file(FileEntry::new("img/../a.png"), base));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_alias_collides_with_path() {
        let base = Path::new("/p");
        let mut group = PrefixGroup::new(GroupKey::default());
        assert!(group.add_file(FileEntry::new("a.png"), base));
        assert!(!group.add_file(FileEntry::new("img/b.png").with_alias("a.png"), base));
        assert!(group.add_file(FileEntry::new("img/b.png").with_alias("b.png"), base));
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_remove_file() {
        let base = Path::new("/p");
        let mut group = PrefixGroup::new(GroupKey::default());
        group.add_file(FileEntry::new("a.png"), base);
        group.add_file(FileEntry::new("b.png"), base);

        let idx = group.position("b.png").unwrap();
        let removed = group.remove_file(idx).unwrap();
        assert_eq!(removed.file_name(), "b.png");
        assert!(group.remove_file(5).is_none());
        assert_eq!(group.len(), 1);
    }
}
