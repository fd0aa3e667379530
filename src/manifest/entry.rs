//! A single `<file>` element.

use std::path::{Path, PathBuf};

use crate::compression::Compression;
use crate::resource_path::{self, CURRENT_DIR_PREFIX};

/// A file listed in a prefix group.
///
/// The path is kept relative to the manifest directory, in the `./dir/name`
/// form. Use [`FileEntry::from_source`] to build one from an arbitrary path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: String,
    alias: Option<String>,
    compression: Compression,
}

impl FileEntry {
    /// Creates an entry from an already-relative path.
    ///
    /// A missing `./` is added so that entries compare equal regardless of how
    /// the path was spelled. Surrounding whitespace is dropped, since the
    /// decoder trims `<file>` text.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.trim();
        let path = if Path::new(path).is_absolute() {
            path.to_string()
        } else {
            match resource_path::strip_current_dir(path) {
                "" => format!("{}.", CURRENT_DIR_PREFIX),
                rest => format!("{}{}", CURRENT_DIR_PREFIX, rest),
            }
        };
        Self {
            path,
            alias: None,
            compression: Compression::default(),
        }
    }

    /// Creates an entry for `source` (absolute, or relative to `base`) in a
    /// manifest stored in `base`.
    pub fn from_source(base: &Path, source: &str) -> Self {
        Self::new(resource_path::stored_path(base, source))
    }

    /// Sets the alias. An empty alias clears it.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.set_alias(Some(alias.into()));
        self
    }

    /// Sets the compression settings.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Returns the stored path (`./dir/name`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path as written in the manifest, without the leading `./`.
    pub fn file_name(&self) -> &str {
        resource_path::strip_current_dir(&self.path)
    }

    /// Returns the alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the compression settings.
    pub fn compression(&self) -> &Compression {
        &self.compression
    }

    /// Returns the compression settings for modification.
    pub fn compression_mut(&mut self) -> &mut Compression {
        &mut self.compression
    }

    /// Sets or clears the alias. Returns `true` if it changed.
    pub fn set_alias(&mut self, alias: Option<String>) -> bool {
        let alias = alias.filter(|a| !a.is_empty());
        if self.alias == alias {
            return false;
        }
        self.alias = alias;
        true
    }

    /// Replaces the stored path.
    pub(crate) fn set_path(&mut self, path: String) {
        self.path = path;
    }

    /// Returns the name the file is addressed by at runtime: the alias, or
    /// the file name when there is none.
    pub fn resource_name(&self) -> &str {
        match &self.alias {
            Some(alias) => resource_path::strip_current_dir(alias),
            None => self.file_name(),
        }
    }

    /// Returns the identity used for duplicate detection.
    pub fn identity(&self, base: &Path) -> PathBuf {
        resource_path::resolve(base, self.alias.as_deref().unwrap_or(&self.path))
    }

    /// Returns the absolute location of the source file.
    pub fn source_path(&self, base: &Path) -> PathBuf {
        resource_path::resolve(base, &self.path)
    }

    /// Returns whether the source file exists.
    pub fn exists(&self, base: &Path) -> bool {
        self.source_path(base).is_file()
    }

    /// Returns the Qt resource path, e.g. `:/icons/open.png`.
    pub fn resource_path(&self, prefix: &str) -> String {
        format!(
            ":{}",
            resource_path::join_resource_path(prefix, self.resource_name())
        )
    }

    /// Returns the Qt resource URL, e.g. `qrc:///icons/open.png`.
    pub fn resource_url(&self, prefix: &str) -> String {
        format!(
            "qrc://{}",
            resource_path::join_resource_path(prefix, self.resource_name())
        )
    }

    /// Returns whether `name` refers to this entry, by path or alias.
    pub fn matches(&self, name: &str) -> bool {
        let name = resource_path::strip_current_dir(name);
        self.file_name() == name || self.alias.as_deref() == Some(name)
    }

    /// Returns a copy with compression defaults materialized, i.e. the entry
    /// as it reads back after a save and reload.
    pub fn with_compression_defaults(&self) -> Self {
        Self {
            compression: self.compression.with_defaults(),
            ..self.clone()
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::compression::CompressionAlgorithm;

    #[test]
    fn test_new_adds_current_dir_prefix() {
        assert_eq!(FileEntry::new("a.png").path(), "./a.png");
        assert_eq!(FileEntry::new("./a.png").path(), "./a.png");
        assert_eq!(FileEntry::new(".\\a.png").path(), "./a.png");
        assert_eq!(FileEntry::new("a.png").file_name(), "a.png");
    }

    #[test]
    fn test_new_trims_and_keeps_dir_entries_named() {
        assert_eq!(FileEntry::new(" a.png\t").path(), "./a.png");
        assert_eq!(FileEntry::new(".").path(), "./.");
        assert_eq!(FileEntry::new("./").path(), "./.");
        assert_eq!(FileEntry::new("./").file_name(), ".");
    }

    #[test]
    fn test_from_source() {
        let entry = FileEntry::from_source(Path::new("/p/res"), "/p/res/img/a.png");
        assert_eq!(entry.path(), "./img/a.png");
    }

    #[test]
    fn test_empty_alias_is_cleared() {
        let mut entry = FileEntry::new("a.png").with_alias("b.png");
        assert_eq!(entry.alias(), Some("b.png"));
        assert!(entry.set_alias(Some(String::new())));
        assert_eq!(entry.alias(), None);
        assert!(!entry.set_alias(None));
    }

    #[test]
    fn test_identity_prefers_alias() {
        let base = Path::new("/p");
        let plain = FileEntry::new("img/a.png");
        assert_eq!(plain.identity(base), PathBuf::from("/p/img/a.png"));

        let aliased = FileEntry::new("img/a.png").with_alias("logo.png");
        assert_eq!(aliased.identity(base), PathBuf::from("/p/logo.png"));
    }

    #[test]
    fn test_resource_path_and_url() {
        let entry = FileEntry::new("img/open.png");
        assert_eq!(entry.resource_path("/"), ":/img/open.png");
        assert_eq!(entry.resource_url("/icons"), "qrc:///icons/img/open.png");

        let aliased = entry.with_alias("open.png");
        assert_eq!(aliased.resource_path("/icons"), ":/icons/open.png");
    }

    #[test]
    fn test_matches() {
        let entry = FileEntry::new("img/a.png").with_alias("a");
        assert!(entry.matches("img/a.png"));
        assert!(entry.matches("./img/a.png"));
        assert!(entry.matches("a"));
        assert!(!entry.matches("b"));
    }

    #[test]
    fn test_with_compression() {
        let entry = FileEntry::new("a.bin")
            .with_compression(Compression::new(CompressionAlgorithm::Zstd));
        assert_eq!(entry.compression().algorithm(), CompressionAlgorithm::Zstd);
        assert_eq!(
            entry.with_compression_defaults().compression().level(),
            Some(14)
        );
    }
}
