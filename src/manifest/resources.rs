//! The manifest root: an ordered set of prefix groups.

use std::collections::HashMap;
use std::path::Path;

use super::entry::FileEntry;
use super::group::{GroupKey, PrefixGroup};
use crate::format::{self, EncodeOptions};
use crate::resource_path;
use crate::{Error, Result};

/// Template for generated prefixes, see [`ResourceManifest::next_new_prefix`].
const NEW_PREFIX_BASE: &str = "/new/prefix";

/// An in-memory `.qrc` manifest.
///
/// Groups keep their creation order; no two groups share a [`GroupKey`].
///
/// # Example
///
/// ```rust
/// use qrcedit::{FileEntry, GroupKey, ResourceManifest};
/// use std::path::Path;
///
/// let base = Path::new("/project/res");
/// let mut manifest = ResourceManifest::new();
/// assert!(manifest.add_file(GroupKey::for_prefix("/icons"), FileEntry::new("open.png"), base));
/// // Same file again: ignored.
/// assert!(!manifest.add_file(GroupKey::for_prefix("/icons"), FileEntry::new("./open.png"), base));
/// assert_eq!(manifest.file_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceManifest {
    groups: Vec<PrefixGroup>,
    index: HashMap<GroupKey, usize>,
}

impl PartialEq for ResourceManifest {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl Eq for ResourceManifest {}

impl ResourceManifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a manifest; relative paths are resolved against `base_dir`.
    pub fn from_xml(xml: &str, base_dir: impl AsRef<Path>) -> Result<Self> {
        format::parse_manifest(xml, base_dir.as_ref())
    }

    /// Serializes the manifest with default options.
    pub fn to_xml(&self) -> Result<String> {
        format::write_manifest(self, &EncodeOptions::default())
    }

    /// Returns the number of prefix groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no prefix groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the total number of file entries.
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(PrefixGroup::len).sum()
    }

    /// Returns the groups in order.
    pub fn groups(&self) -> &[PrefixGroup] {
        &self.groups
    }

    /// Returns the group for `key`.
    pub fn group(&self, key: &GroupKey) -> Option<&PrefixGroup> {
        self.index.get(key).map(|&idx| &self.groups[idx])
    }

    /// Returns the group for `key` for modification.
    pub fn group_mut(&mut self, key: &GroupKey) -> Option<&mut PrefixGroup> {
        let idx = *self.index.get(key)?;
        self.groups.get_mut(idx)
    }

    /// Returns whether a group with `key` exists.
    pub fn contains_group(&self, key: &GroupKey) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the group for `key`, appending an empty one if needed.
    pub fn group_or_insert(&mut self, key: GroupKey) -> &mut PrefixGroup {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.index.insert(key.clone(), idx);
                self.groups.push(PrefixGroup::new(key));
                idx
            }
        };
        &mut self.groups[idx]
    }

    /// Appends a new empty group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GroupExists`] if the key is taken.
    pub fn insert_group(&mut self, key: GroupKey) -> Result<&mut PrefixGroup> {
        if self.contains_group(&key) {
            return Err(group_exists(&key));
        }
        Ok(self.group_or_insert(key))
    }

    /// Removes a group with all its entries.
    pub fn remove_group(&mut self, key: &GroupKey) -> Option<PrefixGroup> {
        let idx = self.index.remove(key)?;
        let group = self.groups.remove(idx);
        self.reindex();
        Some(group)
    }

    /// Changes the prefix and/or language of a group, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GroupNotFound`] if `from` does not exist, or
    /// [`Error::GroupExists`] if `to` belongs to another group.
    pub fn rename_group(&mut self, from: &GroupKey, to: GroupKey) -> Result<()> {
        if from == &to {
            return if self.contains_group(from) {
                Ok(())
            } else {
                Err(group_not_found(from))
            };
        }
        if self.contains_group(&to) {
            return Err(group_exists(&to));
        }
        let idx = self.index.remove(from).ok_or_else(|| group_not_found(from))?;
        self.groups[idx].set_key(to.clone());
        self.index.insert(to, idx);
        Ok(())
    }

    /// Adds `entry` to the group for `key`, creating the group if needed.
    ///
    /// Returns `false` if the group already holds an entry with the same
    /// identity; the manifest is then unchanged apart from the group, which
    /// exists afterwards either way.
    pub fn add_file(&mut self, key: GroupKey, entry: FileEntry, base: &Path) -> bool {
        self.group_or_insert(key).add_file(entry, base)
    }

    /// Removes the entry matching `name` from the group for `key`.
    pub fn remove_file(&mut self, key: &GroupKey, name: &str) -> Result<FileEntry> {
        let group = self.group_mut(key).ok_or_else(|| group_not_found(key))?;
        group
            .position(name)
            .and_then(|idx| group.remove_file(idx))
            .ok_or_else(|| Error::EntryNotFound {
                path: name.to_string(),
            })
    }

    /// Returns the first `/new/prefixN` (N = 1, 2, ...) not used by any
    /// group, whatever its language.
    pub fn next_new_prefix(&self) -> String {
        (1..)
            .map(|n| format!("{}{}", NEW_PREFIX_BASE, n))
            .find(|candidate| !self.groups.iter().any(|g| g.key().prefix() == candidate))
            .unwrap_or_else(|| NEW_PREFIX_BASE.to_string())
    }

    /// Rewrites every stored path after the manifest moved from `old_dir` to
    /// `new_dir`, so each entry still refers to the same file. Aliases are not
    /// touched.
    pub fn rebase(&mut self, old_dir: &Path, new_dir: &Path) {
        let old_dir = resource_path::absolute_dir(old_dir);
        let new_dir = resource_path::absolute_dir(new_dir);
        if old_dir == new_dir {
            return;
        }
        for group in &mut self.groups {
            for entry in group.files_mut() {
                let moved = resource_path::rebase(entry.path(), &old_dir, &new_dir);
                entry.set_path(moved);
            }
        }
    }

    /// Returns `(group, entry)` pairs whose source file does not exist.
    pub fn missing_files(&self, base: &Path) -> Vec<(&GroupKey, &FileEntry)> {
        self.iter_files().filter(|(_, f)| !f.exists(base)).collect()
    }

    /// Iterates over all entries together with their group key.
    pub fn iter_files(&self) -> impl Iterator<Item = (&GroupKey, &FileEntry)> {
        self.groups
            .iter()
            .flat_map(|g| g.files().iter().map(move |f| (g.key(), f)))
    }

    /// Returns the manifest as it reads back after a save and reload.
    pub fn with_compression_defaults(&self) -> Self {
        let mut out = self.clone();
        for group in &mut out.groups {
            for entry in group.files_mut() {
                *entry = entry.with_compression_defaults();
            }
        }
        out
    }

    fn reindex(&mut self) {
        self.index = self
            .groups
            .iter()
            .enumerate()
            .map(|(idx, g)| (g.key().clone(), idx))
            .collect();
    }
}

fn group_exists(key: &GroupKey) -> Error {
    Error::GroupExists {
        prefix: key.prefix().to_string(),
        lang: key.lang().to_string(),
    }
}

fn group_not_found(key: &GroupKey) -> Error {
    Error::GroupNotFound {
        prefix: key.prefix().to_string(),
        lang: key.lang().to_string(),
    }
}
