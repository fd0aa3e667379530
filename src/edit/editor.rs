//! Editing session over a single manifest file.

use std::path::{Path, PathBuf};

use crate::format::{self, read_manifest};
use crate::manifest::{FileEntry, GroupKey, PrefixGroup, ResourceManifest};
use crate::resource_path;
use crate::save::{SaveOptions, SaveResult, save_manifest};
use crate::{Error, Result};

use super::operation::{EntryUpdate, Operation};

/// Result of an edit operation.
#[must_use = "edit result should be checked to verify operation completed as expected"]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditResult {
    /// Number of files added.
    pub files_added: usize,
    /// Number of files not added because the group already held them.
    pub files_skipped: usize,
    /// Number of files removed, including those in removed groups.
    pub files_removed: usize,
    /// Number of groups created.
    pub prefixes_added: usize,
    /// Number of groups removed.
    pub prefixes_removed: usize,
    /// Number of groups renamed.
    pub prefixes_renamed: usize,
    /// Number of entries whose metadata changed.
    pub entries_updated: usize,
}

impl EditResult {
    /// Returns the number of effective changes.
    pub fn changes(&self) -> usize {
        self.files_added
            + self.files_removed
            + self.prefixes_added
            + self.prefixes_removed
            + self.prefixes_renamed
            + self.entries_updated
    }

    /// Returns `true` if nothing changed.
    pub fn is_unchanged(&self) -> bool {
        self.changes() == 0
    }

    /// Adds the counters of `other` to these.
    pub fn merge(&mut self, other: &EditResult) {
        self.files_added += other.files_added;
        self.files_skipped += other.files_skipped;
        self.files_removed += other.files_removed;
        self.prefixes_added += other.prefixes_added;
        self.prefixes_removed += other.prefixes_removed;
        self.prefixes_renamed += other.prefixes_renamed;
        self.entries_updated += other.entries_updated;
    }
}

/// An editing session: one manifest, where it lives, and whether it has
/// unsaved changes.
///
/// Every method either fully applies its change or leaves the session as it
/// was.
///
/// # Example
///
/// ```rust,no_run
/// use qrcedit::{EntryUpdate, GroupKey, ManifestEditor, CompressionAlgorithm};
///
/// let mut editor = ManifestEditor::open("resources.qrc")?;
/// let icons = GroupKey::for_prefix("/icons");
///
/// let result = editor.add_files(icons.clone(), ["img/open.png", "img/close.png"]);
/// println!("added {}, skipped {}", result.files_added, result.files_skipped);
///
/// editor.update_file(
///     &icons,
///     "img/open.png",
///     &EntryUpdate::new().algorithm(CompressionAlgorithm::Zstd).level(19),
/// )?;
///
/// if editor.is_modified() {
///     editor.save()?;
/// }
/// # Ok::<(), qrcedit::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ManifestEditor {
    manifest: ResourceManifest,
    path: Option<PathBuf>,
    base_dir: PathBuf,
    modified: bool,
    options: SaveOptions,
}

impl Default for ManifestEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestEditor {
    /// Creates an unnamed, empty manifest based in the current directory.
    pub fn new() -> Self {
        Self::with_base_dir(".")
    }

    /// Creates an unnamed, empty manifest whose entries are relative to `dir`.
    pub fn with_base_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            manifest: ResourceManifest::new(),
            path: None,
            base_dir: resource_path::absolute_dir(dir.as_ref()),
            modified: false,
            options: SaveOptions::default(),
        }
    }

    /// Opens the manifest at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut editor = Self::new();
        editor.load(path)?;
        Ok(editor)
    }

    /// Sets the options used by [`save`][Self::save] and
    /// [`to_xml`][Self::to_xml].
    pub fn with_options(mut self, options: SaveOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the session contents with the manifest at `path`.
    ///
    /// On failure the current manifest, path and modified flag are kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let manifest = read_manifest(path)?;
        log::debug!(
            "Loaded '{}': {} prefixes, {} files",
            path.display(),
            manifest.len(),
            manifest.file_count()
        );
        self.manifest = manifest;
        self.base_dir = resource_path::manifest_dir(path);
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Returns the manifest.
    pub fn manifest(&self) -> &ResourceManifest {
        &self.manifest
    }

    /// Consumes the session, returning the manifest.
    pub fn into_manifest(self) -> ResourceManifest {
        self.manifest
    }

    /// Returns the file the manifest was loaded from or last saved to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the directory entry paths are relative to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns `true` if there are unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Adds source files to the group for `key`, creating it if needed.
    ///
    /// Paths may be absolute or relative to [`base_dir`][Self::base_dir].
    /// Files already in the group are counted as skipped.
    pub fn add_files<I, S>(&mut self, key: GroupKey, paths: I) -> EditResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = EditResult::default();
        for path in paths {
            let entry = FileEntry::from_source(&self.base_dir, path.as_ref());
            if !self.manifest.contains_group(&key) {
                result.prefixes_added += 1;
            }
            if self.manifest.add_file(key.clone(), entry, &self.base_dir) {
                result.files_added += 1;
            } else {
                result.files_skipped += 1;
            }
        }
        self.record(&result);
        result
    }

    /// Adds an empty group named after the first free `/new/prefixN`.
    pub fn add_prefix(&mut self) -> GroupKey {
        let key = GroupKey::for_prefix(self.manifest.next_new_prefix());
        self.manifest.group_or_insert(key.clone());
        self.modified = true;
        key
    }

    /// Adds an empty group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GroupExists`] if the key is taken.
    pub fn add_group(&mut self, key: GroupKey) -> Result<()> {
        self.manifest.insert_group(key)?;
        self.modified = true;
        Ok(())
    }

    /// Removes the entry matching `name` (path or alias).
    pub fn remove_file(&mut self, key: &GroupKey, name: &str) -> Result<FileEntry> {
        let entry = self.manifest.remove_file(key, name)?;
        self.modified = true;
        Ok(entry)
    }

    /// Removes a group with all its entries.
    pub fn remove_group(&mut self, key: &GroupKey) -> Result<PrefixGroup> {
        let group = self
            .manifest
            .remove_group(key)
            .ok_or_else(|| Error::GroupNotFound {
                prefix: key.prefix().to_string(),
                lang: key.lang().to_string(),
            })?;
        self.modified = true;
        Ok(group)
    }

    /// Changes the prefix and/or language of a group.
    pub fn rename_group(&mut self, from: &GroupKey, to: GroupKey) -> Result<()> {
        if from == &to {
            return self.manifest.rename_group(from, to);
        }
        self.manifest.rename_group(from, to)?;
        self.modified = true;
        Ok(())
    }

    /// Changes an entry's alias or compression settings.
    ///
    /// Returns `true` if the entry changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GroupNotFound`] or [`Error::EntryNotFound`] if the
    /// entry does not exist, a compression error if the level is rejected,
    /// or [`Error::EntryExists`] if the new alias collides with another entry.
    pub fn update_file(&mut self, key: &GroupKey, name: &str, update: &EntryUpdate) -> Result<bool> {
        let base = &self.base_dir;
        let group = self
            .manifest
            .group_mut(key)
            .ok_or_else(|| Error::GroupNotFound {
                prefix: key.prefix().to_string(),
                lang: key.lang().to_string(),
            })?;
        let index = group.position(name).ok_or_else(|| Error::EntryNotFound {
            path: name.to_string(),
        })?;

        let current = &group.files()[index];
        let updated = update.applied_to(current)?;
        if &updated == current {
            return Ok(false);
        }

        let identity = updated.identity(base);
        let collides = group
            .files()
            .iter()
            .enumerate()
            .any(|(i, f)| i != index && f.identity(base) == identity);
        if collides {
            return Err(Error::EntryExists {
                path: updated.resource_name().to_string(),
            });
        }

        group.files_mut()[index] = updated;
        self.modified = true;
        Ok(true)
    }

    /// Applies a single operation.
    pub fn apply(&mut self, operation: Operation) -> Result<EditResult> {
        let mut result = EditResult::default();
        match operation {
            Operation::AddFile { key, path } => {
                result = self.add_files(key, [path]);
            }
            Operation::AddPrefix { key: None } => {
                self.add_prefix();
                result.prefixes_added = 1;
            }
            Operation::AddPrefix { key: Some(key) } => {
                self.add_group(key)?;
                result.prefixes_added = 1;
            }
            Operation::RemoveFile { key, name } => {
                self.remove_file(&key, &name)?;
                result.files_removed = 1;
            }
            Operation::RemovePrefix { key } => {
                let group = self.remove_group(&key)?;
                result.prefixes_removed = 1;
                result.files_removed = group.len();
            }
            Operation::RenamePrefix { from, to } => {
                if from != to {
                    result.prefixes_renamed = 1;
                }
                self.rename_group(&from, to)?;
            }
            Operation::UpdateFile { key, name, update } => {
                if self.update_file(&key, &name, &update)? {
                    result.entries_updated = 1;
                }
            }
        }
        Ok(result)
    }

    /// Applies operations in order, all or nothing.
    ///
    /// If one fails, the session is restored to its state before the call.
    pub fn apply_all(&mut self, operations: impl IntoIterator<Item = Operation>) -> Result<EditResult> {
        let snapshot = (self.manifest.clone(), self.modified);
        let mut total = EditResult::default();
        for operation in operations {
            let kind = operation.operation_type();
            let target = operation
                .target_group()
                .map_or_else(|| "a new prefix".to_string(), ToString::to_string);
            match self.apply(operation) {
                Ok(result) => total.merge(&result),
                Err(e) => {
                    log::debug!("Operation {} on {} failed, rolling back: {}", kind, target, e);
                    (self.manifest, self.modified) = snapshot;
                    return Err(e);
                }
            }
        }
        Ok(total)
    }

    /// Returns entries whose source file does not exist.
    pub fn missing_files(&self) -> Vec<(&GroupKey, &FileEntry)> {
        self.manifest.missing_files(&self.base_dir)
    }

    /// Encodes the manifest with the session's options.
    pub fn to_xml(&self) -> Result<String> {
        format::write_manifest(&self.manifest, &self.options.encode)
    }

    /// Writes the manifest back to its file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFilePath`] if the manifest was never loaded or
    /// saved under a name.
    pub fn save(&mut self) -> Result<SaveResult> {
        let path = self.path.clone().ok_or(Error::NoFilePath)?;
        let result = save_manifest(&self.manifest, &path, &self.options)?;
        self.modified = false;
        Ok(result)
    }

    /// Writes the manifest to a new location, rewriting entry paths so they
    /// still refer to the same files from there.
    ///
    /// The new location becomes the session's file.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<SaveResult> {
        let path = path.as_ref();
        let new_base = resource_path::manifest_dir(path);

        let mut rebased = self.manifest.clone();
        rebased.rebase(&self.base_dir, &new_base);
        let result = save_manifest(&rebased, path, &self.options)?;

        self.manifest = rebased;
        self.base_dir = new_base;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(result)
    }

    fn record(&mut self, result: &EditResult) {
        if !result.is_unchanged() {
            self.modified = true;
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::compression::CompressionAlgorithm;

    fn editor() -> ManifestEditor {
        ManifestEditor::with_base_dir("/proj/res")
    }

    #[test]
    fn test_edit_result_changes() {
        let result = EditResult {
            files_added: 2,
            files_skipped: 5,
            prefixes_added: 1,
            ..Default::default()
        };
        assert_eq!(result.changes(), 3);
        assert!(EditResult::default().is_unchanged());
    }

    #[test]
    fn test_add_files_counts() {
        let mut ed = editor();
        let key = GroupKey::for_prefix("/icons");
        let result = ed.add_files(key.clone(), ["a.png", "/proj/res/a.png", "b.png"]);
        assert_eq!(result.files_added, 2);
        assert_eq!(result.files_skipped, 1);
        assert_eq!(result.prefixes_added, 1);
        assert!(ed.is_modified());
        assert_eq!(ed.manifest().group(&key).unwrap().files()[1].path(), "./b.png");
    }

    #[test]
    fn test_add_only_duplicates_is_not_a_modification() {
        let mut ed = editor();
        let _ = ed.add_files(GroupKey::default(), ["a.png"]);
        ed.modified = false;
        let result = ed.add_files(GroupKey::default(), ["./a.png"]);
        assert!(result.is_unchanged());
        assert!(!ed.is_modified());
    }

    #[test]
    fn test_add_prefix_auto_names() {
        let mut ed = editor();
        assert_eq!(ed.add_prefix().prefix(), "/new/prefix1");
        assert_eq!(ed.add_prefix().prefix(), "/new/prefix2");
        assert_eq!(ed.manifest().len(), 2);
    }

    #[test]
    fn test_update_file_alias_collision() {
        let mut ed = editor();
        let key = GroupKey::default();
        let _ = ed.add_files(key.clone(), ["a.png", "img/b.png"]);

        let err = ed
            .update_file(&key, "img/b.png", &EntryUpdate::new().alias("a.png"))
            .unwrap_err();
        assert!(matches!(err, Error::EntryExists { .. }));
        assert_eq!(ed.manifest().groups()[0].files()[1].alias(), None);
    }

    #[test]
    fn test_update_file_unchanged_returns_false() {
        let mut ed = editor();
        let key = GroupKey::default();
        let _ = ed.add_files(key.clone(), ["a.png"]);
        ed.modified = false;

        let changed = ed
            .update_file(&key, "a.png", &EntryUpdate::new().algorithm(CompressionAlgorithm::Best))
            .unwrap();
        assert!(!changed);
        assert!(!ed.is_modified());
    }

    #[test]
    fn test_apply_all_rolls_back() {
        let mut ed = editor();
        let ops = vec![
            Operation::AddFile {
                key: GroupKey::default(),
                path: "a.png".into(),
            },
            Operation::RemovePrefix {
                key: GroupKey::for_prefix("/missing"),
            },
        ];
        assert!(ed.apply_all(ops).is_err());
        assert!(ed.manifest().is_empty());
        assert!(!ed.is_modified());
    }

    #[test]
    fn test_save_without_path() {
        let mut ed = editor();
        assert!(matches!(ed.save(), Err(Error::NoFilePath)));
    }
}
