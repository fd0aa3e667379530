//! Manifest modification operations.

use crate::compression::CompressionAlgorithm;
use crate::manifest::{FileEntry, GroupKey};
use crate::Result;

/// Changes to a single entry's metadata.
///
/// Unset fields are left alone. The algorithm is applied before the level,
/// so a level is validated against the new algorithm.
///
/// # Example
///
/// ```rust
/// use qrcedit::{CompressionAlgorithm, EntryUpdate};
///
/// let update = EntryUpdate::new()
///     .alias("logo.png")
///     .algorithm(CompressionAlgorithm::Zstd)
///     .level(19);
/// assert!(!update.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    /// New alias; `Some(None)` removes it.
    pub alias: Option<Option<String>>,
    /// New compression algorithm.
    pub algorithm: Option<CompressionAlgorithm>,
    /// New level; `Some(None)` falls back to the algorithm default.
    pub level: Option<Option<u32>>,
    /// New threshold.
    pub threshold: Option<u32>,
}

impl EntryUpdate {
    /// Creates an update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alias. An empty string removes it.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(Some(alias.into()));
        self
    }

    /// Removes the alias.
    pub fn clear_alias(mut self) -> Self {
        self.alias = Some(None);
        self
    }

    /// Sets the compression algorithm.
    pub fn algorithm(mut self, algorithm: CompressionAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Sets an explicit compression level.
    pub fn level(mut self, level: u32) -> Self {
        self.level = Some(Some(level));
        self
    }

    /// Resets the level to the algorithm default.
    pub fn default_level(mut self) -> Self {
        self.level = Some(None);
        self
    }

    /// Sets the compression threshold.
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Returns `true` if the update sets nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the update to `entry`, returning the changed entry.
    ///
    /// `entry` itself is not touched, so a failed update leaves no trace.
    pub(crate) fn applied_to(&self, entry: &FileEntry) -> Result<FileEntry> {
        let mut out = entry.clone();
        if let Some(alias) = &self.alias {
            out.set_alias(alias.clone());
        }
        let compression = out.compression_mut();
        if let Some(algorithm) = self.algorithm {
            compression.set_algorithm(algorithm);
        }
        if let Some(level) = self.level {
            compression.set_level(level)?;
        }
        if let Some(threshold) = self.threshold {
            compression.set_threshold(threshold);
        }
        Ok(out)
    }
}

/// A modification of a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Add a source file to a group, creating the group if needed.
    AddFile {
        /// Target group.
        key: GroupKey,
        /// Source path, absolute or relative to the manifest directory.
        path: String,
    },
    /// Add an empty group.
    AddPrefix {
        /// Group to create; `None` picks the next free `/new/prefixN`.
        key: Option<GroupKey>,
    },
    /// Remove an entry.
    RemoveFile {
        /// Group holding the entry.
        key: GroupKey,
        /// Path or alias of the entry.
        name: String,
    },
    /// Remove a group with all its entries.
    RemovePrefix {
        /// Group to remove.
        key: GroupKey,
    },
    /// Change the prefix and/or language of a group.
    RenamePrefix {
        /// Current key.
        from: GroupKey,
        /// New key.
        to: GroupKey,
    },
    /// Change an entry's alias or compression.
    UpdateFile {
        /// Group holding the entry.
        key: GroupKey,
        /// Path or alias of the entry.
        name: String,
        /// Changes to make.
        update: EntryUpdate,
    },
}

impl Operation {
    /// Returns the group this operation acts on, if known up front.
    pub fn target_group(&self) -> Option<&GroupKey> {
        match self {
            Operation::AddFile { key, .. } => Some(key),
            Operation::AddPrefix { key } => key.as_ref(),
            Operation::RemoveFile { key, .. } => Some(key),
            Operation::RemovePrefix { key } => Some(key),
            Operation::RenamePrefix { to, .. } => Some(to),
            Operation::UpdateFile { key, .. } => Some(key),
        }
    }

    /// Returns the operation type as a string.
    pub fn operation_type(&self) -> &'static str {
        match self {
            Operation::AddFile { .. } => "add-file",
            Operation::AddPrefix { .. } => "add-prefix",
            Operation::RemoveFile { .. } => "remove-file",
            Operation::RemovePrefix { .. } => "remove-prefix",
            Operation::RenamePrefix { .. } => "rename-prefix",
            Operation::UpdateFile { .. } => "update-file",
        }
    }
}

/// Builder for creating operations fluently.
#[derive(Debug, Default)]
pub struct OperationBuilder {
    operations: Vec<Operation>,
}

impl OperationBuilder {
    /// Creates a new operation builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    pub fn add_file(mut self, key: GroupKey, path: impl Into<String>) -> Self {
        self.operations.push(Operation::AddFile {
            key,
            path: path.into(),
        });
        self
    }

    /// Adds a group with the given key.
    pub fn add_prefix(mut self, key: GroupKey) -> Self {
        self.operations.push(Operation::AddPrefix { key: Some(key) });
        self
    }

    /// Adds an automatically named group.
    pub fn add_new_prefix(mut self) -> Self {
        self.operations.push(Operation::AddPrefix { key: None });
        self
    }

    /// Removes a file.
    pub fn remove_file(mut self, key: GroupKey, name: impl Into<String>) -> Self {
        self.operations.push(Operation::RemoveFile {
            key,
            name: name.into(),
        });
        self
    }

    /// Removes a group.
    pub fn remove_prefix(mut self, key: GroupKey) -> Self {
        self.operations.push(Operation::RemovePrefix { key });
        self
    }

    /// Renames a group.
    pub fn rename_prefix(mut self, from: GroupKey, to: GroupKey) -> Self {
        self.operations.push(Operation::RenamePrefix { from, to });
        self
    }

    /// Updates an entry.
    pub fn update_file(mut self, key: GroupKey, name: impl Into<String>, update: EntryUpdate) -> Self {
        self.operations.push(Operation::UpdateFile {
            key,
            name: name.into(),
            update,
        });
        self
    }

    /// Builds the list of operations.
    pub fn build(self) -> Vec<Operation> {
        self.operations
    }
}
