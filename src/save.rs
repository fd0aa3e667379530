//! Writing manifests to disk with a backup of the previous version.
//!
//! Before a manifest file is overwritten it is renamed to `<file>.bak`
//! (replacing an older backup). A failed backup is reported but does not
//! prevent the save.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::format::{self, EncodeOptions};
use crate::{ResourceManifest, Result};

/// Default suffix appended to backup files.
pub const DEFAULT_BACKUP_SUFFIX: &str = "bak";

/// Options for [`save_manifest`].
///
/// # Example
///
/// ```rust
/// use qrcedit::{EncodeOptions, SaveOptions};
///
/// let options = SaveOptions::new()
///     .backup(false)
///     .encode(EncodeOptions::new().indent(2));
/// assert!(!options.backup);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Whether to keep the previous file as a backup.
    pub backup: bool,
    /// Suffix appended to the file name of the backup, without the dot.
    pub backup_suffix: String,
    /// Layout of the written XML.
    pub encode: EncodeOptions,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            backup: true,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            encode: EncodeOptions::default(),
        }
    }
}

impl SaveOptions {
    /// Creates options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the backup step.
    pub fn backup(mut self, enabled: bool) -> Self {
        self.backup = enabled;
        self
    }

    /// Sets the backup suffix.
    pub fn backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = suffix.into();
        self
    }

    /// Sets the XML layout.
    pub fn encode(mut self, options: EncodeOptions) -> Self {
        self.encode = options;
        self
    }
}

/// Outcome of a save.
#[must_use = "save result should be checked for backup warnings"]
#[derive(Debug, Clone, Default)]
pub struct SaveResult {
    /// Where the manifest was written.
    pub path: PathBuf,
    /// Where the previous version was moved, if a backup was made.
    pub backup_path: Option<PathBuf>,
    /// Why the backup could not be made, if it failed.
    pub backup_warning: Option<String>,
    /// Size of the written file.
    pub bytes_written: u64,
}

impl SaveResult {
    /// Returns `true` if the save completed without warnings.
    pub fn is_clean(&self) -> bool {
        self.backup_warning.is_none()
    }
}

/// Returns the backup location for `path`: the full file name plus `.suffix`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Encodes `manifest` and writes it to `path`.
///
/// The XML is produced before anything on disk is touched. If the file
/// exists and backups are enabled, it is renamed to its backup path first.
///
/// # Errors
///
/// Returns an error if encoding or the final write fails. Backup failures
/// are logged and reported in [`SaveResult::backup_warning`] instead.
pub fn save_manifest(
    manifest: &ResourceManifest,
    path: impl AsRef<Path>,
    options: &SaveOptions,
) -> Result<SaveResult> {
    let path = path.as_ref();
    let xml = format::write_manifest(manifest, &options.encode)?;

    let mut result = SaveResult {
        path: path.to_path_buf(),
        ..Default::default()
    };

    if options.backup && path.exists() {
        let backup = backup_path(path, &options.backup_suffix);
        match make_backup(path, &backup) {
            Ok(()) => result.backup_path = Some(backup),
            Err(e) => {
                log::warn!(
                    "Could not back up '{}' to '{}': {}",
                    path.display(),
                    backup.display(),
                    e
                );
                result.backup_warning = Some(format!(
                    "could not back up '{}' to '{}': {}",
                    path.display(),
                    backup.display(),
                    e
                ));
            }
        }
    }

    fs::write(path, xml.as_bytes())?;
    result.bytes_written = xml.len() as u64;
    log::debug!("Wrote {} bytes to '{}'", result.bytes_written, path.display());
    Ok(result)
}

fn make_backup(path: &Path, backup: &Path) -> io::Result<()> {
    match fs::remove_file(backup) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::rename(path, backup)
}
