//! # qrcedit
//!
//! A library for reading, editing and writing Qt resource collection
//! (`.qrc`) files.
//!
//! A `.qrc` file is an XML manifest listing the files that Qt's resource
//! compiler embeds into an application. Files are grouped under a *prefix*
//! (and optionally a *language*), and each file can carry an alias and
//! compression settings.
//!
//! ## Quick Start
//!
//! ### Editing a Manifest
//!
//! ```rust,no_run
//! use qrcedit::{GroupKey, ManifestEditor, Result};
//!
//! fn main() -> Result<()> {
//!     let mut editor = ManifestEditor::open("resources.qrc")?;
//!
//!     // Add files; paths are relative to the manifest directory.
//!     let result = editor.add_files(GroupKey::for_prefix("/icons"), ["img/open.png"]);
//!     println!("{} added, {} already present", result.files_added, result.files_skipped);
//!
//!     // Writes resources.qrc, keeping the old version as resources.qrc.bak.
//!     let saved = editor.save()?;
//!     if let Some(warning) = saved.backup_warning {
//!         eprintln!("warning: {}", warning);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Working with the Model Directly
//!
//! ```rust
//! use qrcedit::{Compression, CompressionAlgorithm, FileEntry, GroupKey, ResourceManifest};
//! use std::path::Path;
//!
//! let base = Path::new("/project/res");
//! let mut manifest = ResourceManifest::new();
//!
//! let entry = FileEntry::new("img/logo.png")
//!     .with_alias("logo.png")
//!     .with_compression(Compression::new(CompressionAlgorithm::Zstd).with_level(19)?);
//! manifest.add_file(GroupKey::for_prefix("/icons"), entry, base);
//!
//! let xml = manifest.to_xml()?;
//! assert!(xml.contains(r#"<file alias="logo.png" compress-algo="zstd" compress="19">img/logo.png</file>"#));
//!
//! let reloaded = ResourceManifest::from_xml(&xml, base)?;
//! assert_eq!(reloaded, manifest.with_compression_defaults());
//! # Ok::<(), qrcedit::Error>(())
//! ```
//!
//! ## Default Elision
//!
//! Attributes equal to their default are not written: `compress-algo="best"`,
//! the default level of `zstd` (14) and `zlib` (6), and `threshold="70"`.
//! A file with `compress-algo="none"` is written with no other compression
//! attribute. Reading fills all of these back in.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | No | The `qrcedit` command-line tool |
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`], which is an alias for
//! `std::result::Result<T, Error>`:
//!
//! ```rust,no_run
//! use qrcedit::{Error, ManifestEditor};
//!
//! fn open(path: &str) -> qrcedit::Result<()> {
//!     match ManifestEditor::open(path) {
//!         Ok(editor) => {
//!             println!("{} prefixes", editor.manifest().len());
//!             Ok(())
//!         }
//!         Err(e) if e.is_format_error() => {
//!             eprintln!("Not a resource file: {}", e);
//!             Err(e)
//!         }
//!         Err(Error::Io(e)) => {
//!             eprintln!("I/O error: {}", e);
//!             Err(Error::Io(e))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! # fn main() {}
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: skipped
//! duplicates and unknown elements at `debug`, failed backups at `warn`.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod compression;
pub mod edit;
pub mod error;
pub mod format;
pub mod manifest;
pub mod resource_path;
pub mod save;

pub use compression::{Compression, CompressionAlgorithm, DEFAULT_THRESHOLD};
pub use error::{Error, Result};

// Re-export the model at crate root for convenience
pub use manifest::{FileEntry, GroupKey, PrefixGroup, ResourceManifest};

// Re-export the codec and persistence API
pub use format::{EncodeOptions, parse_manifest, read_manifest, write_manifest};
pub use save::{SaveOptions, SaveResult, save_manifest};

// Re-export edit API
pub use edit::{EditResult, EntryUpdate, ManifestEditor, Operation, OperationBuilder};
