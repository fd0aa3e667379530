//! Manifest editing.
//!
//! [`ManifestEditor`] is an editing session: it owns one manifest, knows the
//! file it came from and tracks unsaved changes. Changes can be made through
//! its methods directly or described as [`Operation`]s:
//!
//! ```rust
//! use qrcedit::{GroupKey, ManifestEditor, OperationBuilder};
//!
//! let mut editor = ManifestEditor::with_base_dir("/project/res");
//!
//! let ops = OperationBuilder::new()
//!     .add_file(GroupKey::for_prefix("/icons"), "img/open.png")
//!     .add_file(GroupKey::for_prefix("/icons"), "img/close.png")
//!     .rename_prefix(GroupKey::for_prefix("/icons"), GroupKey::for_prefix("/img"))
//!     .build();
//!
//! let result = editor.apply_all(ops)?;
//! assert_eq!(result.files_added, 2);
//! assert!(editor.is_modified());
//! # Ok::<(), qrcedit::Error>(())
//! ```
//!
//! [`ManifestEditor::apply_all`] is all or nothing: if any operation fails,
//! the session is left exactly as it was.

mod editor;
mod operation;

pub use editor::{EditResult, ManifestEditor};
pub use operation::{EntryUpdate, Operation, OperationBuilder};
