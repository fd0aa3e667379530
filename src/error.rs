//! Error types for resource manifest operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when loading, editing, or saving `.qrc` manifests, along
//! with a convenient [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! All fallible operations in this crate return `Result<T, Error>`. A manifest
//! that fails to parse is never fatal: the caller gets an error back and any
//! previously loaded state is left as it was.
//!
//! ```rust,no_run
//! use qrcedit::{Error, ManifestEditor};
//!
//! fn open(path: &str) -> qrcedit::Result<ManifestEditor> {
//!     match ManifestEditor::open(path) {
//!         Ok(editor) => Ok(editor),
//!         Err(e) if e.is_format_error() => {
//!             eprintln!("Not a valid resource file: {}", e);
//!             Err(e)
//!         }
//!         Err(Error::Io(e)) => {
//!             eprintln!("Could not read '{}': {}", path, e);
//!             Err(Error::Io(e))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::io;

use crate::compression::CompressionAlgorithm;

/// The main error type for manifest operations.
///
/// # Error Categories
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | I/O | [`Io`][Self::Io] | Reading or writing the manifest file |
/// | Format | [`InvalidFormat`][Self::InvalidFormat], [`Xml`][Self::Xml] | Malformed or schema-violating XML |
/// | Values | [`UnknownAlgorithm`][Self::UnknownAlgorithm], [`InvalidCompressionLevel`][Self::InvalidCompressionLevel], [`LevelNotSupported`][Self::LevelNotSupported] | Bad packaging options |
/// | Lookup | [`EntryNotFound`][Self::EntryNotFound], [`EntryExists`][Self::EntryExists], [`GroupNotFound`][Self::GroupNotFound], [`GroupExists`][Self::GroupExists] | Editing operations |
/// | Session | [`NoFilePath`][Self::NoFilePath] | Saving an unnamed manifest |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while reading or writing a manifest.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is well-formed XML but does not follow the `.qrc` schema.
    ///
    /// Returned when the root element is not `RCC`, a `file` element has no
    /// path, or an attribute value cannot be interpreted.
    #[error("Invalid resource file: {0}")]
    InvalidFormat(String),

    /// The document is not well-formed XML.
    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        /// Byte offset into the document where the problem was detected.
        position: u64,
        /// The underlying parser error.
        #[source]
        source: quick_xml::Error,
    },

    /// A compression algorithm name was not recognized.
    ///
    /// Valid names are `best`, `none`, `zstd` and `zlib` (case-insensitive).
    #[error("Unknown compression algorithm '{name}'")]
    UnknownAlgorithm {
        /// The name that was provided.
        name: String,
    },

    /// A compression level is outside the range accepted by its algorithm.
    ///
    /// ```rust
    /// use qrcedit::{Compression, CompressionAlgorithm, Error};
    ///
    /// let result = Compression::new(CompressionAlgorithm::Zlib).with_level(12);
    /// assert!(matches!(result, Err(Error::InvalidCompressionLevel { level: 12, .. })));
    /// ```
    #[error("invalid compression level {level} for {algorithm}: must be {min}-{max}")]
    InvalidCompressionLevel {
        /// The algorithm the level was meant for.
        algorithm: CompressionAlgorithm,
        /// The rejected level.
        level: u32,
        /// Lowest accepted level.
        min: u32,
        /// Highest accepted level.
        max: u32,
    },

    /// A compression level was given for an algorithm that has none.
    #[error("compression algorithm {algorithm} does not take a level")]
    LevelNotSupported {
        /// The algorithm in question.
        algorithm: CompressionAlgorithm,
    },

    /// A file entry could not be found in its prefix group.
    #[error("Entry not found: {path}")]
    EntryNotFound {
        /// The path or alias that was looked up.
        path: String,
    },

    /// Another entry in the group already has the same identity.
    #[error("Entry already exists: {path}")]
    EntryExists {
        /// The path or alias that collided.
        path: String,
    },

    /// No prefix group matches the given prefix and language.
    #[error("Prefix not found: {prefix} (lang '{lang}')")]
    GroupNotFound {
        /// The prefix that was looked up.
        prefix: String,
        /// The language tag that was looked up.
        lang: String,
    },

    /// A prefix group with the same prefix and language already exists.
    #[error("Prefix already exists: {prefix} (lang '{lang}')")]
    GroupExists {
        /// The conflicting prefix.
        prefix: String,
        /// The conflicting language tag.
        lang: String,
    },

    /// The manifest has never been given a file location.
    ///
    /// Use [`ManifestEditor::save_as`] to pick one.
    ///
    /// [`ManifestEditor::save_as`]: crate::edit::ManifestEditor::save_as
    #[error("manifest has no file path; use save_as")]
    NoFilePath,
}

impl Error {
    /// Returns `true` if the error means the input is not a valid manifest.
    ///
    /// ```rust
    /// use qrcedit::ResourceManifest;
    ///
    /// let err = ResourceManifest::from_xml("<RCD/>", "/tmp").unwrap_err();
    /// assert!(err.is_format_error());
    /// ```
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::InvalidFormat(_) | Error::Xml { .. })
    }

    /// Returns `true` if this is a file system error.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Returns `true` if this error might be recoverable.
    ///
    /// Lookup and value errors are recoverable by retrying with different
    /// arguments; [`NoFilePath`][Self::NoFilePath] by choosing a location.
    /// Only transient I/O errors count, since a missing or unreadable file
    /// will not fix itself on retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::EntryNotFound { .. }
            | Error::EntryExists { .. }
            | Error::GroupNotFound { .. }
            | Error::GroupExists { .. }
            | Error::UnknownAlgorithm { .. }
            | Error::InvalidCompressionLevel { .. }
            | Error::LevelNotSupported { .. }
            | Error::NoFilePath => true,
            Error::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Error::InvalidFormat(reason.into())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(source: quick_xml::Error) -> Self {
        Error::Xml {
            position: 0,
            source,
        }
    }
}

/// A specialized Result type for manifest operations.
pub type Result<T> = std::result::Result<T, Error>;
