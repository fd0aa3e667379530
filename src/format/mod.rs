//! The `.qrc` XML format: element and attribute names, decoding and encoding.
//!
//! A manifest looks like this:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <RCC>
//!     <qresource prefix="/icons">
//!         <file alias="open.png" compress-algo="zstd" compress="19">img/open.png</file>
//!     </qresource>
//!     <qresource lang="de" prefix="/">
//!         <file threshold="50">strings_de.txt</file>
//!     </qresource>
//! </RCC>
//! ```
//!
//! Decoding restores every value the writer leaves out, so a manifest read
//! back after a save equals the saved one with
//! [`ResourceManifest::with_compression_defaults`] applied.
//!
//! [`ResourceManifest::with_compression_defaults`]: crate::ResourceManifest::with_compression_defaults

mod options;
pub mod parser;
pub mod writer;

pub use options::EncodeOptions;
pub use parser::{parse_manifest, read_manifest};
pub use writer::write_manifest;

/// Root element.
pub const RCC: &str = "RCC";

/// Element names.
pub mod element {
    /// A prefix group.
    pub const QRESOURCE: &str = "qresource";
    /// A file entry; its text is the path.
    pub const FILE: &str = "file";
}

/// Attribute names.
pub mod attribute {
    /// Prefix of a `qresource`.
    pub const PREFIX: &str = "prefix";
    /// Language of a `qresource`.
    pub const LANG: &str = "lang";
    /// Alias of a `file`.
    pub const ALIAS: &str = "alias";
    /// Compression algorithm of a `file`.
    pub const COMPRESS_ALGO: &str = "compress-algo";
    /// Compression level of a `file`.
    pub const COMPRESS: &str = "compress";
    /// Compression threshold of a `file`.
    pub const THRESHOLD: &str = "threshold";
}
