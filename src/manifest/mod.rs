//! The in-memory resource manifest.
//!
//! A [`ResourceManifest`] holds an ordered list of [`PrefixGroup`]s, each
//! identified by a [`GroupKey`] (prefix and language) and holding an ordered
//! list of [`FileEntry`]s.
//!
//! Entries are deduplicated by identity: the absolute path of the alias, or
//! of the file name when there is no alias, resolved against the manifest
//! directory. Adding an entry whose identity is already present in the group
//! is a no-op, so methods that add take the manifest directory as `base`.

mod entry;
mod group;
mod resources;

pub use entry::FileEntry;
pub use group::{DEFAULT_PREFIX, GroupKey, PrefixGroup};
pub use resources::ResourceManifest;
