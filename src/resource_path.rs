//! Path handling for manifest entries.
//!
//! A `.qrc` file names its sources relative to its own directory. Entries keep
//! that relative form (always written as `./dir/file.ext` in memory) and are
//! compared by their *identity*: the absolute path of the alias, or of the
//! file name when there is no alias, resolved against the manifest directory.
//!
//! All functions here are lexical. They fold `.` and `..` segments but never
//! touch the file system, so entries pointing at files that do not exist yet
//! still resolve.

use std::path::{Component, Path, PathBuf};

/// Prefix marking a stored path as relative to the manifest directory.
pub const CURRENT_DIR_PREFIX: &str = "./";

/// Returns `s` without a leading `./` or `.\`.
pub fn strip_current_dir(s: &str) -> &str {
    s.strip_prefix("./")
        .or_else(|| s.strip_prefix(".\\"))
        .unwrap_or(s)
}

/// Folds `.` and `..` segments without consulting the file system.
///
/// A `..` that would climb above the root is dropped; a leading `..` in a
/// relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

/// Makes `dir` absolute against the current directory and normalizes it.
///
/// Falls back to the normalized input if the current directory is unavailable.
pub fn absolute_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return normalize(dir);
    }
    match std::path::absolute(dir) {
        Ok(abs) => normalize(&abs),
        Err(e) => {
            log::warn!("Failed to make '{}' absolute: {}", dir.display(), e);
            normalize(dir)
        }
    }
}

/// Returns the absolute directory a manifest file lives in.
pub fn manifest_dir(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => absolute_dir(parent),
        _ => absolute_dir(Path::new(".")),
    }
}

/// Resolves `path` against `base`.
///
/// Absolute inputs are returned normalized; relative inputs are joined onto
/// the (absolute) base first. Both `/` and `\` are accepted as separators in
/// the input.
pub fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = to_native(path);
    if path.is_absolute() {
        normalize(&path)
    } else {
        normalize(&absolute_dir(base).join(path))
    }
}

/// Computes the path of `target` relative to the directory `base`.
///
/// Both paths should be absolute. If they share no root (different Windows
/// drives, for example), `target` is returned unchanged.
pub fn relative_to(base: &Path, target: &Path) -> PathBuf {
    let base = normalize(base);
    let target = normalize(target);

    let base_parts: Vec<_> = base.components().collect();
    let target_parts: Vec<_> = target.components().collect();

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 && (has_root(&base_parts) || has_root(&target_parts)) {
        return target;
    }

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &target_parts[common..] {
        rel.push(part.as_os_str());
    }
    rel
}

/// Returns the in-memory form of `path` for a manifest living in `base`.
///
/// The result is `./` followed by the path relative to `base`, using `/` as
/// separator. The manifest directory itself is `./.`. Surrounding whitespace
/// is not part of the path, as in the XML form. Targets on another drive keep
/// their absolute form.
///
/// ```
/// use qrcedit::resource_path::stored_path;
/// use std::path::Path;
///
/// let base = Path::new("/project/res");
/// assert_eq!(stored_path(base, "icons/../logo.png"), "./logo.png");
/// assert_eq!(stored_path(base, "/project/shared/a.svg"), "./../shared/a.svg");
/// assert_eq!(stored_path(base, "icons/.."), "./.");
/// ```
pub fn stored_path(base: &Path, path: &str) -> String {
    let absolute = resolve(base, path.trim());
    let rel = relative_to(&absolute_dir(base), &absolute);
    if rel.is_absolute() {
        return to_slash(&rel);
    }
    match to_slash(&rel) {
        rel if rel.is_empty() => format!("{}.", CURRENT_DIR_PREFIX),
        rel => format!("{}{}", CURRENT_DIR_PREFIX, rel),
    }
}

/// Re-expresses a stored path after the manifest moved from `old_base` to
/// `new_base`, so that it still points at the same file.
pub fn rebase(stored: &str, old_base: &Path, new_base: &Path) -> String {
    let absolute = resolve(old_base, stored);
    stored_path(new_base, &absolute.to_string_lossy())
}

/// Joins a prefix and a file name into a resource path with a single `/`
/// between them, e.g. `/icons` + `open.png` → `/icons/open.png`.
pub fn join_resource_path(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let name = strip_current_dir(name).trim_start_matches('/');
    if prefix.starts_with('/') {
        format!("{}/{}", prefix, name)
    } else {
        format!("/{}{}{}", prefix, if prefix.is_empty() { "" } else { "/" }, name)
    }
}

/// Renders a path with `/` separators.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

fn has_root(parts: &[Component<'_>]) -> bool {
    parts
        .first()
        .is_some_and(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

fn to_native(path: &str) -> PathBuf {
    if std::path::MAIN_SEPARATOR == '\\' {
        PathBuf::from(path)
    } else {
        PathBuf::from(path.replace('\\', "/"))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_strip_current_dir() {
        assert_eq!(strip_current_dir("./a.png"), "a.png");
        assert_eq!(strip_current_dir(".\\a.png"), "a.png");
        assert_eq!(strip_current_dir("../a.png"), "../a.png");
        assert_eq!(strip_current_dir("a.png"), "a.png");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
    }

    #[test]
    fn test_resolve() {
        let base = Path::new("/proj/res");
        assert_eq!(resolve(base, "img/a.png"), PathBuf::from("/proj/res/img/a.png"));
        assert_eq!(resolve(base, "./img/a.png"), PathBuf::from("/proj/res/img/a.png"));
        assert_eq!(resolve(base, "../a.png"), PathBuf::from("/proj/a.png"));
        assert_eq!(resolve(base, "/etc/x"), PathBuf::from("/etc/x"));
        assert_eq!(resolve(base, "img\\a.png"), PathBuf::from("/proj/res/img/a.png"));
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(
            relative_to(Path::new("/a/b"), Path::new("/a/b/c/d.txt")),
            PathBuf::from("c/d.txt")
        );
        assert_eq!(
            relative_to(Path::new("/a/b"), Path::new("/a/x/d.txt")),
            PathBuf::from("../x/d.txt")
        );
        assert_eq!(relative_to(Path::new("/a"), Path::new("/a")), PathBuf::new());
    }

    #[test]
    fn test_stored_path() {
        let base = Path::new("/proj/res");
        assert_eq!(stored_path(base, "a.png"), "./a.png");
        assert_eq!(stored_path(base, "/proj/res/sub/a.png"), "./sub/a.png");
        assert_eq!(stored_path(base, "/proj/other/a.png"), "./../other/a.png");
    }

    #[test]
    fn test_stored_path_of_manifest_dir() {
        let base = Path::new("/proj/res");
        assert_eq!(stored_path(base, "."), "./.");
        assert_eq!(stored_path(base, "sub/.."), "./.");
        assert_eq!(stored_path(base, "/proj/res"), "./.");
        assert_eq!(resolve(base, "./."), PathBuf::from("/proj/res"));
    }

    #[test]
    fn test_stored_path_trims_whitespace() {
        let base = Path::new("/proj/res");
        assert_eq!(stored_path(base, "  a.png \n"), "./a.png");
    }

    #[test]
    fn test_rebase() {
        let a = Path::new("/proj/res");
        let b = Path::new("/proj/build/out");
        let moved = rebase("./icons/a.png", a, b);
        assert_eq!(moved, "./../../res/icons/a.png");
        assert_eq!(resolve(b, &moved), resolve(a, "./icons/a.png"));
    }

    #[test]
    fn test_join_resource_path() {
        assert_eq!(join_resource_path("/", "a.png"), "/a.png");
        assert_eq!(join_resource_path("/icons", "./a.png"), "/icons/a.png");
        assert_eq!(join_resource_path("/icons/", "a.png"), "/icons/a.png");
        assert_eq!(join_resource_path("icons", "a.png"), "/icons/a.png");
        assert_eq!(join_resource_path("", "a.png"), "/a.png");
    }

    #[test]
    fn test_manifest_dir() {
        assert_eq!(manifest_dir(Path::new("/proj/res/app.qrc")), PathBuf::from("/proj/res"));
        assert!(manifest_dir(Path::new("app.qrc")).is_absolute());
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("a/b/c")), "a/b/c");
        assert_eq!(to_slash(Path::new("/a/b")), "/a/b");
        assert_eq!(to_slash(Path::new("../a")), "../a");
    }
}
