//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A manifest exercising every attribute, as a person might write it by hand.
pub const SAMPLE_QRC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE RCC>
<RCC version="1.0">
    <qresource prefix="/icons">
        <file alias="open.png">img/open.png</file>
        <file compress-algo="zstd" compress="19">img/close.png</file>
        <file compress-algo="zlib">img/save.png</file>
    </qresource>
    <qresource prefix="/i18n" lang="de">
        <file threshold="50">strings_de.txt</file>
        <file compress-algo="none">../shared/logo.svg</file>
    </qresource>
</RCC>
"#;

/// Source files referenced by [`SAMPLE_QRC`], relative to the manifest.
pub const SAMPLE_SOURCES: &[&str] = &[
    "img/open.png",
    "img/close.png",
    "img/save.png",
    "strings_de.txt",
    "../shared/logo.svg",
];

/// A project layout in a temporary directory: `<tmp>/res/app.qrc` with its
/// sources.
pub struct Project {
    pub dir: TempDir,
    pub manifest: PathBuf,
}

impl Project {
    /// Creates the layout with [`SAMPLE_QRC`] and all of its sources.
    pub fn sample() -> Self {
        let project = Self::with_manifest(SAMPLE_QRC);
        for source in SAMPLE_SOURCES {
            project.touch(source);
        }
        project
    }

    /// Creates the layout with the given manifest text and no sources.
    pub fn with_manifest(xml: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let res = dir.path().join("res");
        fs::create_dir_all(&res).expect("Failed to create res dir");
        let manifest = res.join("app.qrc");
        fs::write(&manifest, xml).expect("Failed to write manifest");
        Self { dir, manifest }
    }

    /// The manifest directory.
    pub fn res_dir(&self) -> PathBuf {
        self.manifest
            .parent()
            .expect("manifest has a parent")
            .to_path_buf()
    }

    /// Creates an empty file relative to the manifest directory.
    pub fn touch(&self, rel: &str) -> PathBuf {
        let path = self.res_dir().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, b"").expect("Failed to create source file");
        path
    }

    /// Reads the manifest text.
    pub fn read(&self) -> String {
        fs::read_to_string(&self.manifest).expect("Failed to read manifest")
    }

    /// The backup location of the manifest.
    pub fn backup(&self) -> PathBuf {
        self.res_dir().join("app.qrc.bak")
    }
}

/// Writes `xml` to `<dir>/<name>` and returns the path.
pub fn write_file(dir: &Path, name: &str, xml: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, xml).expect("Failed to write file");
    path
}
