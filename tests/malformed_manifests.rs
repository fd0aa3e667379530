//! Tests for malformed and hand-mangled manifest handling.
//!
//! These tests verify that qrcedit reports a format error, rather than
//! panicking or silently dropping content, when a `.qrc` file is broken,
//! and that harmless oddities people leave in real manifests still load.

mod common;

use std::path::Path;

use qrcedit::{Error, GroupKey, ResourceManifest, read_manifest};

use common::{Project, write_file};

fn parse(xml: &str) -> qrcedit::Result<ResourceManifest> {
    ResourceManifest::from_xml(xml, Path::new("/proj/res"))
}

/// Asserts that `xml` is rejected as not being a valid manifest.
fn assert_rejected(xml: &str) {
    match parse(xml) {
        Ok(m) => panic!("accepted malformed manifest {:?}: {:?}", xml, m),
        Err(e) => assert!(e.is_format_error(), "{:?} gave non-format error {:?}", xml, e),
    }
}

// =============================================================================
// Not a manifest
// =============================================================================

#[test]
fn test_empty_document() {
    assert_rejected("");
    assert_rejected("   \n\t");
    assert_rejected(r#"<?xml version="1.0"?>"#);
}

#[test]
fn test_wrong_root() {
    assert_rejected("<RCD/>");
    assert_rejected("<rcc/>");
    assert_rejected("<qresource><file>a</file></qresource>");
}

#[test]
fn test_second_root() {
    assert_rejected("<RCC/><RCC/>");
    assert_rejected("<RCC></RCC><qresource/>");
}

#[test]
fn test_plain_text() {
    assert_rejected("img/open.png");
}

// =============================================================================
// Not well-formed
// =============================================================================

#[test]
fn test_unclosed_elements() {
    assert_rejected("<RCC>");
    assert_rejected("<RCC><qresource>");
    assert_rejected("<RCC><qresource><file>a");
    assert_rejected("<RCC");
}

#[test]
fn test_mismatched_end_tag() {
    let err = parse("<RCC><qresource></RCC>").unwrap_err();
    assert!(matches!(err, Error::Xml { .. }));
    assert_rejected("<RCC></qresource>");
}

#[test]
fn test_bad_attributes() {
    assert_rejected("<RCC><qresource prefix=icons></qresource></RCC>");
    assert_rejected(r#"<RCC><qresource prefix="/a" prefix="/b"></qresource></RCC>"#);
    assert_rejected(r#"<RCC><qresource prefix="&nope;"></qresource></RCC>"#);
}

#[test]
fn test_bad_entity_in_path() {
    assert_rejected("<RCC><qresource><file>&bogus;</file></qresource></RCC>");
}

// =============================================================================
// Schema violations
// =============================================================================

#[test]
fn test_file_without_path() {
    assert_rejected("<RCC><qresource><file></file></qresource></RCC>");
    assert_rejected("<RCC><qresource><file/></qresource></RCC>");
    assert_rejected("<RCC><qresource><file>   </file></qresource></RCC>");
}

#[test]
fn test_unknown_algorithm() {
    assert_rejected(r#"<RCC><qresource><file compress-algo="lzma">a</file></qresource></RCC>"#);
}

#[test]
fn test_level_out_of_range() {
    assert_rejected(
        r#"<RCC><qresource><file compress-algo="zlib" compress="12">a</file></qresource></RCC>"#,
    );
    assert_rejected(
        r#"<RCC><qresource><file compress-algo="zstd" compress="20">a</file></qresource></RCC>"#,
    );
}

#[test]
fn test_non_numeric_values() {
    assert_rejected(r#"<RCC><qresource><file compress="high">a</file></qresource></RCC>"#);
    assert_rejected(r#"<RCC><qresource><file threshold="-5">a</file></qresource></RCC>"#);
    assert_rejected(r#"<RCC><qresource><file threshold="">a</file></qresource></RCC>"#);
}

// =============================================================================
// Tolerated oddities
// =============================================================================

#[test]
fn test_unknown_elements_are_skipped() {
    let m = parse(
        r#"<RCC>
            <comment>generated</comment>
            <qresource prefix="/a">
                <meta><file>hidden</file></meta>
                <file>a.png</file>
            </qresource>
        </RCC>"#,
    )
    .unwrap();
    assert_eq!(m.file_count(), 1);
    assert_eq!(m.groups()[0].files()[0].path(), "./a.png");
}

#[test]
fn test_whitespace_and_cdata_paths() {
    let m = parse(
        "<RCC><qresource>\n  <file>\n    img/a.png\n  </file>\n  <file><![CDATA[img/b&c.png]]></file>\n</qresource></RCC>",
    )
    .unwrap();
    let files = m.groups()[0].files();
    assert_eq!(files[0].path(), "./img/a.png");
    assert_eq!(files[1].path(), "./img/b&c.png");
}

#[test]
fn test_level_on_levelless_algorithm_is_ignored() {
    let m = parse(r#"<RCC><qresource><file compress="9">a</file></qresource></RCC>"#).unwrap();
    assert_eq!(m.groups()[0].files()[0].compression().level(), None);
}

#[test]
fn test_duplicate_entries_are_collapsed() {
    let m = parse(
        r#"<RCC><qresource prefix="/x">
            <file>a.png</file>
            <file>./a.png</file>
            <file>sub/../a.png</file>
        </qresource></RCC>"#,
    )
    .unwrap();
    assert_eq!(m.group(&GroupKey::for_prefix("/x")).unwrap().len(), 1);
}

#[test]
fn test_escaped_text_is_unescaped() {
    let m = parse(r#"<RCC><qresource prefix="/a&amp;b"><file>x&amp;y.txt</file></qresource></RCC>"#)
        .unwrap();
    assert_eq!(m.groups()[0].key().prefix(), "/a&b");
    assert_eq!(m.groups()[0].files()[0].file_name(), "x&y.txt");
}

// =============================================================================
// From disk
// =============================================================================

#[test]
fn test_binary_file_is_rejected() {
    let project = Project::with_manifest("<RCC/>");
    let path = project.res_dir().join("image.qrc");
    std::fs::write(&path, [0x89, b'P', b'N', b'G', 0xff, 0xfe, 0x00]).unwrap();

    // Not UTF-8, so reading fails before parsing.
    let err = read_manifest(&path).unwrap_err();
    assert!(err.is_io_error());
}

#[test]
fn test_truncated_file_is_rejected() {
    let project = Project::sample();
    let text = project.read();
    let path = write_file(&project.res_dir(), "cut.qrc", &text[..text.len() / 2]);

    let err = read_manifest(&path).unwrap_err();
    assert!(err.is_format_error());
}
