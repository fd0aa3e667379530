//! Manifest encoding.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{EncodeOptions, RCC, attribute, element};
use crate::manifest::{FileEntry, PrefixGroup, ResourceManifest};
use crate::{Error, Result};

/// Encodes a manifest as XML text.
///
/// Groups and entries are written in their stored order. Attributes that
/// hold their default value are left out (see [`Compression::elided`]), and
/// file paths are written without their leading `./`.
///
/// # Example
///
/// ```rust
/// use qrcedit::{EncodeOptions, FileEntry, GroupKey, ResourceManifest};
/// use qrcedit::format::write_manifest;
/// use std::path::Path;
///
/// let mut manifest = ResourceManifest::new();
/// manifest.add_file(GroupKey::default(), FileEntry::new("logo.png"), Path::new("/p"));
///
/// let xml = write_manifest(&manifest, &EncodeOptions::default())?;
/// assert!(xml.contains(r#"<qresource prefix="/">"#));
/// assert!(xml.contains("<file>logo.png</file>"));
/// # Ok::<(), qrcedit::Error>(())
/// ```
///
/// [`Compression::elided`]: crate::Compression::elided
pub fn write_manifest(manifest: &ResourceManifest, options: &EncodeOptions) -> Result<String> {
    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };

    if options.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }

    if manifest.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(RCC)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(RCC)))?;
        for group in manifest.groups() {
            write_group(&mut writer, group)?;
        }
        writer.write_event(Event::End(BytesEnd::new(RCC)))?;
    }

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes)
        .map_err(|e| Error::invalid_format(format!("encoded manifest is not UTF-8: {}", e)))
}

fn write_group(writer: &mut Writer<Vec<u8>>, group: &PrefixGroup) -> Result<()> {
    let key = group.key();
    let mut start = BytesStart::new(element::QRESOURCE);
    if !key.lang().is_empty() {
        start.push_attribute((attribute::LANG, key.lang()));
    }
    start.push_attribute((attribute::PREFIX, key.effective_prefix()));

    if group.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for entry in group.files() {
        write_file(writer, entry)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element::QRESOURCE)))?;
    Ok(())
}

fn write_file(writer: &mut Writer<Vec<u8>>, entry: &FileEntry) -> Result<()> {
    let mut start = BytesStart::new(element::FILE);
    if let Some(alias) = entry.alias() {
        start.push_attribute((attribute::ALIAS, alias));
    }

    let elided = entry.compression().elided();
    if let Some(algorithm) = elided.algorithm {
        start.push_attribute((attribute::COMPRESS_ALGO, algorithm.as_str()));
    }
    if let Some(level) = elided.level {
        start.push_attribute((attribute::COMPRESS, level.to_string().as_str()));
    }
    if let Some(threshold) = elided.threshold {
        start.push_attribute((attribute::THRESHOLD, threshold.to_string().as_str()));
    }

    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(entry.file_name())))?;
    writer.write_event(Event::End(BytesEnd::new(element::FILE)))?;
    Ok(())
}
