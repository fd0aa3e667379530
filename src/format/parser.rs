//! Manifest decoding.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{RCC, attribute, element};
use crate::compression::{Compression, CompressionAlgorithm};
use crate::manifest::{DEFAULT_PREFIX, FileEntry, GroupKey, ResourceManifest};
use crate::resource_path;
use crate::{Error, Result};

/// Reads and decodes the manifest at `path`.
///
/// Relative entry paths are resolved against the directory containing the
/// file.
pub fn read_manifest(path: impl AsRef<Path>) -> Result<ResourceManifest> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    parse_manifest(&xml, &resource_path::manifest_dir(path))
}

/// Decodes a manifest from XML text.
///
/// `base` is the directory the manifest lives in; entry paths are stored
/// relative to it.
///
/// # Errors
///
/// Returns [`Error::Xml`] for malformed XML and [`Error::InvalidFormat`] when
/// the document is not a resource collection or holds invalid values.
pub fn parse_manifest(xml: &str, base: &Path) -> Result<ResourceManifest> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parser = ManifestParser::new(base);
    loop {
        let event = reader.read_event().map_err(|source| Error::Xml {
            position: reader.buffer_position() as u64,
            source,
        })?;
        match event {
            Event::Start(e) => parser.open(&e)?,
            Event::Empty(e) => {
                parser.open(&e)?;
                parser.close()?;
            }
            Event::End(_) => parser.close()?,
            Event::Text(text) => {
                if parser.wants_text() {
                    let text = text
                        .unescape()
                        .map_err(|e| Error::invalid_format(format!("bad file text: {}", e)))?;
                    parser.push_text(&text);
                }
            }
            Event::CData(data) => {
                if parser.wants_text() {
                    let text = std::str::from_utf8(&data)
                        .map_err(|e| Error::invalid_format(format!("bad CDATA: {}", e)))?;
                    parser.push_text(text);
                }
            }
            Event::Eof => break,
            // Declarations, comments, doctypes and processing instructions.
            _ => {}
        }
    }
    parser.finish()
}

/// What the element on top of the stack is.
#[derive(Debug)]
enum Open {
    Root,
    Group(GroupKey),
    File(PendingFile),
    Skipped,
}

#[derive(Debug)]
struct PendingFile {
    alias: Option<String>,
    compression: Compression,
    text: String,
}

struct ManifestParser<'a> {
    base: &'a Path,
    manifest: ResourceManifest,
    stack: Vec<Open>,
    root_seen: bool,
}

impl<'a> ManifestParser<'a> {
    fn new(base: &'a Path) -> Self {
        Self {
            base,
            manifest: ResourceManifest::new(),
            stack: Vec::new(),
            root_seen: false,
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        let next = match self.stack.last() {
            None if self.root_seen => {
                return Err(Error::invalid_format(format!(
                    "unexpected element <{}> after the root element",
                    name
                )));
            }
            None if name == RCC => {
                self.root_seen = true;
                Open::Root
            }
            None => {
                return Err(Error::invalid_format(format!(
                    "root element is <{}>, expected <{}>",
                    name, RCC
                )));
            }
            Some(Open::Root) if name == element::QRESOURCE => {
                let attrs = read_attributes(e)?;
                let prefix = lookup(&attrs, attribute::PREFIX)
                    .filter(|p| !p.is_empty())
                    .unwrap_or(DEFAULT_PREFIX);
                let lang = lookup(&attrs, attribute::LANG).unwrap_or_default();
                let key = GroupKey::new(prefix, lang);
                self.manifest.group_or_insert(key.clone());
                Open::Group(key)
            }
            Some(Open::Group(_)) if name == element::FILE => {
                let attrs = read_attributes(e)?;
                Open::File(PendingFile {
                    alias: lookup(&attrs, attribute::ALIAS).map(str::to_string),
                    compression: read_compression(&attrs)?,
                    text: String::new(),
                })
            }
            Some(Open::Skipped) => Open::Skipped,
            Some(_) => {
                log::debug!("Skipping unknown element <{}>", name);
                Open::Skipped
            }
        };
        self.stack.push(next);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Some(closed) = self.stack.pop() else {
            return Err(Error::invalid_format("unexpected closing tag"));
        };
        if let Open::File(file) = closed {
            let Some(Open::Group(key)) = self.stack.last() else {
                return Err(Error::invalid_format("<file> outside of <qresource>"));
            };
            let key = key.clone();
            self.finish_file(key, file)?;
        }
        Ok(())
    }

    fn finish_file(&mut self, key: GroupKey, file: PendingFile) -> Result<()> {
        let text = file.text.trim();
        if text.is_empty() {
            return Err(Error::invalid_format(format!(
                "<file> without a path in prefix {}",
                key
            )));
        }
        let mut entry = FileEntry::from_source(self.base, text).with_compression(file.compression);
        entry.set_alias(file.alias);
        self.manifest.add_file(key, entry, self.base);
        Ok(())
    }

    fn wants_text(&self) -> bool {
        matches!(self.stack.last(), Some(Open::File(_)))
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Open::File(file)) = self.stack.last_mut() {
            file.text.push_str(text);
        }
    }

    fn finish(self) -> Result<ResourceManifest> {
        if !self.root_seen {
            return Err(Error::invalid_format(format!(
                "document has no <{}> element",
                RCC
            )));
        }
        if let Some(open) = self.stack.last() {
            return Err(Error::invalid_format(format!(
                "document ends inside {}",
                describe(open)
            )));
        }
        Ok(self.manifest)
    }
}

fn describe(open: &Open) -> String {
    match open {
        Open::Root => format!("<{}>", RCC),
        Open::Group(key) => format!("<{}> {}", element::QRESOURCE, key),
        Open::File(_) => format!("<{}>", element::FILE),
        Open::Skipped => "an unknown element".to_string(),
    }
}

fn read_attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::invalid_format(format!("bad attribute: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::invalid_format(format!("bad value for '{}': {}", key, e)))?;
        out.push((key, value.into_owned()));
    }
    Ok(out)
}

fn lookup<'v>(attrs: &'v [(String, String)], name: &str) -> Option<&'v str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn parse_number(name: &str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| {
        Error::invalid_format(format!("attribute {}=\"{}\" is not a number", name, value))
    })
}

/// Builds the compression settings of a `file` element, filling in every
/// value the writer leaves out.
fn read_compression(attrs: &[(String, String)]) -> Result<Compression> {
    let algorithm = match lookup(attrs, attribute::COMPRESS_ALGO) {
        Some(name) => name
            .parse::<CompressionAlgorithm>()
            .map_err(|e| Error::invalid_format(e.to_string()))?,
        None => CompressionAlgorithm::Best,
    };

    let mut compression = Compression::new(algorithm);
    if let Some(value) = lookup(attrs, attribute::COMPRESS) {
        let level = parse_number(attribute::COMPRESS, value)?;
        if algorithm.supports_level() {
            compression
                .set_level(Some(level))
                .map_err(|e| Error::invalid_format(e.to_string()))?;
        } else {
            log::debug!("Ignoring compress=\"{}\" for algorithm {}", value, algorithm);
        }
    }
    if let Some(value) = lookup(attrs, attribute::THRESHOLD) {
        compression.set_threshold(parse_number(attribute::THRESHOLD, value)?);
    }
    Ok(compression.with_defaults())
}
