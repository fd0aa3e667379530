//! Fuzz target for decoding `.qrc` manifests from arbitrary text.
//!
//! Run with: cargo +nightly fuzz run manifest_decode
//!
//! Anything that decodes must encode, and the encoded form must decode to
//! the same model.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use qrcedit::{EncodeOptions, parse_manifest, write_manifest};

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };
    let base = Path::new("/fuzz/res");
    let Ok(manifest) = parse_manifest(xml, base) else {
        return;
    };

    let encoded = write_manifest(&manifest, &EncodeOptions::default())
        .expect("decoded manifest must encode");
    let reloaded = parse_manifest(&encoded, base).expect("encoded manifest must decode");
    assert_eq!(
        reloaded,
        manifest.with_compression_defaults(),
        "round trip changed the manifest:\n{}",
        encoded
    );
});
