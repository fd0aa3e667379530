//! Fuzz target for the lexical path helpers.
//!
//! Run with: cargo +nightly fuzz run resource_path
//!
//! Properties checked:
//! - Stored paths resolve to the same file as their input
//! - Rebasing onto another directory keeps the target

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use qrcedit::resource_path::{rebase, resolve, stored_path};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.contains('\0') {
        return;
    }

    let base = Path::new("/fuzz/a/b");
    let target = resolve(base, input);
    let stored = stored_path(base, input);
    assert_eq!(resolve(base, &stored), target, "stored form {:?}", stored);

    let other = Path::new("/fuzz/c");
    let moved = rebase(&stored, base, other);
    assert_eq!(resolve(other, &moved), target, "rebased form {:?}", moved);
});
