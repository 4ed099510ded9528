//! Shared test utilities for the random-gal test suite.
//!
//! Fixtures are built on the fly inside a [`TempDir`] so every test owns an
//! isolated tree it can mutate (delete files between scan and encode, etc.).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site(&["a.jpg", "b.png"], &[("trip", &["c.jpg"])]);
//! let layout = Config::default().layout(tmp.path());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 1x1 transparent PNG.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Write `bytes` to `dir/rel`, creating parent directories. Returns the full path.
pub fn write_file(dir: &Path, rel: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, bytes).unwrap();
    path
}

/// Write a small image whose bytes are unique to `rel`.
///
/// The content is the tiny PNG followed by the relative path, so two fixture
/// images never share a payload and assertions can tell them apart.
pub fn write_image(dir: &Path, rel: &str) -> PathBuf {
    let mut bytes = TINY_PNG.to_vec();
    bytes.extend_from_slice(rel.as_bytes());
    write_file(dir, rel, &bytes)
}

/// Build a served root with the default layout.
///
/// - `images` land in `sources/`
/// - each `(folder, files)` pair lands in `folders/<folder>/`
/// - `static/folder.png` is always present
pub fn setup_site(images: &[&str], folders: &[(&str, &[&str])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("sources")).unwrap();
    fs::create_dir_all(tmp.path().join("folders")).unwrap();
    for image in images {
        write_image(&tmp.path().join("sources"), image);
    }
    for (folder, files) in folders {
        let dir = tmp.path().join("folders").join(folder);
        fs::create_dir_all(&dir).unwrap();
        for file in *files {
            write_image(&dir, file);
        }
    }
    write_file(tmp.path(), "static/folder.png", TINY_PNG);
    tmp
}
