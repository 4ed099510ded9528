//! Display names and folder-name validation.
//!
//! ## Display Names
//!
//! Every image shown on a page is labelled with its base name, extension
//! stripped. The derivation only looks at the path, so the same path always
//! yields the same label:
//! - `/a/b/photo.png` → "photo"
//! - `sources/dawn.over.sea.jpg` → "dawn.over.sea"
//! - `folders/Travel` → "Travel" (directories keep their full name)
//!
//! ## Folder Names
//!
//! `/open_folder?folder=<name>` takes a name straight from the query string
//! and joins it onto the folders directory. [`FolderName::parse`] is the only
//! way to get a value that can be joined: it accepts exactly one normal path
//! component and rejects anything that could escape the folders directory.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Display name for an image: file stem without directory or extension.
///
/// - `"/a/b/photo.png"` → `"photo"`
/// - `"C:\\shots\\photo.jpg"` on Windows → `"photo"`
/// - `"archive.tar.png"` → `"archive.tar"` (only the last extension goes)
/// - `".png"` → `".png"` (hidden files have no extension)
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Display name for a folder: its last path component, untouched.
pub fn folder_display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("folder name is empty")]
    Empty,
    #[error("folder name contains a NUL byte")]
    Nul,
    #[error("folder name must be a single path segment: {0:?}")]
    NotASegment(String),
}

/// A folder name that is safe to join onto the folders directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderName(String);

impl FolderName {
    /// Validate an untrusted folder name.
    ///
    /// Accepts exactly one [`Component::Normal`]. Rejects `..`, `.`, any
    /// separator (either slash on every platform), absolute paths, drive
    /// prefixes, and NUL bytes.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        if raw.is_empty() {
            return Err(NameError::Empty);
        }
        if raw.contains('\0') {
            return Err(NameError::Nul);
        }
        // Backslash is a separator on Windows and never a sensible name elsewhere.
        if raw.contains('/') || raw.contains('\\') {
            return Err(NameError::NotASegment(raw.to_string()));
        }
        let mut components = Path::new(raw).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == OsStr::new(raw) => {
                Ok(Self(raw.to_string()))
            }
            _ => Err(NameError::NotASegment(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join onto `base`. The result always stays directly inside `base`.
    pub fn join_onto(&self, base: &Path) -> PathBuf {
        base.join(&self.0)
    }
}

impl fmt::Display for FolderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_directories_and_extension() {
        assert_eq!(display_name(Path::new("/a/b/photo.png")), "photo");
    }

    #[test]
    fn display_name_relative_path() {
        assert_eq!(display_name(Path::new("sources/dawn.jpg")), "dawn");
    }

    #[test]
    fn display_name_keeps_inner_dots() {
        assert_eq!(display_name(Path::new("archive.tar.png")), "archive.tar");
    }

    #[test]
    fn display_name_without_extension() {
        assert_eq!(display_name(Path::new("sources/README")), "README");
    }

    #[test]
    fn display_name_is_deterministic() {
        let p = Path::new("folders/trip/001-harbour.jpg");
        assert_eq!(display_name(p), display_name(p));
    }

    #[test]
    fn folder_display_name_keeps_dots() {
        assert_eq!(folder_display_name(Path::new("folders/v1.2")), "v1.2");
    }

    #[test]
    fn folder_name_accepts_plain_segment() {
        let name = FolderName::parse("gallery1").unwrap();
        assert_eq!(name.as_str(), "gallery1");
    }

    #[test]
    fn folder_name_accepts_spaces_and_dashes() {
        assert!(FolderName::parse("Summer 2023 - Lisbon").is_ok());
    }

    #[test]
    fn folder_name_rejects_empty() {
        assert_eq!(FolderName::parse(""), Err(NameError::Empty));
    }

    #[test]
    fn folder_name_rejects_parent() {
        assert!(matches!(
            FolderName::parse(".."),
            Err(NameError::NotASegment(_))
        ));
    }

    #[test]
    fn folder_name_rejects_current_dir() {
        assert!(FolderName::parse(".").is_err());
    }

    #[test]
    fn folder_name_rejects_traversal() {
        assert!(FolderName::parse("../etc").is_err());
        assert!(FolderName::parse("a/../../etc").is_err());
    }

    #[test]
    fn folder_name_rejects_absolute() {
        assert!(FolderName::parse("/etc").is_err());
    }

    #[test]
    fn folder_name_rejects_backslash() {
        assert!(FolderName::parse("..\\secret").is_err());
    }

    #[test]
    fn folder_name_rejects_nul() {
        assert_eq!(FolderName::parse("a\0b"), Err(NameError::Nul));
    }

    #[test]
    fn join_stays_inside_base() {
        let name = FolderName::parse("gallery1").unwrap();
        let joined = name.join_onto(Path::new("folders"));
        assert_eq!(joined, Path::new("folders/gallery1"));
        assert_eq!(joined.parent(), Some(Path::new("folders")));
    }
}
