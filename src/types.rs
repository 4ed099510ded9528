//! Request-scoped records passed between the scanner, assembler and templates.
//!
//! Nothing here outlives a single request: entries are produced by
//! [`crate::scan`], narrowed by [`crate::select`], turned into a
//! [`ViewModel`] by [`crate::view`] and consumed once by [`crate::render`].

use serde::Serialize;
use std::path::PathBuf;

/// What a [`CatalogEntry`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Image,
    Folder,
}

/// A path discovered by the scanner as eligible for display.
///
/// The path existed at scan time. It may be gone by the time it is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl CatalogEntry {
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Image,
        }
    }

    pub fn folder(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Folder,
        }
    }
}

/// An image ready to be inlined into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Base name without directory or extension (`/a/b/photo.png` → `photo`)
    pub name: String,
    /// MIME type guessed from the file extension
    pub mime: String,
    /// Standard base64 of the file bytes, unwrapped
    pub payload: String,
}

impl EncodedImage {
    /// `data:` URI suitable for an `<img src>` attribute.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.payload)
    }
}

/// Everything the gallery and folder templates need.
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    /// Images in presentation order, each appearing at most once.
    pub images: Vec<EncodedImage>,
    /// Host name of the serving machine; empty when the lookup failed.
    pub host: String,
    /// Remote address of the client, when the transport exposes it.
    pub client: Option<String>,
}

/// View of the folder listing page.
#[derive(Debug, Clone, Default)]
pub struct FolderIndex {
    /// Folder names in scan order.
    pub folders: Vec<String>,
    /// Shared placeholder thumbnail; `None` when the icon could not be read.
    pub icon: Option<EncodedImage>,
    pub host: String,
    pub client: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_prefixes_mime_and_encoding() {
        let img = EncodedImage {
            name: "dawn".into(),
            mime: "image/png".into(),
            payload: "AAEC".into(),
        };
        assert_eq!(img.data_uri(), "data:image/png;base64,AAEC");
    }

    #[test]
    fn entry_kind_serializes_lowercase() {
        let json = serde_json::to_string(&CatalogEntry::folder("folders/trip")).unwrap();
        assert!(json.contains(r#""kind":"folder""#));
    }
}
