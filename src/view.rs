//! Presentation assembly: turn selected entries into view models.
//!
//! For each entry the assembler derives the display name, calls the encoder
//! and keeps the result. Entries whose encoding fails are logged and dropped,
//! so a gallery of four can render with three images when a file vanished
//! between the scan and the read. Order is preserved.

use crate::encode::{self, EncodeError};
use crate::naming;
use crate::types::{CatalogEntry, EncodedImage, FolderIndex, ViewModel};
use std::path::Path;
use tracing::warn;

/// Build a [`ViewModel`] from selected entries.
///
/// `encode_fn` is usually [`encode::encode`]; tests pass their own.
pub fn assemble<F>(entries: &[CatalogEntry], mut encode_fn: F, host: &str) -> ViewModel
where
    F: FnMut(&Path) -> Result<String, EncodeError>,
{
    let images = entries
        .iter()
        .filter_map(|entry| match encode_fn(&entry.path) {
            Ok(payload) => Some(EncodedImage {
                name: naming::display_name(&entry.path),
                mime: encode::mime_for(&entry.path),
                payload,
            }),
            Err(e) => {
                warn!(path = %e.path.display(), error = %e.source, "Dropping image that could not be encoded");
                None
            }
        })
        .collect();

    ViewModel {
        images,
        host: host.to_string(),
        client: None,
    }
}

/// Build the folder listing view.
///
/// `icon` is the placeholder thumbnail path; a missing icon only removes the
/// thumbnail, the listing still renders.
pub fn folder_index(folders: &[CatalogEntry], icon: &Path, host: &str) -> FolderIndex {
    let icon = match encode::encode(icon) {
        Ok(payload) => Some(EncodedImage {
            name: naming::display_name(icon),
            mime: encode::mime_for(icon),
            payload,
        }),
        Err(e) => {
            warn!(path = %e.path.display(), error = %e.source, "Folder icon unavailable");
            None
        }
    };

    FolderIndex {
        folders: folders
            .iter()
            .map(|f| naming::folder_display_name(&f.path))
            .collect(),
        icon,
        host: host.to_string(),
        client: None,
    }
}
