//! Directory scanning.
//!
//! Walks a directory tree and returns the entries eligible for display.
//! Nothing is retained between calls: every request walks the disk again.
//!
//! ## Modes
//!
//! - [`ScanMode::Files`]: every regular file below the root whose extension is
//!   in the allow-list. Directories are descended into, never returned.
//! - [`ScanMode::Subdirectories`]: directories below the root (never the root
//!   itself). `recursive: true` flattens every level into one list;
//!   `recursive: false` stops at the immediate children.
//!
//! ```text
//! sources/                 Files → [sources/a.jpg, sources/trip/b.png]
//! ├── a.jpg
//! ├── notes.txt
//! └── trip/                Subdirectories { recursive: true } → [sources/trip]
//!     └── b.png
//! ```
//!
//! ## Ordering
//!
//! Entries are sorted by file name within each directory, so two scans of an
//! unchanged tree return the same sequence. Folder pages rely on this.
//!
//! ## Errors
//!
//! A missing or unreadable root is always an error. An error on an entry
//! below the root follows [`OnError`]: `Abort` fails the whole scan, `Skip`
//! logs a warning and keeps walking.

use crate::config::Layout;
use crate::types::CatalogEntry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("walk failed below {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// What to collect during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Files,
    Subdirectories { recursive: bool },
}

/// Reaction to an unreadable entry below the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    #[default]
    Abort,
    Skip,
}

/// Walk settings, usually built from [`crate::config::ScanConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Allowed extensions without the leading dot.
    pub extensions: Vec<String>,
    pub case_sensitive: bool,
    pub on_error: OnError,
    pub follow_links: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".to_string(), "png".to_string()],
            case_sensitive: true,
            on_error: OnError::Abort,
            follow_links: false,
        }
    }
}

impl ScanOptions {
    /// Whether `path` carries one of the allowed extensions.
    pub fn is_image(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if self.case_sensitive {
            self.extensions.iter().any(|allowed| allowed == ext)
        } else {
            self.extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        }
    }
}

/// Walk `root` and collect the entries selected by `mode`.
pub fn scan(
    root: &Path,
    mode: ScanMode,
    options: &ScanOptions,
) -> Result<Vec<CatalogEntry>, ScanError> {
    let meta = fs::metadata(root).map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    fs::read_dir(root).map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(options.follow_links)
        .sort_by_file_name();
    if mode == (ScanMode::Subdirectories { recursive: false }) {
        walker = walker.max_depth(1);
    }

    let mut entries = Vec::new();
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(source) => match options.on_error {
                // Depth 0 is the root itself, which `Skip` never covers.
                _ if source.depth() == 0 => {
                    return Err(ScanError::Walk {
                        root: root.to_path_buf(),
                        source,
                    });
                }
                OnError::Abort => {
                    return Err(ScanError::Walk {
                        root: root.to_path_buf(),
                        source,
                    });
                }
                OnError::Skip => {
                    warn!(root = %root.display(), error = %source, "Skipping unreadable entry");
                    continue;
                }
            },
        };

        let file_type = entry.file_type();
        match mode {
            ScanMode::Files if file_type.is_file() && options.is_image(entry.path()) => {
                entries.push(CatalogEntry::image(entry.into_path()));
            }
            ScanMode::Subdirectories { .. } if file_type.is_dir() => {
                entries.push(CatalogEntry::folder(entry.into_path()));
            }
            _ => {}
        }
    }

    debug!(root = %root.display(), ?mode, found = entries.len(), "Scan complete");
    Ok(entries)
}

/// One named folder and how many images it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderSummary {
    pub path: PathBuf,
    pub images: usize,
}

/// What the server would find right now, for `random-gal check`.
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    pub images: Vec<CatalogEntry>,
    pub folders: Vec<FolderSummary>,
}

/// Scan the gallery source and every named folder under `layout`.
pub fn inventory(layout: &Layout, options: &ScanOptions) -> Result<Inventory, ScanError> {
    let images = scan(&layout.images, ScanMode::Files, options)?;
    let folders = scan(
        &layout.folders,
        ScanMode::Subdirectories { recursive: false },
        options,
    )?
    .into_iter()
    .map(|folder| -> Result<FolderSummary, ScanError> {
        let images = scan(&folder.path, ScanMode::Files, options)?.len();
        Ok(FolderSummary {
            path: folder.path,
            images,
        })
    })
    .collect::<Result<Vec<_>, _>>()?;

    Ok(Inventory { images, folders })
}
