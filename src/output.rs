//! CLI output formatting for `random-gal check`.
//!
//! # Information-First Display
//!
//! Each entity leads with its positional index and display name, the way it
//! will appear on a page. Filesystem paths follow as indented `Source:`
//! context lines, relative to the served root.
//!
//! ```text
//! Images (sources/)
//! 001 dawn
//!     Source: sources/dawn.jpg
//! 002 harbour
//!     Source: sources/trip/harbour.png
//!
//! Folders (folders/)
//! 001 alps (3 photos)
//!     Source: folders/alps/
//! 002 coast (0 photos)
//!     Source: folders/coast/
//!
//! 2 images, 2 folders
//! ```
//!
//! # Architecture
//!
//! [`format_check_output`] returns `Vec<String>` for testability;
//! [`print_check_output`] writes it to stdout. The format function is pure.

use crate::config::Layout;
use crate::naming;
use crate::scan::Inventory;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + name, with optional photo count.
///
/// ```text
/// 001 alps (3 photos)
/// 001 dawn
/// ```
fn entity_header(index: usize, name: &str, count: Option<usize>) -> String {
    match count {
        Some(1) => format!("{} {} (1 photo)", format_index(index), name),
        Some(n) => format!("{} {} ({} photos)", format_index(index), name, n),
        None => format!("{} {}", format_index(index), name),
    }
}

/// Path relative to `root` for display, or the full path when outside it.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the inventory found under `root`.
pub fn format_check_output(inventory: &Inventory, layout: &Layout, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Images ({}/)", relative(&layout.images, root)));
    if inventory.images.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, entry) in inventory.images.iter().enumerate() {
        lines.push(entity_header(i + 1, &naming::display_name(&entry.path), None));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            relative(&entry.path, root)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Folders ({}/)", relative(&layout.folders, root)));
    if inventory.folders.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, folder) in inventory.folders.iter().enumerate() {
        lines.push(entity_header(
            i + 1,
            &naming::folder_display_name(&folder.path),
            Some(folder.images),
        ));
        lines.push(format!(
            "{}Source: {}/",
            indent(1),
            relative(&folder.path, root)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(inventory.images.len(), "image", "images"),
        plural(inventory.folders.len(), "folder", "folders")
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(inventory: &Inventory, layout: &Layout, root: &Path) {
    for line in format_check_output(inventory, layout, root) {
        println!("{}", line);
    }
}
