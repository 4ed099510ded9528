//! Server configuration.
//!
//! Loaded from `config.toml` in the served root directory. Every key is
//! optional: the file is merged on top of the stock defaults, so it only
//! needs the values it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0"              # Address to listen on
//! port = 8080
//!
//! [paths]                       # Relative paths resolve against the root
//! images = "sources"            # Random gallery source (walked recursively)
//! folders = "folders"           # Each child directory is a named gallery
//! static = "static"             # Served verbatim under /static/
//! folder_icon = "static/folder.png"
//!
//! [gallery]
//! size = 4                      # Images per random gallery
//! shortfall = "clamp"           # clamp | reject when fewer images exist
//! home = "gallery"              # gallery | folders: what `/` shows
//! # seed = 42                   # Fixed seed for reproducible shuffles
//!
//! [scan]
//! extensions = ["jpg", "png"]
//! case_sensitive = true
//! on_error = "abort"            # abort | skip unreadable entries
//! follow_links = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::scan::{OnError, ScanOptions};
use crate::select::{Selection, Shortfall};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub gallery: GalleryConfig,
    pub scan: ScanConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.size == 0 {
            return Err(ConfigError::Validation(
                "gallery.size must be at least 1".into(),
            ));
        }
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .scan
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "scan.extensions entries must be bare extensions without a dot, got {bad:?}"
            )));
        }
        Ok(())
    }

    /// Resolve every configured path against `root`.
    pub fn layout(&self, root: &Path) -> Layout {
        Layout {
            images: root.join(&self.paths.images),
            folders: root.join(&self.paths.folders),
            static_dir: root.join(&self.paths.static_dir),
            folder_icon: root.join(&self.paths.folder_icon),
        }
    }
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Directory layout, relative to the served root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Source of the random gallery.
    pub images: PathBuf,
    /// Parent of the named galleries reachable through `/open_folder`.
    pub folders: PathBuf,
    /// Directory served verbatim under `/static/`.
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    /// Placeholder thumbnail shown for every folder on the folder index.
    pub folder_icon: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images: PathBuf::from("sources"),
            folders: PathBuf::from("folders"),
            static_dir: PathBuf::from("static"),
            folder_icon: PathBuf::from("static/folder.png"),
        }
    }
}

/// Which page `/` serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Home {
    #[default]
    Gallery,
    Folders,
}

/// Random gallery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Number of images drawn per request.
    pub size: usize,
    /// What to do when fewer than `size` images exist.
    pub shortfall: Shortfall,
    pub home: Home,
    /// Fixed seed for the shared generator. Random at startup when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            size: 4,
            shortfall: Shortfall::Clamp,
            home: Home::Gallery,
            seed: None,
        }
    }
}

impl GalleryConfig {
    pub fn selection(&self) -> Selection {
        Selection::Gallery {
            count: self.size,
            shortfall: self.shortfall,
        }
    }
}

/// Directory walk settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Allowed image extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Whether `photo.JPG` matches `jpg`.
    pub case_sensitive: bool,
    pub on_error: OnError,
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".to_string(), "png".to_string()],
            case_sensitive: true,
            on_error: OnError::Abort,
            follow_links: false,
        }
    }
}

impl ScanConfig {
    pub fn options(&self) -> ScanOptions {
        ScanOptions {
            extensions: self.extensions.clone(),
            case_sensitive: self.case_sensitive,
            on_error: self.on_error,
            follow_links: self.follow_links,
        }
    }
}

/// Absolute (root-joined) locations the server reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub images: PathBuf,
    pub folders: PathBuf,
    pub static_dir: PathBuf,
    pub folder_icon: PathBuf,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(Config::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in `root`, falling back to stock defaults.
pub fn load_config(root: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# random-gal configuration
# ========================
# Place this file in the directory you serve (see --root).
# All settings are optional; the values below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Listener
# ---------------------------------------------------------------------------
[server]
bind = "0.0.0.0"
port = 8080

# ---------------------------------------------------------------------------
# Directory layout (relative paths resolve against the served root)
# ---------------------------------------------------------------------------
[paths]
# Images for the random gallery. Walked recursively.
images = "sources"

# Each child directory becomes a gallery reachable at /open_folder?folder=NAME.
folders = "folders"

# Served as-is under /static/.
static = "static"

# Thumbnail shown for every folder on the folder index.
folder_icon = "static/folder.png"

# ---------------------------------------------------------------------------
# Random gallery
# ---------------------------------------------------------------------------
[gallery]
# Images drawn per request.
size = 4

# When fewer images than `size` exist:
#   "clamp"  - show what there is
#   "reject" - answer with an error page
shortfall = "clamp"

# What / shows: "gallery" (random images) or "folders" (folder index).
home = "gallery"

# Fixed seed for reproducible selections. Random at startup when omitted.
# seed = 42

# ---------------------------------------------------------------------------
# Directory scanning
# ---------------------------------------------------------------------------
[scan]
# File extensions treated as images, without the dot.
extensions = ["jpg", "png"]

# Match extensions exactly ("JPG" does not match "jpg").
case_sensitive = true

# What an unreadable entry during a walk does:
#   "abort" - fail the whole request
#   "skip"  - log it and keep walking
on_error = "abort"

# Follow symbolic links while walking.
follow_links = false
"##
}
