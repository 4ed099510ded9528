//! # Random Gal
//!
//! A tiny web server that shows photos straight from disk. Point it at a
//! directory and every page load draws a fresh random selection; named
//! folders can be browsed in full.
//!
//! # Request Pipeline
//!
//! Every request runs the same short pipeline from scratch. Nothing is
//! cached between requests, so adding or removing a file shows up on the
//! next reload.
//!
//! ```text
//! 1. Scan      sources/            →  candidate paths    (walk + extension filter)
//! 2. Select    candidates          →  ordered subset     (shuffle-and-take, or all)
//! 3. Encode    each selected path  →  base64 payload     (per-item failures dropped)
//! 4. Assemble  payloads + host     →  view model
//! 5. Render    view model          →  HTML               (maud, fully buffered)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Recursive directory walk in `files` or `subdirectories` mode |
//! | [`encode`] | Whole-file base64 encoding and MIME guessing for `data:` URIs |
//! | [`select`] | Gallery (random subset) and folder (all, in order) selection |
//! | [`view`] | Assembles view models, dropping images that fail to encode |
//! | [`render`] | Maud templates for every page |
//! | [`server`] | Axum router, handlers and shared state |
//! | [`error`] | Request errors and their HTTP status mapping |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`naming`] | Display names and untrusted folder-name validation |
//! | [`host`] | Host name lookup shown in the page footer |
//! | [`types`] | Request-scoped records shared between stages |
//! | [`output`] | CLI output for `random-gal check` |
//!
//! # Design Decisions
//!
//! ## Inline Images
//!
//! Images are embedded as `data:` URIs rather than linked. One request
//! returns one self-contained page, and the server never has to expose the
//! image directories over HTTP.
//!
//! ## One Generator, Seeded Once
//!
//! The random generator is created at startup and shared behind a mutex.
//! Reseeding per request would make concurrent requests race on global
//! state; a fixed `gallery.seed` makes selections reproducible.
//!
//! ## Asymmetric Failure Policy
//!
//! A walk error aborts the scan (configurable to skip), while an encode error
//! only drops that one image. A gallery may therefore show fewer images than
//! its configured size.

pub mod config;
pub mod encode;
pub mod error;
pub mod host;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod select;
pub mod server;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
