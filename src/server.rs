//! HTTP server: routes, handlers and shared state.
//!
//! ## Routes
//!
//! | Route | Page |
//! |-------|------|
//! | `GET /` | gallery or folder index, per `gallery.home` |
//! | `GET /gallery` | random gallery |
//! | `GET /folders` | folder index |
//! | `GET /open_folder?folder=NAME` | every image in `folders/NAME` |
//! | `GET /static/*` | files from the static directory |
//!
//! ## Request Flow
//!
//! ```text
//! handler → scan → select → encode each → assemble → render → response
//! ```
//!
//! Scanning and encoding block, so each request's work runs on tokio's
//! blocking pool. Every request walks the disk and encodes from scratch.
//!
//! ## Shared State
//!
//! [`AppState`] is immutable apart from one [`StdRng`], created at startup
//! and locked only while a selection shuffles.

use crate::config::{Config, Home, Layout};
use crate::encode;
use crate::error::{AppError, AppResult, error_page};
use crate::host::{self, HostLookup, SystemHost};
use crate::naming::FolderName;
use crate::render;
use crate::scan::{self, ScanMode, ScanOptions};
use crate::select::{self, Selection};
use crate::types::{CatalogEntry, FolderIndex, ViewModel};
use crate::view;
use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Response};
use axum::routing::get;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    layout: Arc<Layout>,
    scan_options: Arc<ScanOptions>,
    rng: Arc<Mutex<StdRng>>,
    host: Arc<dyn HostLookup>,
}

impl AppState {
    /// State for serving `root` with `config`.
    ///
    /// The generator is seeded here, once: from `gallery.seed` when set,
    /// otherwise from OS entropy.
    pub fn new(config: Config, root: &Path) -> Self {
        let rng = match config.gallery.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            layout: Arc::new(config.layout(root)),
            scan_options: Arc::new(config.scan.options()),
            config: Arc::new(config),
            rng: Arc::new(Mutex::new(rng)),
            host: Arc::new(SystemHost),
        }
    }

    /// Replace the host lookup.
    pub fn with_host(mut self, host: impl HostLookup + 'static) -> Self {
        self.host = Arc::new(host);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn pick(
        &self,
        entries: Vec<CatalogEntry>,
        selection: &Selection,
    ) -> AppResult<Vec<CatalogEntry>> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(select::select(entries, selection, &mut *rng)?)
    }

    /// Random gallery view: scan the images directory, shuffle, encode.
    pub fn gallery_view(&self) -> AppResult<ViewModel> {
        let candidates = scan::scan(&self.layout.images, ScanMode::Files, &self.scan_options)?;
        let selected = self.pick(candidates, &self.config.gallery.selection())?;
        debug!(selected = selected.len(), "Gallery selection");
        let host = host::host_or_empty(self.host.as_ref());
        Ok(view::assemble(&selected, encode::encode, &host))
    }

    /// Every image inside one named folder, in scan order.
    pub fn folder_view(&self, name: &FolderName) -> AppResult<ViewModel> {
        let dir = name.join_onto(&self.layout.folders);
        // Same view of symlinks as the folder index.
        let meta = if self.scan_options.follow_links {
            fs::metadata(&dir)
        } else {
            fs::symlink_metadata(&dir)
        };
        if !meta.is_ok_and(|m| m.is_dir()) {
            return Err(AppError::FolderNotFound(dir));
        }
        let candidates = scan::scan(&dir, ScanMode::Files, &self.scan_options)?;
        let selected = self.pick(candidates, &Selection::Folder)?;
        let host = host::host_or_empty(self.host.as_ref());
        Ok(view::assemble(&selected, encode::encode, &host))
    }

    /// Folder listing: the immediate children of the folders directory.
    pub fn folder_index(&self) -> AppResult<FolderIndex> {
        let folders = scan::scan(
            &self.layout.folders,
            ScanMode::Subdirectories { recursive: false },
            &self.scan_options,
        )?;
        let host = host::host_or_empty(self.host.as_ref());
        Ok(view::folder_index(&folders, &self.layout.folder_icon, &host))
    }
}

/// Run blocking filesystem work off the async workers.
async fn run_blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

fn client_addr(info: Option<ConnectInfo<SocketAddr>>) -> Option<String> {
    info.map(|ConnectInfo(addr)| addr.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

async fn home(
    State(state): State<AppState>,
    client: Option<ConnectInfo<SocketAddr>>,
) -> AppResult<Html<String>> {
    match state.config.gallery.home {
        Home::Gallery => gallery(State(state), client).await,
        Home::Folders => folders(State(state), client).await,
    }
}

async fn gallery(
    State(state): State<AppState>,
    client: Option<ConnectInfo<SocketAddr>>,
) -> AppResult<Html<String>> {
    let mut view = run_blocking(move || state.gallery_view()).await?;
    view.client = client_addr(client);
    Ok(Html(render::render_gallery(&view).into_string()))
}

async fn folders(
    State(state): State<AppState>,
    client: Option<ConnectInfo<SocketAddr>>,
) -> AppResult<Html<String>> {
    let mut index = run_blocking(move || state.folder_index()).await?;
    index.client = client_addr(client);
    Ok(Html(render::render_folder_index(&index).into_string()))
}

#[derive(Debug, Deserialize)]
struct FolderQuery {
    folder: Option<String>,
}

async fn open_folder(
    State(state): State<AppState>,
    query: Result<Query<FolderQuery>, QueryRejection>,
    client: Option<ConnectInfo<SocketAddr>>,
) -> AppResult<Html<String>> {
    let Query(query) = query?;
    let raw = query.folder.ok_or(AppError::MissingFolder)?;
    let name = FolderName::parse(&raw)?;
    let title = name.to_string();
    let mut view = run_blocking(move || state.folder_view(&name)).await?;
    view.client = client_addr(client);
    Ok(Html(render::render_folder(&title, &view).into_string()))
}

async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND)
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.layout.static_dir);
    Router::new()
        .route("/", get(home))
        .route("/gallery", get(gallery))
        .route("/folders", get(folders))
        .route("/open_folder", get(open_folder))
        .nest_service("/static", static_files)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// A bind failure is returned immediately; it is the only fatal startup
/// condition once the config has loaded.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    info!(
        %addr,
        images = %state.layout.images.display(),
        folders = %state.layout.folders.display(),
        "Listening"
    );

    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
