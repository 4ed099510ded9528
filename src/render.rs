//! HTML rendering.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time templates. Every
//! page is rendered to an in-memory [`Markup`] before a single byte reaches
//! the socket, so a response is either the whole page or an error page,
//! never a mix of both. Interpolated names are auto-escaped.
//!
//! ## Pages
//!
//! - **Gallery** (`/`, `/gallery`): the random selection
//! - **Folder** (`/open_folder?folder=NAME`): every image in one folder
//! - **Folder index** (`/folders`): one card per folder with the shared icon
//! - **Error**: status line only, no detail

use crate::types::{EncodedImage, FolderIndex, ViewModel};
use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

const CSS: &str = include_str!("../assets/style.css");

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(heading: &str) -> Markup {
    html! {
        header.site-header {
            h1 { (heading) }
            nav {
                a href="/gallery" { "Shuffle" }
                a href="/folders" { "Folders" }
            }
        }
    }
}

/// Footer with the serving host and, when known, the client address.
fn host_footer(host: &str, client: Option<&str>) -> Markup {
    html! {
        footer.host {
            @if !host.is_empty() {
                p { "Host: " (host) }
            }
            @if let Some(addr) = client {
                p { "Client: " (addr) }
            }
        }
    }
}

fn image_grid(images: &[EncodedImage]) -> Markup {
    html! {
        @if images.is_empty() {
            p.empty { "No images to show." }
        } @else {
            div.image-grid {
                @for image in images {
                    figure.photo {
                        img src=(image.data_uri()) alt=(image.name);
                        figcaption { (image.name) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the random gallery page.
pub fn render_gallery(view: &ViewModel) -> Markup {
    let content = html! {
        (site_header("Gallery"))
        main.gallery-page {
            (image_grid(&view.images))
        }
        (host_footer(&view.host, view.client.as_deref()))
    };
    base_document("Gallery", content)
}

/// Renders every image of one folder.
pub fn render_folder(name: &str, view: &ViewModel) -> Markup {
    let content = html! {
        (site_header(name))
        main.folder-page {
            (image_grid(&view.images))
        }
        (host_footer(&view.host, view.client.as_deref()))
    };
    base_document(name, content)
}

/// Renders the folder listing.
pub fn render_folder_index(index: &FolderIndex) -> Markup {
    let icon = index.icon.as_ref().map(EncodedImage::data_uri);
    let content = html! {
        (site_header("Folders"))
        main.folders-page {
            @if index.folders.is_empty() {
                p.empty { "No folders yet." }
            } @else {
                div.folder-grid {
                    @for name in &index.folders {
                        a.folder-card href={ "/open_folder?folder=" (urlencoding::encode(name)) } {
                            @if let Some(src) = &icon {
                                img src=(src) alt="" loading="lazy";
                            }
                            span { (name) }
                        }
                    }
                }
            }
        }
        (host_footer(&index.host, index.client.as_deref()))
    };
    base_document("Folders", content)
}

/// Renders the generic error page. Only the status line is shown.
pub fn render_error(status: StatusCode) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");
    let title = format!("{} {}", status.as_u16(), reason);
    let content = html! {
        main.error-page {
            h1 { (title) }
            p { a href="/" { "Back to the gallery" } }
        }
    };
    base_document(&title, content)
}
