//! Request-level errors and their HTTP mapping.
//!
//! Component errors bubble up into [`AppError`], which picks the status code,
//! logs the full error server-side and answers with the generic error page.
//! Nothing from the error message (paths, OS errors) reaches the client.
//!
//! | Error | Status |
//! |-------|--------|
//! | scan failure, insufficient candidates, worker failure | 500 |
//! | malformed query, invalid or missing folder name | 400 |
//! | folder does not exist | 404 |

use crate::naming::NameError;
use crate::render;
use crate::scan::ScanError;
use crate::select::SelectError;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("selection failed: {0}")]
    Select(#[from] SelectError),
    #[error("invalid folder name: {0}")]
    InvalidFolder(#[from] NameError),
    #[error("malformed query: {0}")]
    BadQuery(#[from] QueryRejection),
    #[error("missing `folder` query parameter")]
    MissingFolder,
    #[error("folder not found: {0}")]
    FolderNotFound(PathBuf),
    #[error("request worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadQuery(_) | AppError::InvalidFolder(_) | AppError::MissingFolder => {
                StatusCode::BAD_REQUEST
            }
            AppError::FolderNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Scan(_) | AppError::Select(_) | AppError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        error_page(status)
    }
}

/// Generic error page for `status`.
pub fn error_page(status: StatusCode) -> Response {
    (status, Html(render::render_error(status).into_string())).into_response()
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(AppError::MissingFolder.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidFolder(NameError::Empty).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FolderNotFound(PathBuf::from("folders/x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Select(SelectError::InsufficientCandidates {
                needed: 4,
                available: 1
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Scan(ScanError::NotADirectory(PathBuf::from("sources"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn into_response_uses_status() {
        let err = AppError::FolderNotFound(PathBuf::from("/srv/secret/folders/x"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
