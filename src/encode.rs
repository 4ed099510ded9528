//! Image encoding for inline display.
//!
//! Images are never served as separate files: each one is read whole,
//! base64-encoded (standard alphabet, padded, no line wrapping) and embedded
//! in the page as a `data:` URI. The file is opened and closed inside
//! [`encode`], so no handle outlives the call on any path.
//!
//! Encoding failures are per-item: the caller drops the image and keeps
//! going. Compare [`crate::scan`], where an error on one entry aborts the
//! whole walk unless the scan is configured to skip.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
#[error("cannot encode {path}: {source}")]
pub struct EncodeError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Read `path` and return its bytes as standard base64.
pub fn encode(path: &Path) -> Result<String, EncodeError> {
    let bytes = fs::read(path).map_err(|source| EncodeError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(STANDARD.encode(bytes))
}

/// Like [`encode`], but logs failures and returns an empty string instead.
///
/// An empty file also encodes to `""`, so the sentinel cannot tell an empty
/// file from a failed read. The view assembler uses [`encode`] for that
/// reason.
pub fn encode_or_empty(path: &Path) -> String {
    encode(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e.source, "Image could not be encoded");
        String::new()
    })
}

/// MIME type for a `data:` URI, guessed from the extension.
pub fn mime_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn encode_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = write_image(tmp.path(), "dawn.png");
        assert_eq!(encode(&path).unwrap(), encode(&path).unwrap());
    }

    #[test]
    fn encode_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = write_image(tmp.path(), "dawn.png");
        let original = fs::read(&path).unwrap();

        let decoded = STANDARD.decode(encode(&path).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn encode_known_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "x.jpg", b"hello");
        assert_eq!(encode(&path).unwrap(), "aGVsbG8=");
    }

    #[test]
    fn encode_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "empty.jpg", b"");
        assert_eq!(encode(&path).unwrap(), "");
    }

    #[test]
    fn encode_does_not_wrap_lines() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "big.jpg", &[0xAB; 4096]);
        let encoded = encode(&path).unwrap();
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('\r'));
    }

    #[test]
    fn encode_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("gone.jpg");
        let err = encode(&missing).unwrap_err();
        assert_eq!(err.path, missing);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn encode_or_empty_returns_sentinel() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(encode_or_empty(&tmp.path().join("gone.jpg")), "");
    }

    #[test]
    fn encode_or_empty_passes_through_success() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "x.png", b"hello");
        assert_eq!(encode_or_empty(&path), "aGVsbG8=");
    }

    #[test]
    fn empty_file_and_failure_share_sentinel() {
        let tmp = TempDir::new().unwrap();
        let empty = write_file(tmp.path(), "empty.png", b"");
        assert_eq!(encode_or_empty(&empty), "");
        assert_eq!(encode_or_empty(&tmp.path().join("gone.png")), "");
        assert!(encode(&empty).is_ok());
    }

    #[test]
    fn mime_for_common_types() {
        assert_eq!(mime_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_for(Path::new("a.webp")), "image/webp");
    }

    #[test]
    fn mime_for_unknown_is_octet_stream() {
        assert_eq!(mime_for(Path::new("a.zzz")), "application/octet-stream");
    }
}
