// src/store.rs

use std::io;
use std::path::{Component, Path, PathBuf};

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::error::VitrineError;

/// Cache policy for served model files. Model files are immutable once
/// deployed, so clients may hold them for an hour before revalidating.
const CACHE_CONTROL: &str = "public, max-age=3600";

/// Read-only store of servable model files rooted at a single directory.
///
/// The root is canonicalized once at construction and never changes for the
/// process lifetime. Every request path is resolved against it and must land
/// inside it; `..` segments, absolute paths, and symlinks pointing outside
/// the root are all refused.
#[derive(Debug, Clone)]
pub struct ModelStore {
    root: PathBuf,
}

impl ModelStore {
    /// Open a store over an existing directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, VitrineError> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => VitrineError::config(format!(
                "models directory does not exist: {}",
                root.display()
            )),
            _ => VitrineError::Io(e),
        })?;

        if !root.is_dir() {
            return Err(VitrineError::config(format!(
                "models path is not a directory: {}",
                root.display()
            )));
        }

        Ok(Self { root })
    }

    /// The canonicalized root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a URL-supplied relative path to a file inside the root.
    ///
    /// Only normal path segments are accepted: `..`, absolute paths, and
    /// drive prefixes are rejected outright. The joined path is then
    /// canonicalized and checked against the root again so that symlinks
    /// cannot smuggle a file out from under it.
    pub async fn resolve(&self, requested: &str) -> Result<PathBuf, VitrineError> {
        let mut candidate = self.root.clone();

        for component in Path::new(requested).components() {
            match component {
                Component::Normal(segment) => candidate.push(segment),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(VitrineError::PathEscape {
                        path: requested.to_string(),
                    });
                }
            }
        }

        let resolved = fs::canonicalize(&candidate).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => VitrineError::ModelNotFound {
                path: requested.to_string(),
            },
            _ => VitrineError::Io(e),
        })?;

        if !resolved.starts_with(&self.root) {
            return Err(VitrineError::PathEscape {
                path: requested.to_string(),
            });
        }

        Ok(resolved)
    }

    /// Stream a model file as an HTTP response.
    ///
    /// The content type is inferred from the file extension; unknown
    /// extensions fall back to `application/octet-stream`.
    pub async fn serve(&self, requested: &str) -> Result<Response, VitrineError> {
        let resolved = self.resolve(requested).await?;

        let metadata = fs::metadata(&resolved).await?;
        if !metadata.is_file() {
            return Err(VitrineError::ModelNotFound {
                path: requested.to_string(),
            });
        }

        let file = fs::File::open(&resolved).await?;
        let mime_type = mime_guess::from_path(requested).first_or_octet_stream();

        debug!(
            path = requested,
            size = metadata.len(),
            content_type = %mime_type,
            "Serving model file"
        );

        let stream = ReaderStream::new(file);
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime_type.as_ref())
            .header(header::CONTENT_LENGTH, metadata.len())
            .header(header::CACHE_CONTROL, CACHE_CONTROL)
            .body(Body::from_stream(stream))
            .map_err(|e| VitrineError::internal(format!("Failed to build response: {}", e)))?;

        Ok(response)
    }
}
