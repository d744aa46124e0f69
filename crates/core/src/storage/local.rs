//! Local filesystem storage.

use crate::storage::base::{StorageError, StorageResult, StorageService};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Storage backed by the local filesystem.
///
/// Relative paths are resolved against `root` when one is configured,
/// otherwise against the process working directory. `file://` URLs are
/// accepted; any other URL scheme is rejected as unsupported.
#[derive(Debug, Clone, Default)]
pub struct LocalStorageService {
    root: Option<PathBuf>,
}

impl LocalStorageService {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Resolve relative paths against `root`.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root: Some(root) }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Map a storage path to a local filesystem path.
    ///
    /// The path is used as given; surrounding whitespace is part of the name.
    pub fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        if path.trim().is_empty() {
            return Err(StorageError::InvalidPath("path is empty".to_string()));
        }
        if path.contains('\0') {
            return Err(StorageError::InvalidArgument(format!(
                "path contains a NUL byte ({path:?})"
            )));
        }

        let local = match path.strip_prefix(FILE_SCHEME) {
            Some(rest) => rest,
            None => {
                if let Some((scheme, _)) = path.split_once("://") {
                    return Err(StorageError::Unsupported(format!(
                        "{scheme}:// paths are not served by local storage ({path})"
                    )));
                }
                path
            }
        };

        let local = Path::new(local);
        match &self.root {
            Some(root) if local.is_relative() => Ok(root.join(local)),
            _ => Ok(local.to_path_buf()),
        }
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    /// Only regular files count; a directory at `path` is not a file.
    async fn file_exists(&self, path: &str) -> StorageResult<bool> {
        let resolved = self.resolve(path)?;
        match tokio::fs::metadata(&resolved).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Io {
                path: resolved,
                source,
            }),
        }
    }
}
