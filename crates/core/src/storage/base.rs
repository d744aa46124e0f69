//! Base StorageService trait and supporting types.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unsupported storage location: {0}")]
    Unsupported(String),
    #[error("Failed to check {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Existence check against whatever storage holds the pipeline's data.
///
/// Stage services receive an implementation of this trait; they never
/// construct one themselves.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn file_exists(&self, path: &str) -> StorageResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct FixedStorage {
        exists: bool,
    }

    #[async_trait]
    impl StorageService for FixedStorage {
        async fn file_exists(&self, path: &str) -> StorageResult<bool> {
            if path.is_empty() {
                return Err(StorageError::InvalidPath("empty path".to_string()));
            }
            Ok(self.exists)
        }
    }

    #[tokio::test]
    async fn test_storage_behind_trait_object() {
        let storage: Arc<dyn StorageService> = Arc::new(FixedStorage { exists: true });
        assert!(storage.file_exists("data.csv").await.unwrap());

        let err = storage.file_exists("").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath(_)));
    }

    #[test]
    fn test_storage_error_messages() {
        let err = StorageError::InvalidArgument("offset out of range".to_string());
        assert_eq!(err.to_string(), "Invalid argument: offset out of range");

        let err = StorageError::Io {
            path: PathBuf::from("/data/in.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to check /data/in.csv: denied");
    }
}
