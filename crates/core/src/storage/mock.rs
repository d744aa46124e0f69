//! Mock storage implementation for testing.

use crate::storage::base::{StorageError, StorageResult, StorageService};
use async_trait::async_trait;
use std::sync::Mutex;

type Answer = Box<dyn Fn(&str) -> StorageResult<bool> + Send + Sync>;

/// Storage with a scripted answer that records every path it is asked about.
pub struct MockStorage {
    answer: Answer,
    calls: Mutex<Vec<String>>,
}

impl MockStorage {
    pub fn new<F>(answer: F) -> Self
    where
        F: Fn(&str) -> StorageResult<bool> + Send + Sync + 'static,
    {
        Self {
            answer: Box::new(answer),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every path exists.
    pub fn present() -> Self {
        Self::new(|_| Ok(true))
    }

    /// No path exists.
    pub fn absent() -> Self {
        Self::new(|_| Ok(false))
    }

    /// Every check fails with a backend error carrying `message`.
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |_| Err(StorageError::Backend(message.clone())))
    }

    /// Paths passed to `file_exists`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl StorageService for MockStorage {
    async fn file_exists(&self, path: &str) -> StorageResult<bool> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_string());
        (self.answer)(path)
    }
}
