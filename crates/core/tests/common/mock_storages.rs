//! Storage collaborators with behaviour beyond a fixed answer.

use async_trait::async_trait;
use pcs_core::storage::{StorageResult, StorageService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Answers after a delay, so the check suspends like real I/O.
#[allow(dead_code)]
pub struct DelayedStorage {
    pub exists: bool,
    pub delay: Duration,
}

#[async_trait]
impl StorageService for DelayedStorage {
    async fn file_exists(&self, _path: &str) -> StorageResult<bool> {
        tokio::time::sleep(self.delay).await;
        Ok(self.exists)
    }
}

/// Storage whose answer can be flipped between calls.
#[allow(dead_code)]
pub struct SwitchableStorage {
    exists: AtomicBool,
}

#[allow(dead_code)]
impl SwitchableStorage {
    pub fn new(exists: bool) -> Self {
        Self {
            exists: AtomicBool::new(exists),
        }
    }

    pub fn set(&self, exists: bool) {
        self.exists.store(exists, Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageService for SwitchableStorage {
    async fn file_exists(&self, _path: &str) -> StorageResult<bool> {
        Ok(self.exists.load(Ordering::SeqCst))
    }
}
